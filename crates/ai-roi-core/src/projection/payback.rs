use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Money, YearlyTotals};

pub const MONTHS_PER_YEAR: u32 = 12;
pub const PAYBACK_HORIZON_MONTHS: u32 = 36;

const BEYOND_HORIZON_LABEL: &str = "36+";

/// Payback month within the horizon, or a marker that cumulative benefits
/// never caught up with cumulative costs.
///
/// Serialises as a bare integer or the string `"36+"`. Orders so that any
/// month beats `BeyondHorizon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Payback {
    Month(u32),
    BeyondHorizon,
}

impl Payback {
    pub fn months(&self) -> Option<u32> {
        match self {
            Payback::Month(m) => Some(*m),
            Payback::BeyondHorizon => None,
        }
    }

    pub fn rating(&self) -> PaybackRating {
        match self {
            Payback::Month(m) if *m <= 12 => PaybackRating::Excellent,
            Payback::Month(m) if *m <= 24 => PaybackRating::Good,
            Payback::Month(_) => PaybackRating::Long,
            Payback::BeyondHorizon => PaybackRating::NotWithinHorizon,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Month(m) => write!(f, "{m}"),
            Payback::BeyondHorizon => f.write_str(BEYOND_HORIZON_LABEL),
        }
    }
}

impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payback::Month(m) => serializer.serialize_u32(*m),
            Payback::BeyondHorizon => serializer.serialize_str(BEYOND_HORIZON_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Payback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Month(u32),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Month(m) if (1..=PAYBACK_HORIZON_MONTHS).contains(&m) => Ok(Payback::Month(m)),
            Raw::Month(m) => Err(de::Error::custom(format!(
                "payback month {m} outside 1..={PAYBACK_HORIZON_MONTHS}"
            ))),
            Raw::Label(s) if s == BEYOND_HORIZON_LABEL => Ok(Payback::BeyondHorizon),
            Raw::Label(s) => Err(de::Error::custom(format!(
                "expected a month or \"{BEYOND_HORIZON_LABEL}\", got \"{s}\""
            ))),
        }
    }
}

/// Qualitative reading of a payback period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackRating {
    /// Within the first year
    Excellent,
    /// Within two years
    Good,
    /// Within the three-year horizon
    Long,
    NotWithinHorizon,
}

/// Spread each year's total evenly over its twelve months and return the
/// first month where cumulative benefit >= cumulative cost.
///
/// Ties count as paid back, so all-zero inputs pay back in month 1.
pub fn compute_payback_months(cost_totals: &YearlyTotals, benefit_totals: &YearlyTotals) -> Payback {
    let months_per_year = Decimal::from(MONTHS_PER_YEAR);
    let mut cumulative_cost: Money = Decimal::ZERO;
    let mut cumulative_benefit: Money = Decimal::ZERO;

    let yearly = cost_totals.years().into_iter().zip(benefit_totals.years());
    for (year_idx, (year_cost, year_benefit)) in yearly.enumerate() {
        let monthly_cost = year_cost / months_per_year;
        let monthly_benefit = year_benefit / months_per_year;

        for month_in_year in 0..MONTHS_PER_YEAR {
            cumulative_cost += monthly_cost;
            cumulative_benefit += monthly_benefit;
            if cumulative_benefit >= cumulative_cost {
                return Payback::Month(year_idx as u32 * MONTHS_PER_YEAR + month_in_year + 1);
            }
        }
    }

    Payback::BeyondHorizon
}
