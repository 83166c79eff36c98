use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// All monetary values (USD). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fractional rates and multipliers (0.15 = 15%).
pub type Rate = Decimal;

/// Percentages on a 0-100 scale, as entered on the dashboard (15 = 15%).
/// The engine never clamps these; out-of-range values are a validation concern.
pub type Percent = Decimal;

/// Number of projected years.
pub const PROJECTION_YEARS: usize = 3;

/// Convert a 0-100 percentage into a fractional rate.
pub fn pct_to_rate(pct: Percent) -> Rate {
    pct / Decimal::ONE_HUNDRED
}

/// Year-1/2/3 amounts plus their sum. Shared shape for costs and benefits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearlyTotals {
    pub year1: Money,
    pub year2: Money,
    pub year3: Money,
    pub three_year_total: Money,
}

impl YearlyTotals {
    /// Build from per-year amounts; `three_year_total` is always their sum.
    pub fn from_years(year1: Money, year2: Money, year3: Money) -> Self {
        YearlyTotals {
            year1,
            year2,
            year3,
            three_year_total: year1 + year2 + year3,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Amounts in chronological order.
    pub fn years(&self) -> [Money; PROJECTION_YEARS] {
        [self.year1, self.year2, self.year3]
    }

    /// Multiply every year by `factor`, keeping the total consistent.
    pub fn scaled(&self, factor: Rate) -> Self {
        Self::from_years(self.year1 * factor, self.year2 * factor, self.year3 * factor)
    }
}

impl Add for YearlyTotals {
    type Output = YearlyTotals;

    fn add(self, rhs: YearlyTotals) -> YearlyTotals {
        YearlyTotals::from_years(
            self.year1 + rhs.year1,
            self.year2 + rhs.year2,
            self.year3 + rhs.year3,
        )
    }
}

impl std::iter::Sum for YearlyTotals {
    fn sum<I: Iterator<Item = YearlyTotals>>(iter: I) -> Self {
        iter.fold(YearlyTotals::zero(), |acc, t| acc + t)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
