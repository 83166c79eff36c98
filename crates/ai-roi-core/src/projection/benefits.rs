use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::growth::GrowthSchedule;
use crate::types::{pct_to_rate, Money, Percent, YearlyTotals};

const WEEKS_PER_YEAR: Decimal = dec!(52);

/// The four benefit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitCategory {
    Productivity,
    CostReduction,
    Revenue,
    Strategic,
}

impl BenefitCategory {
    pub const ALL: [BenefitCategory; 4] = [
        BenefitCategory::Productivity,
        BenefitCategory::CostReduction,
        BenefitCategory::Revenue,
        BenefitCategory::Strategic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BenefitCategory::Productivity => "Productivity",
            BenefitCategory::CostReduction => "Cost Reduction",
            BenefitCategory::Revenue => "Revenue",
            BenefitCategory::Strategic => "Strategic",
        }
    }

    /// Fixed maturity curve applied after the confidence-weighted year 1.
    pub fn growth_schedule(&self) -> GrowthSchedule {
        match self {
            BenefitCategory::Productivity => GrowthSchedule::Stepped {
                year2: dec!(1.20),
                year3: dec!(1.15),
            },
            BenefitCategory::CostReduction => GrowthSchedule::Stepped {
                year2: dec!(1.30),
                year3: dec!(1.20),
            },
            BenefitCategory::Revenue => GrowthSchedule::Stepped {
                year2: dec!(1.50),
                year3: dec!(1.40),
            },
            BenefitCategory::Strategic => GrowthSchedule::Stepped {
                year2: dec!(1.20),
                year3: dec!(1.15),
            },
        }
    }
}

/// Productivity gains derived from time saved by affected users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivityAssumptions {
    pub hours_saved_per_user_per_week: Decimal,
    pub hourly_rate: Money,
    pub affected_users: u64,
    pub confidence_pct: Percent,
}

impl ProductivityAssumptions {
    /// hours × users × 52 × rate, before confidence weighting.
    pub fn base_annual_amount(&self) -> Money {
        self.hours_saved_per_user_per_week
            * Decimal::from(self.affected_users)
            * WEEKS_PER_YEAR
            * self.hourly_rate
    }
}

/// A labelled annual benefit estimate, e.g. "Process automation".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitItem {
    pub label: String,
    pub annual_amount: Money,
}

impl BenefitItem {
    pub fn new(label: impl Into<String>, annual_amount: Money) -> Self {
        BenefitItem {
            label: label.into(),
            annual_amount,
        }
    }
}

/// A benefit category expressed as a sum of sub-items and one confidence level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitLine {
    #[serde(default)]
    pub items: Vec<BenefitItem>,
    pub confidence_pct: Percent,
}

impl BenefitLine {
    /// A line with one sub-item.
    pub fn single(label: impl Into<String>, annual_amount: Money, confidence_pct: Percent) -> Self {
        BenefitLine {
            items: vec![BenefitItem::new(label, annual_amount)],
            confidence_pct,
        }
    }

    pub fn base_annual_amount(&self) -> Money {
        self.items.iter().map(|i| i.annual_amount).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitAssumptions {
    #[serde(default)]
    pub productivity: ProductivityAssumptions,
    #[serde(default)]
    pub cost_reduction: BenefitLine,
    #[serde(default)]
    pub revenue: BenefitLine,
    #[serde(default)]
    pub strategic: BenefitLine,
}

impl BenefitAssumptions {
    /// Raw year-1 amount and confidence for a category.
    pub fn base_and_confidence(&self, category: BenefitCategory) -> (Money, Percent) {
        match category {
            BenefitCategory::Productivity => (
                self.productivity.base_annual_amount(),
                self.productivity.confidence_pct,
            ),
            BenefitCategory::CostReduction => (
                self.cost_reduction.base_annual_amount(),
                self.cost_reduction.confidence_pct,
            ),
            BenefitCategory::Revenue => {
                (self.revenue.base_annual_amount(), self.revenue.confidence_pct)
            }
            BenefitCategory::Strategic => (
                self.strategic.base_annual_amount(),
                self.strategic.confidence_pct,
            ),
        }
    }
}

/// Per-category benefit curves plus their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitProjection {
    pub by_category: BTreeMap<BenefitCategory, YearlyTotals>,
    pub totals: YearlyTotals,
}

/// Confidence-weight each category's year 1, then grow it along the
/// category's fixed curve. Confidence is applied once, to year 1 only.
pub fn project_benefits(assumptions: &BenefitAssumptions) -> BenefitProjection {
    let by_category: BTreeMap<BenefitCategory, YearlyTotals> = BenefitCategory::ALL
        .iter()
        .map(|category| {
            let (base, confidence) = assumptions.base_and_confidence(*category);
            let year1 = base * pct_to_rate(confidence);
            let [y1, y2, y3] = category.growth_schedule().project(year1);
            (*category, YearlyTotals::from_years(y1, y2, y3))
        })
        .collect();

    let totals: YearlyTotals = by_category.values().copied().sum();

    log::debug!(
        "benefit projection: year1={} year2={} year3={} total={}",
        totals.year1,
        totals.year2,
        totals.year3,
        totals.three_year_total
    );

    BenefitProjection {
        by_category,
        totals,
    }
}

/// Year totals and three-year sum for a set of benefit assumptions.
pub fn accumulate_benefits(assumptions: &BenefitAssumptions) -> YearlyTotals {
    project_benefits(assumptions).totals
}
