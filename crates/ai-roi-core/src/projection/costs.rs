use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::growth::GrowthSchedule;
use crate::types::{pct_to_rate, Money, Percent, YearlyTotals, PROJECTION_YEARS};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The six base cost categories. Each carries its own growth schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Model API usage plus embedding / vector store spend
    Api,
    Infrastructure,
    Development,
    DataManagement,
    Operations,
    /// Training, change management, governance, legal
    Organizational,
}

impl CostCategory {
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Api,
        CostCategory::Infrastructure,
        CostCategory::Development,
        CostCategory::DataManagement,
        CostCategory::Operations,
        CostCategory::Organizational,
    ];

    /// Field name used in JSON inputs.
    pub fn key(&self) -> &'static str {
        match self {
            CostCategory::Api => "api",
            CostCategory::Infrastructure => "infrastructure",
            CostCategory::Development => "development",
            CostCategory::DataManagement => "data_management",
            CostCategory::Operations => "operations",
            CostCategory::Organizational => "organizational",
        }
    }

    /// Display label used in reports and comparison tables.
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Api => "API Costs",
            CostCategory::Infrastructure => "Infrastructure",
            CostCategory::Development => "Development",
            CostCategory::DataManagement => "Data Management",
            CostCategory::Operations => "Operations",
            CostCategory::Organizational => "Organizational",
        }
    }

    /// Growth schedule for this category. API spend follows the usage growth
    /// rate; organizational spend front-loads and then decays.
    pub fn growth_schedule(&self, usage_growth_pct: Percent) -> GrowthSchedule {
        match self {
            CostCategory::Api => GrowthSchedule::Compound {
                rate: pct_to_rate(usage_growth_pct),
            },
            CostCategory::Infrastructure => GrowthSchedule::Compound { rate: dec!(0.15) },
            CostCategory::Development => GrowthSchedule::Compound { rate: dec!(0.05) },
            CostCategory::DataManagement => GrowthSchedule::Compound { rate: dec!(0.10) },
            CostCategory::Operations => GrowthSchedule::Compound { rate: dec!(0.08) },
            CostCategory::Organizational => GrowthSchedule::Stepped {
                year2: dec!(0.7),
                year3: dec!(0.8),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Year-1 spend for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub base_annual_amount: Money,
}

impl CostLine {
    pub fn new(base_annual_amount: Money) -> Self {
        CostLine { base_annual_amount }
    }
}

/// Flat cost assumptions: one line per category plus the contingency buffer
/// and the usage growth rate that drives API-linked spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    #[serde(default)]
    pub api: CostLine,
    #[serde(default)]
    pub infrastructure: CostLine,
    #[serde(default)]
    pub development: CostLine,
    #[serde(default)]
    pub data_management: CostLine,
    #[serde(default)]
    pub operations: CostLine,
    #[serde(default)]
    pub organizational: CostLine,
    /// Buffer applied to every year's subtotal (0-100, 15-25 typical)
    #[serde(default)]
    pub contingency_pct: Percent,
    /// Annual growth of API usage (0-200 typical)
    #[serde(default)]
    pub usage_growth_pct: Percent,
}

impl CostAssumptions {
    pub fn line(&self, category: CostCategory) -> &CostLine {
        match category {
            CostCategory::Api => &self.api,
            CostCategory::Infrastructure => &self.infrastructure,
            CostCategory::Development => &self.development,
            CostCategory::DataManagement => &self.data_management,
            CostCategory::Operations => &self.operations,
            CostCategory::Organizational => &self.organizational,
        }
    }

    pub fn line_mut(&mut self, category: CostCategory) -> &mut CostLine {
        match category {
            CostCategory::Api => &mut self.api,
            CostCategory::Infrastructure => &mut self.infrastructure,
            CostCategory::Development => &mut self.development,
            CostCategory::DataManagement => &mut self.data_management,
            CostCategory::Operations => &mut self.operations,
            CostCategory::Organizational => &mut self.organizational,
        }
    }

    /// Builder-style setter for a category's year-1 amount.
    pub fn with_base(mut self, category: CostCategory, amount: Money) -> Self {
        self.line_mut(category).base_annual_amount = amount;
        self
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// One projected year of costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostYear {
    pub year: u32,
    pub by_category: BTreeMap<CostCategory, Money>,
    /// Sum of the six categories
    pub subtotal: Money,
    /// subtotal × contingency_pct / 100
    pub contingency: Money,
    /// subtotal + contingency
    pub total: Money,
}

/// Per-year cost detail plus the totals the rest of the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostProjection {
    pub years: [CostYear; PROJECTION_YEARS],
    pub totals: YearlyTotals,
}

impl CostProjection {
    pub fn year1(&self) -> &CostYear {
        &self.years[0]
    }
}

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

/// Grow every category over three years, add that year's contingency, and
/// total. Contingency is recomputed on each year's already-grown subtotal.
pub fn project_costs(assumptions: &CostAssumptions) -> CostProjection {
    let contingency_rate = pct_to_rate(assumptions.contingency_pct);

    let grown: Vec<(CostCategory, [Money; PROJECTION_YEARS])> = CostCategory::ALL
        .iter()
        .map(|category| {
            let schedule = category.growth_schedule(assumptions.usage_growth_pct);
            let base = assumptions.line(*category).base_annual_amount;
            (*category, schedule.project(base))
        })
        .collect();

    let years: [CostYear; PROJECTION_YEARS] = std::array::from_fn(|i| {
        let by_category: BTreeMap<CostCategory, Money> = grown
            .iter()
            .map(|(category, amounts)| (*category, amounts[i]))
            .collect();
        let subtotal: Money = by_category.values().copied().sum();
        let contingency = subtotal * contingency_rate;
        CostYear {
            year: i as u32 + 1,
            by_category,
            subtotal,
            contingency,
            total: subtotal + contingency,
        }
    });

    let totals = YearlyTotals::from_years(years[0].total, years[1].total, years[2].total);

    log::debug!(
        "cost projection: year1={} year2={} year3={} tco={}",
        totals.year1,
        totals.year2,
        totals.year3,
        totals.three_year_total
    );

    CostProjection { years, totals }
}

/// Year totals and three-year TCO for a set of cost assumptions.
pub fn accumulate_costs(assumptions: &CostAssumptions) -> YearlyTotals {
    project_costs(assumptions).totals
}

/// Share of a year's total taken by one category, as a 0-100 percentage.
/// Zero when the year's total is not positive.
pub fn category_share_pct(year: &CostYear, category: CostCategory) -> Percent {
    if year.total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let amount = year.by_category.get(&category).copied().unwrap_or_default();
    amount / year.total * Decimal::ONE_HUNDRED
}
