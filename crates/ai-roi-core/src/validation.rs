//! Plausibility checks on assumptions and results. Findings are advisory:
//! the engine runs regardless, and the presentation layer decides what to
//! surface.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::estimate::DetailedAssumptions;
use crate::projection::benefits::{BenefitAssumptions, BenefitCategory};
use crate::projection::costs::{category_share_pct, project_costs, CostAssumptions, CostCategory, CostProjection};
use crate::projection::engine::{check_bounds, project, ProjectionAssumptions};
use crate::projection::payback::Payback;
use crate::projection::roi::ProjectionResult;
use crate::types::*;
use crate::RoiResult;

pub const MAX_API_COST_PCT: Decimal = dec!(70);
pub const MAX_DEV_COST_PCT: Decimal = dec!(60);
pub const MIN_DATA_COST_PCT: Decimal = dec!(5);
pub const MAX_ROI_PCT: Decimal = dec!(500);
pub const MIN_PAYBACK_MONTHS: u32 = 3;
pub const MAX_FTE: Decimal = dec!(20);
pub const MIN_HOURLY_RATE: Decimal = dec!(20);
pub const MAX_HOURLY_RATE: Decimal = dec!(500);
pub const MAX_HOURS_SAVED_PER_WEEK: Decimal = dec!(40);
pub const MAX_USAGE_GROWTH_PCT: Decimal = dec!(200);
pub const MIN_CONTINGENCY_PCT: Decimal = dec!(10);
pub const MAX_CONTINGENCY_PCT: Decimal = dec!(50);
pub const LOW_CONFIDENCE_PCT: Decimal = dec!(50);
pub const MAX_AI_ENGINEER_COST: Decimal = dec!(300000);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// No errors. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Errors then warnings, each prefixed with its severity.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("error: {e}"))
            .chain(self.warnings.iter().map(|w| format!("warning: {w}")))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

pub fn validate_costs(costs: &CostAssumptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    for category in CostCategory::ALL {
        if costs.line(category).base_annual_amount < Decimal::ZERO {
            report.error(format!("{} cannot be negative", category.label()));
        }
    }

    if costs.contingency_pct < MIN_CONTINGENCY_PCT {
        report.warn(format!(
            "Contingency buffer of {}% is risky for AI projects. Recommend 15-25%.",
            costs.contingency_pct
        ));
    } else if costs.contingency_pct > MAX_CONTINGENCY_PCT {
        report.warn(format!(
            "Contingency buffer of {}% seems excessive. Typical range is 15-25%.",
            costs.contingency_pct
        ));
    }

    if costs.usage_growth_pct < Decimal::ZERO {
        report.error("Usage growth rate cannot be negative");
    } else if costs.usage_growth_pct > MAX_USAGE_GROWTH_PCT {
        report.warn(format!(
            "Usage growth of {}% per year is very aggressive. Typical AI projects see 20-80%.",
            costs.usage_growth_pct
        ));
    }

    report
}

pub fn validate_benefits(benefits: &BenefitAssumptions) -> ValidationReport {
    let mut report = ValidationReport::default();
    let productivity = &benefits.productivity;

    if productivity.hours_saved_per_user_per_week < Decimal::ZERO {
        report.error("Hours saved per user cannot be negative");
    } else if productivity.hours_saved_per_user_per_week > MAX_HOURS_SAVED_PER_WEEK {
        report.warn(format!(
            "{} hours saved per week exceeds a working week. Please verify.",
            productivity.hours_saved_per_user_per_week
        ));
    }

    if productivity.hours_saved_per_user_per_week > Decimal::ZERO {
        if productivity.hourly_rate <= Decimal::ZERO {
            report.error("Hourly rate must be greater than zero");
        } else if productivity.hourly_rate < MIN_HOURLY_RATE {
            report.warn(format!(
                "Hourly rate of ${} is very low. Please verify.",
                productivity.hourly_rate
            ));
        } else if productivity.hourly_rate > MAX_HOURLY_RATE {
            report.warn(format!(
                "Hourly rate of ${} is very high. Typical rates are $50-$200/hour.",
                productivity.hourly_rate
            ));
        }
    }

    for category in BenefitCategory::ALL {
        let (_, confidence) = benefits.base_and_confidence(category);
        if confidence < Decimal::ZERO || confidence > Decimal::ONE_HUNDRED {
            report.error(format!(
                "{} confidence must be between 0% and 100% (got {confidence}%)",
                category.label()
            ));
        }
    }

    for (category, line) in [
        (BenefitCategory::CostReduction, &benefits.cost_reduction),
        (BenefitCategory::Revenue, &benefits.revenue),
        (BenefitCategory::Strategic, &benefits.strategic),
    ] {
        for item in line.items.iter().filter(|i| i.annual_amount < Decimal::ZERO) {
            report.error(format!(
                "{} item '{}' cannot be negative",
                category.label(),
                item.label
            ));
        }
    }

    report
}

/// Line-item checks that only make sense before the inputs are collapsed.
pub fn validate_detailed_inputs(detailed: &DetailedAssumptions) -> ValidationReport {
    let mut report = ValidationReport::default();
    let api = &detailed.api;

    if api.avg_tokens_per_request <= Decimal::ZERO {
        report.error("Average tokens per request must be greater than zero");
    }
    if api.requests_per_day <= Decimal::ZERO {
        report.error("Requests per day must be greater than zero");
    }
    if api.cost_per_million_tokens < Decimal::ZERO {
        report.error("Cost per million tokens cannot be negative");
    }

    let staffing = [
        ("Development", &detailed.development),
        ("Data Management", &detailed.data_management),
        ("Operations", &detailed.operations),
    ];
    for (area, costs) in staffing {
        for role in &costs.roles {
            if role.fte < Decimal::ZERO {
                report.error(format!("{area}: {} FTE cannot be negative", role.role));
            } else if role.fte > MAX_FTE {
                report.warn(format!(
                    "{area}: {} FTE for {} is very high. Please verify.",
                    role.fte, role.role
                ));
            }
        }
    }

    let ai_engineer_cost = detailed
        .development
        .roles
        .iter()
        .filter(|r| r.role.to_ascii_lowercase().starts_with("ai"))
        .map(|r| r.annual_cost_per_fte)
        .max();
    if let Some(cost) = ai_engineer_cost.filter(|c| *c > MAX_AI_ENGINEER_COST) {
        report.warn(format!(
            "AI engineer annual cost of ${cost} is very high. Typical range is $150K-$250K."
        ));
    }

    report
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Year-1 cost mix against typical ranges.
pub fn validate_cost_structure(costs: &CostProjection) -> ValidationReport {
    let mut report = ValidationReport::default();
    let year1 = costs.year1();

    if year1.total <= Decimal::ZERO {
        report.error("Total cost must be greater than zero");
        return report;
    }

    let api_pct = category_share_pct(year1, CostCategory::Api);
    let dev_pct = category_share_pct(year1, CostCategory::Development);
    let data_pct = category_share_pct(year1, CostCategory::DataManagement);

    if api_pct > MAX_API_COST_PCT {
        report.warn(format!(
            "API costs are {api_pct:.0}% of the year-1 budget. Typical range is 15-40%."
        ));
    }
    if dev_pct > MAX_DEV_COST_PCT {
        report.warn(format!(
            "Development costs are {dev_pct:.0}% of the year-1 budget. Typical range is 25-45%."
        ));
    }
    if data_pct < MIN_DATA_COST_PCT {
        report.error(format!(
            "Data costs are only {data_pct:.1}% of the year-1 budget. Minimum 8-12% recommended."
        ));
    }

    report
}

pub fn validate_projection(
    projection: &ProjectionResult,
    benefits: &BenefitAssumptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let roi = projection.roi_percentage;

    if roi < Decimal::ZERO {
        report.warn(format!(
            "Negative ROI of {roi:.0}% means the project loses money over three years."
        ));
    } else if roi > MAX_ROI_PCT {
        report.warn(format!(
            "ROI of {roi:.0}% is extremely high. Typical AI projects see 100-200%."
        ));
    }

    match projection.payback_months {
        Payback::Month(m) if m < MIN_PAYBACK_MONTHS => report.warn(format!(
            "Payback period of {m} months is unusually short. Most AI projects take 12-36 months."
        )),
        Payback::BeyondHorizon => {
            report.warn("Payback beyond 3 years. Consider whether this investment is viable.")
        }
        Payback::Month(_) => {}
    }

    let low_confidence: Vec<&str> = [
        (BenefitCategory::Productivity, "productivity gains"),
        (BenefitCategory::CostReduction, "cost reductions"),
        (BenefitCategory::Revenue, "revenue increases"),
    ]
    .into_iter()
    .filter(|(category, _)| {
        let (base, confidence) = benefits.base_and_confidence(*category);
        base > Decimal::ZERO && confidence < LOW_CONFIDENCE_PCT
    })
    .map(|(_, name)| name)
    .collect();
    if !low_confidence.is_empty() {
        report.warn(format!(
            "Low confidence in {}. Consider pilot programs to validate assumptions.",
            low_confidence.join(", ")
        ));
    }

    report
}

/// Every assumption- and result-level check for one projection.
pub fn review_projection(
    assumptions: &ProjectionAssumptions,
    costs: &CostProjection,
    projection: &ProjectionResult,
) -> ValidationReport {
    let mut report = validate_costs(&assumptions.costs);
    report.merge(validate_benefits(&assumptions.benefits));
    report.merge(validate_cost_structure(costs));
    report.merge(validate_projection(projection, &assumptions.benefits));
    report
}

/// Validate flat assumptions and the projection they produce.
pub fn run_validation(
    assumptions: &ProjectionAssumptions,
) -> RoiResult<ComputationOutput<ValidationReport>> {
    let start = Instant::now();
    check_bounds(assumptions)?;
    let report = review(assumptions);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Assumption and Projection Plausibility Checks",
        &serde_json::json!({ "input": "flat" }),
        Vec::new(),
        elapsed,
        report,
    ))
}

/// Validate line-item assumptions, then the flat records they resolve to.
pub fn run_detailed_validation(
    detailed: &DetailedAssumptions,
) -> RoiResult<ComputationOutput<ValidationReport>> {
    let start = Instant::now();
    let assumptions = detailed.resolve_checked()?;
    let mut report = validate_detailed_inputs(detailed);
    report.merge(review(&assumptions));
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Assumption and Projection Plausibility Checks",
        &serde_json::json!({ "input": "detailed" }),
        Vec::new(),
        elapsed,
        report,
    ))
}

fn review(assumptions: &ProjectionAssumptions) -> ValidationReport {
    let costs = project_costs(&assumptions.costs);
    let projection = project(assumptions);
    review_projection(assumptions, &costs, &projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::projection::benefits::{BenefitItem, BenefitLine};

    fn balanced_costs() -> CostAssumptions {
        CostAssumptions::default()
            .with_base(CostCategory::Api, dec!(100000))
            .with_base(CostCategory::Infrastructure, dec!(50000))
            .with_base(CostCategory::Development, dec!(300000))
            .with_base(CostCategory::DataManagement, dec!(100000))
            .with_base(CostCategory::Operations, dec!(100000))
            .with_base(CostCategory::Organizational, dec!(50000))
    }

    #[test]
    fn test_contingency_warnings() {
        let mut costs = balanced_costs();
        costs.contingency_pct = dec!(5);
        assert_eq!(validate_costs(&costs).warnings.len(), 1);
        costs.contingency_pct = dec!(60);
        assert_eq!(validate_costs(&costs).warnings.len(), 1);
        costs.contingency_pct = dec!(20);
        assert!(validate_costs(&costs).is_clean());
    }

    #[test]
    fn test_negative_cost_is_error() {
        let mut costs = balanced_costs().with_base(CostCategory::Operations, dec!(-1));
        costs.contingency_pct = dec!(15);
        let report = validate_costs(&costs);
        assert_eq!(report.errors, vec!["Operations cannot be negative".to_string()]);
    }

    #[test]
    fn test_confidence_out_of_range() {
        let benefits = BenefitAssumptions {
            revenue: BenefitLine {
                items: vec![BenefitItem::new("New revenue", dec!(1000))],
                confidence_pct: dec!(120),
            },
            ..Default::default()
        };
        let report = validate_benefits(&benefits);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Revenue confidence"));
    }

    #[test]
    fn test_cost_structure_data_too_low() {
        let costs = project_costs(&balanced_costs().with_base(CostCategory::DataManagement, dec!(1000)));
        let report = validate_cost_structure(&costs);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_cost_structure_api_heavy() {
        let costs = project_costs(&CostAssumptions::default()
            .with_base(CostCategory::Api, dec!(900000))
            .with_base(CostCategory::DataManagement, dec!(100000)));
        let report = validate_cost_structure(&costs);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_zero_total_cost_is_error() {
        let costs = project_costs(&CostAssumptions::default());
        let report = validate_cost_structure(&costs);
        assert_eq!(report.errors, vec!["Total cost must be greater than zero".to_string()]);
    }

    #[test]
    fn test_projection_warnings() {
        let projection = ProjectionResult {
            cost_totals: YearlyTotals::from_years(dec!(100), dec!(100), dec!(100)),
            benefit_totals: YearlyTotals::zero(),
            net_benefit: dec!(-300),
            roi_percentage: dec!(-100),
            payback_months: Payback::BeyondHorizon,
        };
        let report = validate_projection(&projection, &BenefitAssumptions::default());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_low_confidence_only_for_used_categories() {
        let mut benefits = BenefitAssumptions::default();
        benefits.revenue = BenefitLine {
            items: vec![BenefitItem::new("New revenue", dec!(1000))],
            confidence_pct: dec!(30),
        };
        let projection = ProjectionResult {
            cost_totals: YearlyTotals::from_years(dec!(100), dec!(100), dec!(100)),
            benefit_totals: YearlyTotals::from_years(dec!(100), dec!(200), dec!(300)),
            net_benefit: dec!(300),
            roi_percentage: dec!(100),
            payback_months: Payback::Month(12),
        };
        let report = validate_projection(&projection, &benefits);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("revenue increases"));
        assert!(!report.warnings[0].contains("productivity"));
    }

    #[test]
    fn test_demo_detailed_validation() {
        let out = run_detailed_validation(&presets::demo_assumptions()).unwrap();
        assert!(out.result.is_valid(), "{:?}", out.result.errors);
    }

    #[test]
    fn test_detailed_flags_zero_requests_and_fte() {
        let mut detailed = presets::demo_assumptions();
        detailed.api.requests_per_day = Decimal::ZERO;
        detailed.development.roles[0].fte = dec!(25);
        let report = validate_detailed_inputs(&detailed);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_messages_prefix_severity() {
        let mut report = ValidationReport::default();
        report.error("bad");
        report.warn("odd");
        assert_eq!(report.messages(), vec!["error: bad", "warning: odd"]);
    }
}
