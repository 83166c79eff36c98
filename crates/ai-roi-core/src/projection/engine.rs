use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::benefits::{accumulate_benefits, project_benefits, BenefitAssumptions, BenefitProjection};
use super::costs::{accumulate_costs, project_costs, CostAssumptions, CostCategory, CostProjection};
use super::payback::{compute_payback_months, PaybackRating};
use super::roi::{aggregate, ProjectionResult};
use super::sensitivity::{evaluate_cases, standard_cases, SensitivityResult};
use crate::error::RoiError;
use crate::estimate::DetailedAssumptions;
use crate::types::*;
use crate::validation::{self, ValidationReport};
use crate::RoiResult;

/// Largest absolute currency amount accepted by `project_roi`.
pub const MAX_MONEY_MAGNITUDE: Decimal = dec!(1000000000000000);

/// Largest absolute percentage accepted by `project_roi`.
pub const MAX_PERCENT_MAGNITUDE: Decimal = dec!(10000);

/// Everything the engine needs: cost and benefit assumptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    #[serde(default)]
    pub costs: CostAssumptions,
    #[serde(default)]
    pub benefits: BenefitAssumptions,
}

/// Run all four stages: costs, benefits, payback, ROI.
pub fn project(assumptions: &ProjectionAssumptions) -> ProjectionResult {
    let cost_totals = accumulate_costs(&assumptions.costs);
    let benefit_totals = accumulate_benefits(&assumptions.benefits);
    let payback = compute_payback_months(&cost_totals, &benefit_totals);
    aggregate(cost_totals, benefit_totals, payback)
}

/// Full projection with breakdowns, standard sensitivity cases and
/// validation findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub projection: ProjectionResult,
    pub payback_rating: PaybackRating,
    pub costs: CostProjection,
    pub benefits: BenefitProjection,
    pub sensitivity: Vec<SensitivityResult>,
    pub validation: ValidationReport,
}

fn check_money(field: &str, value: Decimal) -> RoiResult<()> {
    if value.abs() > MAX_MONEY_MAGNITUDE {
        return Err(RoiError::InvalidInput {
            field: field.into(),
            reason: format!("Magnitude must not exceed {MAX_MONEY_MAGNITUDE}"),
        });
    }
    Ok(())
}

fn check_percent(field: &str, value: Decimal) -> RoiResult<()> {
    if value.abs() > MAX_PERCENT_MAGNITUDE {
        return Err(RoiError::InvalidInput {
            field: field.into(),
            reason: format!("Magnitude must not exceed {MAX_PERCENT_MAGNITUDE}%"),
        });
    }
    Ok(())
}

/// Reject inputs large enough to overflow 128-bit decimal arithmetic.
/// Everything else, negative values included, is left to validation.
pub fn check_bounds(assumptions: &ProjectionAssumptions) -> RoiResult<()> {
    let costs = &assumptions.costs;
    for category in CostCategory::ALL {
        check_money(
            &format!("costs.{}.base_annual_amount", category.key()),
            costs.line(category).base_annual_amount,
        )?;
    }
    check_percent("costs.contingency_pct", costs.contingency_pct)?;
    check_percent("costs.usage_growth_pct", costs.usage_growth_pct)?;

    let benefits = &assumptions.benefits;
    let productivity = &benefits.productivity;
    check_percent("benefits.productivity.confidence_pct", productivity.confidence_pct)?;
    let productivity_base = productivity
        .hours_saved_per_user_per_week
        .checked_mul(Decimal::from(productivity.affected_users))
        .and_then(|v| v.checked_mul(dec!(52)))
        .and_then(|v| v.checked_mul(productivity.hourly_rate));
    match productivity_base {
        Some(base) => check_money("benefits.productivity", base)?,
        None => {
            return Err(RoiError::InvalidInput {
                field: "benefits.productivity".into(),
                reason: "Hours × users × rate overflows".into(),
            })
        }
    }

    for (name, line) in [
        ("cost_reduction", &benefits.cost_reduction),
        ("revenue", &benefits.revenue),
        ("strategic", &benefits.strategic),
    ] {
        check_percent(&format!("benefits.{name}.confidence_pct"), line.confidence_pct)?;
        for item in &line.items {
            check_money(&format!("benefits.{name}.{}", item.label), item.annual_amount)?;
        }
        check_money(&format!("benefits.{name}"), line.base_annual_amount())?;
    }
    Ok(())
}

/// Project costs, benefits, payback and ROI for a set of assumptions.
///
/// Validation findings never block the projection; they are returned in
/// the report and echoed as warnings on the envelope.
pub fn project_roi(
    assumptions: &ProjectionAssumptions,
) -> RoiResult<ComputationOutput<ProjectionReport>> {
    let start = Instant::now();
    check_bounds(assumptions)?;

    let costs = project_costs(&assumptions.costs);
    let benefits = project_benefits(&assumptions.benefits);
    let payback = compute_payback_months(&costs.totals, &benefits.totals);
    let projection = aggregate(costs.totals, benefits.totals, payback);
    let sensitivity = evaluate_cases(&costs.totals, &benefits.totals, &standard_cases());

    let validation = validation::review_projection(assumptions, &costs, &projection);
    if !validation.is_clean() {
        log::warn!(
            "projection has {} validation error(s) and {} warning(s)",
            validation.errors.len(),
            validation.warnings.len()
        );
    }
    let warnings = validation.messages();

    let report = ProjectionReport {
        payback_rating: projection.payback_months.rating(),
        projection,
        costs,
        benefits,
        sensitivity,
        validation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-Year TCO, Benefit and ROI Projection",
        &serde_json::json!({
            "contingency_pct": assumptions.costs.contingency_pct.to_string(),
            "usage_growth_pct": assumptions.costs.usage_growth_pct.to_string(),
            "horizon_months": super::payback::PAYBACK_HORIZON_MONTHS,
            "payback_tie_break": "cumulative_benefit >= cumulative_cost",
        }),
        warnings,
        elapsed,
        report,
    ))
}

/// Resolve line-item assumptions and project them. Line-item findings
/// (zero request volume, staffing outliers) are added to the report.
pub fn project_detailed(
    detailed: &DetailedAssumptions,
) -> RoiResult<ComputationOutput<ProjectionReport>> {
    let mut output = project_roi(&detailed.resolve_checked()?)?;
    let line_items = validation::validate_detailed_inputs(detailed);
    if !line_items.is_clean() {
        log::warn!(
            "line-item inputs have {} error(s) and {} warning(s)",
            line_items.errors.len(),
            line_items.warnings.len()
        );
    }
    output.warnings.extend(line_items.messages());
    output.result.validation.merge(line_items);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::benefits::ProductivityAssumptions;
    use crate::projection::payback::Payback;

    #[test]
    fn test_project_all_zero() {
        let r = project(&ProjectionAssumptions::default());
        assert_eq!(r.cost_totals, YearlyTotals::zero());
        assert_eq!(r.benefit_totals, YearlyTotals::zero());
        assert_eq!(r.net_benefit, Decimal::ZERO);
        assert_eq!(r.roi_percentage, Decimal::ZERO);
        assert_eq!(r.payback_months, Payback::Month(1));
    }

    #[test]
    fn test_project_roi_matches_project() {
        let mut a = ProjectionAssumptions::default();
        a.costs = a.costs.with_base(CostCategory::Development, dec!(500000));
        a.costs.contingency_pct = dec!(15);
        a.benefits.productivity = ProductivityAssumptions {
            hours_saved_per_user_per_week: dec!(5),
            hourly_rate: dec!(75),
            affected_users: 100,
            confidence_pct: dec!(70),
        };
        let report = project_roi(&a).unwrap();
        assert_eq!(report.result.projection, project(&a));
        assert_eq!(report.result.sensitivity.len(), 3);
        assert_eq!(
            report.result.costs.totals,
            report.result.projection.cost_totals
        );
    }

    #[test]
    fn test_project_roi_rejects_overflowing_amount() {
        let mut a = ProjectionAssumptions::default();
        a.costs = a
            .costs
            .with_base(CostCategory::Api, dec!(10000000000000000000));
        let err = project_roi(&a).unwrap_err();
        assert!(matches!(err, RoiError::InvalidInput { .. }));
    }

    #[test]
    fn test_project_roi_rejects_overflowing_productivity() {
        let mut a = ProjectionAssumptions::default();
        a.benefits.productivity = ProductivityAssumptions {
            hours_saved_per_user_per_week: dec!(1000000000000),
            hourly_rate: dec!(1000000000000),
            affected_users: u64::MAX,
            confidence_pct: dec!(100),
        };
        assert!(project_roi(&a).is_err());
    }

    #[test]
    fn test_project_roi_accepts_negative_inputs_with_warnings() {
        let mut a = ProjectionAssumptions::default();
        a.costs = a.costs.with_base(CostCategory::Operations, dec!(-1000));
        let out = project_roi(&a).unwrap();
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_deserialize_partial_input() {
        let a: ProjectionAssumptions = serde_json::from_value(serde_json::json!({
            "costs": {
                "development": { "base_annual_amount": 400000 },
                "contingency_pct": 15
            }
        }))
        .unwrap();
        assert_eq!(a.costs.development.base_annual_amount, dec!(400000));
        assert_eq!(a.costs.api.base_annual_amount, Decimal::ZERO);
        assert_eq!(a.benefits, BenefitAssumptions::default());
    }

    #[test]
    fn test_project_detailed_reports_line_item_findings() {
        let mut detailed = crate::presets::demo_assumptions();
        detailed.api.requests_per_day = Decimal::ZERO;
        let out = project_detailed(&detailed).unwrap();
        assert_eq!(out.result.projection, project(&detailed.resolve()));
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "error: Requests per day must be greater than zero"));
        assert!(!out.result.validation.is_valid());
    }
}
