use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::{check_bounds, project, ProjectionAssumptions};
use super::roi::{net_benefit, roi_percentage};
use crate::error::RoiError;
use crate::presets;
use crate::types::*;
use crate::RoiResult;

/// Largest benefit multiplier `analyze_sensitivity` accepts.
pub const MAX_BENEFIT_MULTIPLIER: Rate = dec!(1000);

/// A named scaling of projected three-year benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCase {
    pub name: String,
    pub benefit_multiplier: Rate,
}

impl SensitivityCase {
    pub fn new(name: impl Into<String>, benefit_multiplier: Rate) -> Self {
        SensitivityCase {
            name: name.into(),
            benefit_multiplier,
        }
    }
}

/// Pessimistic (0.7×), base (1.0×) and optimistic (1.3×) benefit cases.
pub fn standard_cases() -> Vec<SensitivityCase> {
    presets::SENSITIVITY_MULTIPLIERS
        .iter()
        .map(|(name, multiplier)| SensitivityCase::new(*name, *multiplier))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub name: String,
    pub benefit_multiplier: Rate,
    pub adjusted_benefits: Money,
    pub net_benefit: Money,
    pub roi_percentage: Percent,
}

/// Re-derive net benefit and ROI with scaled benefits, holding costs fixed.
/// Scaled benefits saturate at the decimal range.
pub fn evaluate_cases(
    cost_totals: &YearlyTotals,
    benefit_totals: &YearlyTotals,
    cases: &[SensitivityCase],
) -> Vec<SensitivityResult> {
    let costs = cost_totals.three_year_total;
    cases
        .iter()
        .map(|case| {
            let adjusted = benefit_totals
                .three_year_total
                .saturating_mul(case.benefit_multiplier);
            SensitivityResult {
                name: case.name.clone(),
                benefit_multiplier: case.benefit_multiplier,
                adjusted_benefits: adjusted,
                net_benefit: net_benefit(adjusted, costs),
                roi_percentage: roi_percentage(adjusted, costs),
            }
        })
        .collect()
}

/// Input for benefit sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub assumptions: ProjectionAssumptions,
    /// Defaults to the pessimistic / base / optimistic cases
    #[serde(default = "standard_cases")]
    pub cases: Vec<SensitivityCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub three_year_costs: Money,
    pub three_year_benefits: Money,
    pub results: Vec<SensitivityResult>,
    /// Smallest multiplier at which benefits cover costs, when costs are positive
    pub breakeven_multiplier: Option<Rate>,
}

/// Run the projection once and evaluate every benefit case against it.
pub fn analyze_sensitivity(
    input: &SensitivityInput,
) -> RoiResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.cases.is_empty() {
        return Err(RoiError::InsufficientData(
            "At least one sensitivity case required".into(),
        ));
    }
    for case in &input.cases {
        if case.benefit_multiplier < Decimal::ZERO
            || case.benefit_multiplier > MAX_BENEFIT_MULTIPLIER
        {
            return Err(RoiError::InvalidInput {
                field: format!("case:{} benefit_multiplier", case.name),
                reason: format!("Multiplier must be between 0 and {MAX_BENEFIT_MULTIPLIER}"),
            });
        }
    }
    check_bounds(&input.assumptions)?;

    let projection = project(&input.assumptions);
    let costs = projection.cost_totals.three_year_total;
    let benefits = projection.benefit_totals.three_year_total;

    if costs <= Decimal::ZERO {
        warnings.push("Three-year cost is not positive; ROI reported as 0 for every case".into());
    }

    let breakeven_multiplier = if costs > Decimal::ZERO && benefits > Decimal::ZERO {
        costs.checked_div(benefits)
    } else {
        None
    };

    let results = evaluate_cases(&projection.cost_totals, &projection.benefit_totals, &input.cases);

    let output = SensitivityOutput {
        three_year_costs: costs,
        three_year_benefits: benefits,
        results,
        breakeven_multiplier,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Benefit Sensitivity (costs held fixed)",
        &serde_json::json!({
            "num_cases": input.cases.len(),
            "three_year_tco": costs.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn totals(amount: Decimal) -> YearlyTotals {
        YearlyTotals::from_years(amount, Decimal::ZERO, Decimal::ZERO)
    }

    #[test]
    fn test_standard_cases() {
        let cases = standard_cases();
        let multipliers: Vec<Decimal> = cases.iter().map(|c| c.benefit_multiplier).collect();
        assert_eq!(multipliers, vec![dec!(0.7), dec!(1.0), dec!(1.3)]);
    }

    #[test]
    fn test_evaluate_cases_holds_costs_fixed() {
        let results = evaluate_cases(&totals(dec!(3000000)), &totals(dec!(4500000)), &standard_cases());
        assert_eq!(results[0].adjusted_benefits, dec!(3150000));
        assert_eq!(results[0].roi_percentage, dec!(5));
        assert_eq!(results[1].roi_percentage, dec!(50));
        assert_eq!(results[2].net_benefit, dec!(2850000));
        assert_eq!(results[2].roi_percentage, dec!(95));
    }

    #[test]
    fn test_zero_costs_report_zero_roi() {
        let results = evaluate_cases(&YearlyTotals::zero(), &totals(dec!(1000)), &standard_cases());
        assert!(results.iter().all(|r| r.roi_percentage.is_zero()));
    }

    #[test]
    fn test_analyze_rejects_negative_multiplier() {
        let input = SensitivityInput {
            assumptions: ProjectionAssumptions::default(),
            cases: vec![SensitivityCase::new("bad", dec!(-1))],
        };
        assert!(analyze_sensitivity(&input).is_err());
    }

    #[test]
    fn test_analyze_requires_cases() {
        let input = SensitivityInput {
            assumptions: ProjectionAssumptions::default(),
            cases: vec![],
        };
        assert!(matches!(
            analyze_sensitivity(&input),
            Err(RoiError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_cases_default_when_absent() {
        let input: SensitivityInput = serde_json::from_value(serde_json::json!({
            "assumptions": {}
        }))
        .unwrap();
        assert_eq!(input.cases.len(), 3);
        let out = analyze_sensitivity(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.result.breakeven_multiplier.is_none());
    }

    #[test]
    fn test_analyze_rejects_huge_multiplier() {
        let mut assumptions = ProjectionAssumptions::default();
        assumptions.benefits.revenue =
            crate::projection::benefits::BenefitLine::single("New revenue", dec!(1000000000000), dec!(100));
        let input = SensitivityInput {
            assumptions,
            cases: vec![SensitivityCase::new("extreme", dec!(1000000000000000000000))],
        };
        assert!(matches!(
            analyze_sensitivity(&input),
            Err(RoiError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_analyze_rejects_out_of_range_assumptions() {
        let mut assumptions = ProjectionAssumptions::default();
        assumptions.costs = assumptions.costs.with_base(
            crate::projection::costs::CostCategory::Api,
            dec!(100000000000000000000),
        );
        let input = SensitivityInput {
            assumptions,
            cases: standard_cases(),
        };
        assert!(matches!(
            analyze_sensitivity(&input),
            Err(RoiError::InvalidInput { ref field, .. }) if field == "costs.api.base_annual_amount"
        ));
    }

    #[test]
    fn test_evaluate_cases_saturates() {
        let cases = vec![SensitivityCase::new("extreme", Decimal::MAX)];
        let results = evaluate_cases(&totals(dec!(1000)), &totals(dec!(1000000)), &cases);
        assert_eq!(results[0].adjusted_benefits, Decimal::MAX);
        assert_eq!(results[0].net_benefit, Decimal::MAX - dec!(1000));
    }
}
