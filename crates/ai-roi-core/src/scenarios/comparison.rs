use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::library::SavedScenario;
use crate::error::RoiError;
use crate::projection::costs::{project_costs, CostCategory};
use crate::projection::payback::Payback;
use crate::types::*;
use crate::RoiResult;

/// One summary row per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub scenario: String,
    pub costs: YearlyTotals,
    pub benefits: YearlyTotals,
    pub net_benefit: Money,
    pub roi_percentage: Percent,
    pub payback_months: Payback,
    pub year1_net: Money,
}

/// Year-1 cost by category, contingency kept separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownRow {
    pub scenario: String,
    pub by_category: BTreeMap<CostCategory, Money>,
    pub contingency: Money,
    pub total: Money,
}

/// Scenario name winning each criterion. The first scenario wins ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerAnalysis {
    pub highest_roi: String,
    pub lowest_cost: String,
    pub highest_benefits: String,
    pub fastest_payback: String,
    pub best_year1: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub rows: Vec<ComparisonRow>,
    pub cost_breakdown: Vec<CostBreakdownRow>,
    pub winners: WinnerAnalysis,
}

fn summary_row(scenario: &SavedScenario) -> ComparisonRow {
    let p = &scenario.projection;
    ComparisonRow {
        scenario: scenario.name.clone(),
        costs: p.cost_totals,
        benefits: p.benefit_totals,
        net_benefit: p.net_benefit,
        roi_percentage: p.roi_percentage,
        payback_months: p.payback_months,
        year1_net: p.benefit_totals.year1.saturating_sub(p.cost_totals.year1),
    }
}

fn breakdown_row(scenario: &SavedScenario) -> CostBreakdownRow {
    let costs = project_costs(&scenario.assumptions.costs);
    let year1 = costs.year1();
    CostBreakdownRow {
        scenario: scenario.name.clone(),
        by_category: year1.by_category.clone(),
        contingency: year1.contingency,
        total: year1.total,
    }
}

/// Name of the first row whose key is strictly better than every earlier row.
fn pick_by<K, F, B>(rows: &[ComparisonRow], key: F, better: B) -> String
where
    F: Fn(&ComparisonRow) -> K,
    B: Fn(&K, &K) -> bool,
{
    let mut best = &rows[0];
    let mut best_key = key(best);
    for row in &rows[1..] {
        let k = key(row);
        if better(&k, &best_key) {
            best = row;
            best_key = k;
        }
    }
    best.scenario.clone()
}

fn winner_analysis(rows: &[ComparisonRow]) -> WinnerAnalysis {
    WinnerAnalysis {
        highest_roi: pick_by(rows, |r| r.roi_percentage, |a, b| a > b),
        lowest_cost: pick_by(rows, |r| r.costs.three_year_total, |a, b| a < b),
        highest_benefits: pick_by(rows, |r| r.benefits.three_year_total, |a, b| a > b),
        fastest_payback: pick_by(rows, |r| r.payback_months, |a, b| a < b),
        best_year1: pick_by(rows, |r| r.year1_net, |a, b| a > b),
    }
}

/// Side-by-side comparison of saved scenarios, in the order given.
pub fn compare_scenarios(
    scenarios: &[SavedScenario],
) -> RoiResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if scenarios.is_empty() {
        return Err(RoiError::InsufficientData(
            "At least one scenario required for comparison".into(),
        ));
    }
    if scenarios.len() == 1 {
        warnings.push("Only one scenario supplied; winners are trivial".into());
    }
    for s in scenarios {
        s.check()?;
        if !s.is_consistent() {
            warnings.push(format!(
                "Scenario '{}' has a stored projection that differs from its assumptions",
                s.name
            ));
        }
    }

    let rows: Vec<ComparisonRow> = scenarios.iter().map(summary_row).collect();
    let cost_breakdown = scenarios.iter().map(breakdown_row).collect();
    let winners = winner_analysis(&rows);

    let output = ComparisonOutput {
        rows,
        cost_breakdown,
        winners,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    Ok(with_metadata(
        "Scenario comparison (stored 3-year projections)",
        &serde_json::json!({ "scenarios": names }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::OrgProfile;
    use crate::projection::benefits::{BenefitAssumptions, BenefitLine};
    use crate::projection::costs::CostAssumptions;
    use crate::projection::engine::ProjectionAssumptions;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn scenario(name: &str, cost: Money, benefit: Money) -> SavedScenario {
        let assumptions = ProjectionAssumptions {
            costs: CostAssumptions::default().with_base(CostCategory::Development, cost),
            benefits: BenefitAssumptions {
                cost_reduction: BenefitLine::single("savings", benefit, dec!(100)),
                ..Default::default()
            },
        };
        SavedScenario::new(
            name,
            OrgProfile::default(),
            assumptions,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_is_insufficient_data() {
        assert!(matches!(
            compare_scenarios(&[]),
            Err(RoiError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_winners() {
        let cheap = scenario("Cheap", dec!(100000), dec!(150000));
        let big = scenario("Big", dec!(500000), dec!(1200000));
        let out = compare_scenarios(&[cheap, big]).unwrap().result;

        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.winners.lowest_cost, "Cheap");
        assert_eq!(out.winners.highest_benefits, "Big");
        assert_eq!(out.winners.highest_roi, "Big");
        assert_eq!(out.winners.best_year1, "Big");
    }

    #[test]
    fn test_beyond_horizon_never_fastest() {
        let never = scenario("Never", dec!(1000000), dec!(0));
        let slow = scenario("Slow", dec!(1000000), dec!(1500000));
        let out = compare_scenarios(&[never, slow]).unwrap().result;
        assert_eq!(out.rows[0].payback_months, Payback::BeyondHorizon);
        assert_eq!(out.winners.fastest_payback, "Slow");
    }

    #[test]
    fn test_first_scenario_wins_ties() {
        let a = scenario("A", dec!(100000), dec!(200000));
        let b = scenario("B", dec!(100000), dec!(200000));
        let out = compare_scenarios(&[a, b]).unwrap().result;
        assert_eq!(
            out.winners,
            WinnerAnalysis {
                highest_roi: "A".into(),
                lowest_cost: "A".into(),
                highest_benefits: "A".into(),
                fastest_payback: "A".into(),
                best_year1: "A".into(),
            }
        );
    }

    #[test]
    fn test_breakdown_uses_year1() {
        let s = scenario("Dev", dec!(100000), dec!(0));
        let out = compare_scenarios(&[s]).unwrap();
        let row = &out.result.cost_breakdown[0];
        assert_eq!(row.by_category[&CostCategory::Development], dec!(100000));
        assert_eq!(row.contingency, dec!(0));
        assert_eq!(row.total, dec!(100000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_rejects_scenario_with_out_of_range_assumptions() {
        let mut tampered = scenario("Tampered", dec!(100000), dec!(150000));
        tampered.assumptions.costs = tampered
            .assumptions
            .costs
            .with_base(CostCategory::Api, dec!(100000000000000000000));
        let ok = scenario("Ok", dec!(100000), dec!(150000));
        assert!(matches!(
            compare_scenarios(&[ok, tampered]),
            Err(RoiError::InvalidInput { .. })
        ));
    }
}
