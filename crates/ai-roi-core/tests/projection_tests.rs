use ai_roi_core::projection::benefits::{BenefitAssumptions, BenefitLine, ProductivityAssumptions};
use ai_roi_core::projection::costs::{accumulate_costs, CostAssumptions, CostCategory};
use ai_roi_core::projection::engine::{project, project_roi, ProjectionAssumptions};
use ai_roi_core::projection::payback::{compute_payback_months, Payback};
use ai_roi_core::projection::roi::aggregate;
use ai_roi_core::types::YearlyTotals;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario_a_costs() -> CostAssumptions {
    CostAssumptions {
        contingency_pct: dec!(15),
        usage_growth_pct: dec!(50),
        ..Default::default()
    }
    .with_base(CostCategory::Api, dec!(100000))
    .with_base(CostCategory::Infrastructure, dec!(50000))
    .with_base(CostCategory::Development, dec!(400000))
    .with_base(CostCategory::DataManagement, dec!(50000))
    .with_base(CostCategory::Operations, dec!(100000))
    .with_base(CostCategory::Organizational, dec!(50000))
}

fn scenario_b_benefits() -> BenefitAssumptions {
    BenefitAssumptions {
        productivity: ProductivityAssumptions {
            hours_saved_per_user_per_week: dec!(5),
            hourly_rate: dec!(75),
            affected_users: 100,
            confidence_pct: dec!(70),
        },
        ..Default::default()
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_scenario_a_year1_cost() {
    let totals = accumulate_costs(&scenario_a_costs());
    // (100000 + 50000 + 400000 + 50000 + 100000 + 50000) × 1.15
    assert_eq!(totals.year1, dec!(865000));
}

#[test]
fn test_scenario_a_later_years_apply_category_growth() {
    let totals = accumulate_costs(&scenario_a_costs());
    // Year 2: api 150000, infra 57500, dev 420000, data 55000, ops 108000, org 35000
    assert_eq!(totals.year2, dec!(825500) * dec!(1.15));
    // Year 3: api 225000, infra 66125, dev 441000, data 60500, ops 116640, org 28000
    assert_eq!(totals.year3, dec!(937265) * dec!(1.15));
    assert_eq!(
        totals.three_year_total,
        totals.year1 + totals.year2 + totals.year3
    );
}

#[test]
fn test_scenario_b_productivity_curve() {
    let assumptions = ProjectionAssumptions {
        benefits: scenario_b_benefits(),
        ..Default::default()
    };
    let result = project(&assumptions);
    assert_eq!(
        result.benefit_totals,
        YearlyTotals {
            year1: dec!(1365000),
            year2: dec!(1638000),
            year3: dec!(1883700),
            three_year_total: dec!(4886700),
        }
    );
}

#[test]
fn test_scenario_c_net_and_roi() {
    let costs = YearlyTotals::from_years(dec!(1000000), dec!(1000000), dec!(1000000));
    let benefits = YearlyTotals::from_years(dec!(1500000), dec!(1500000), dec!(1500000));
    let payback = compute_payback_months(&costs, &benefits);
    let result = aggregate(costs, benefits, payback);
    assert_eq!(result.net_benefit, dec!(1500000));
    assert_eq!(result.roi_percentage, dec!(50));
    assert_eq!(result.payback_months, Payback::Month(1));
}

#[test]
fn test_scenario_d_all_zero() {
    let result = project(&ProjectionAssumptions::default());
    assert_eq!(result.cost_totals, YearlyTotals::zero());
    assert_eq!(result.benefit_totals, YearlyTotals::zero());
    assert_eq!(result.net_benefit, Decimal::ZERO);
    assert_eq!(result.roi_percentage, Decimal::ZERO);
    // Equal cumulative values count as paid back
    assert_eq!(result.payback_months, Payback::Month(1));
}

#[test]
fn test_scenario_a_with_b_end_to_end() {
    let assumptions = ProjectionAssumptions {
        costs: scenario_a_costs(),
        benefits: scenario_b_benefits(),
    };
    let out = project_roi(&assumptions).unwrap();
    let p = &out.result.projection;
    assert_eq!(p.cost_totals.year1, dec!(865000));
    assert_eq!(p.benefit_totals.three_year_total, dec!(4886700));
    assert_eq!(
        p.net_benefit,
        p.benefit_totals.three_year_total - p.cost_totals.three_year_total
    );
    // Monthly benefit 113750 against monthly cost 72083.33: pays back in month 1
    assert_eq!(p.payback_months, Payback::Month(1));
    assert_eq!(out.result.sensitivity.len(), 3);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_zero_cost_with_benefits_pays_back_immediately() {
    let assumptions = ProjectionAssumptions {
        benefits: BenefitAssumptions {
            revenue: BenefitLine::single("New revenue", dec!(10000), dec!(50)),
            ..Default::default()
        },
        ..Default::default()
    };
    let result = project(&assumptions);
    assert_eq!(result.cost_totals.three_year_total, Decimal::ZERO);
    assert_eq!(result.roi_percentage, Decimal::ZERO);
    assert_eq!(result.payback_months, Payback::Month(1));
}

#[test]
fn test_organizational_decay_without_contingency() {
    let costs = CostAssumptions::default().with_base(CostCategory::Organizational, dec!(100000));
    let totals = accumulate_costs(&costs);
    assert_eq!(totals.year2, dec!(70000));
    assert_eq!(totals.year3, dec!(56000));
}

#[test]
fn test_organizational_decay_ratio_ignores_contingency() {
    for contingency in [dec!(0), dec!(15), dec!(25), dec!(50)] {
        let costs = CostAssumptions {
            contingency_pct: contingency,
            ..Default::default()
        }
        .with_base(CostCategory::Organizational, dec!(80000));
        let totals = accumulate_costs(&costs);
        assert_eq!(totals.year2 / totals.year1, dec!(0.7));
        assert_eq!(totals.year3 / totals.year1, dec!(0.56));
    }
}

#[test]
fn test_benefits_at_ten_percent_of_costs_never_pay_back() {
    let costs = YearlyTotals::from_years(dec!(1000000), dec!(1100000), dec!(1200000));
    let benefits = costs.scaled(dec!(0.1));
    let payback = compute_payback_months(&costs, &benefits);
    assert_eq!(payback, Payback::BeyondHorizon);
    assert_eq!(serde_json::to_value(payback).unwrap(), serde_json::json!("36+"));
}

#[test]
fn test_repeated_projection_is_identical() {
    let assumptions = ProjectionAssumptions {
        costs: scenario_a_costs(),
        benefits: scenario_b_benefits(),
    };
    let first = project(&assumptions);
    let second = project(&assumptions);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

fn arb_costs() -> impl Strategy<Value = CostAssumptions> {
    (
        prop::array::uniform6(0i64..5_000_000),
        0i64..60,
        0i64..250,
    )
        .prop_map(|(amounts, contingency, growth)| {
            let mut costs = CostAssumptions {
                contingency_pct: Decimal::from(contingency),
                usage_growth_pct: Decimal::from(growth),
                ..Default::default()
            };
            for (category, amount) in CostCategory::ALL.iter().zip(amounts) {
                costs = costs.with_base(*category, Decimal::from(amount));
            }
            costs
        })
}

proptest! {
    #[test]
    fn prop_raising_one_category_never_lowers_total(
        costs in arb_costs(),
        idx in 0usize..6,
        bump in 1i64..1_000_000,
    ) {
        let category = CostCategory::ALL[idx];
        let before = accumulate_costs(&costs).three_year_total;
        let raised_base = costs.line(category).base_annual_amount + Decimal::from(bump);
        let raised = costs.clone().with_base(category, raised_base);
        let after = accumulate_costs(&raised).three_year_total;
        prop_assert!(after >= before);
    }

    #[test]
    fn prop_projection_is_deterministic(
        costs in arb_costs(),
        hours in 0i64..20,
        users in 0u64..5_000,
        confidence in 0i64..=100,
    ) {
        let assumptions = ProjectionAssumptions {
            costs,
            benefits: BenefitAssumptions {
                productivity: ProductivityAssumptions {
                    hours_saved_per_user_per_week: Decimal::from(hours),
                    hourly_rate: dec!(60),
                    affected_users: users,
                    confidence_pct: Decimal::from(confidence),
                },
                ..Default::default()
            },
        };
        prop_assert_eq!(project(&assumptions), project(&assumptions));
    }

    #[test]
    fn prop_three_year_total_is_sum_of_years(costs in arb_costs()) {
        let t = accumulate_costs(&costs);
        prop_assert_eq!(t.three_year_total, t.year1 + t.year2 + t.year3);
    }
}
