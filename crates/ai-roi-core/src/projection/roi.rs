use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payback::Payback;
use crate::types::{Money, Percent, YearlyTotals};

/// The engine's output record. Built fresh for every projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub cost_totals: YearlyTotals,
    pub benefit_totals: YearlyTotals,
    pub net_benefit: Money,
    pub roi_percentage: Percent,
    pub payback_months: Payback,
}

/// benefits - costs, saturating at the decimal range.
pub fn net_benefit(benefits_total: Money, costs_total: Money) -> Money {
    benefits_total.saturating_sub(costs_total)
}

/// (benefits - costs) / costs × 100.
///
/// Zero when `costs_total` is not positive. A quotient too large for
/// Decimal saturates at `Decimal::MAX` / `Decimal::MIN`.
pub fn roi_percentage(benefits_total: Money, costs_total: Money) -> Percent {
    if costs_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let net = net_benefit(benefits_total, costs_total);
    net.checked_div(costs_total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if net.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Combine year totals and the payback result into a `ProjectionResult`.
pub fn aggregate(
    cost_totals: YearlyTotals,
    benefit_totals: YearlyTotals,
    payback_months: Payback,
) -> ProjectionResult {
    ProjectionResult {
        net_benefit: net_benefit(benefit_totals.three_year_total, cost_totals.three_year_total),
        roi_percentage: roi_percentage(
            benefit_totals.three_year_total,
            cost_totals.three_year_total,
        ),
        cost_totals,
        benefit_totals,
        payback_months,
    }
}
