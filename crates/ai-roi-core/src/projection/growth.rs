use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, PROJECTION_YEARS};

/// How a year-1 amount evolves over the projection horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthSchedule {
    /// year n = base × (1 + rate)^(n-1)
    Compound { rate: Rate },
    /// Each later year is the previous year times its own factor.
    Stepped { year2: Rate, year3: Rate },
}

impl GrowthSchedule {
    /// Year-1/2/3 amounts for a year-1 base.
    pub fn project(&self, base: Money) -> [Money; PROJECTION_YEARS] {
        match *self {
            GrowthSchedule::Compound { rate } => {
                let factor = Decimal::ONE + rate;
                let year2 = base * factor;
                [base, year2, year2 * factor]
            }
            GrowthSchedule::Stepped { year2, year3 } => {
                let y2 = base * year2;
                [base, y2, y2 * year3]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_growth() {
        let s = GrowthSchedule::Compound { rate: dec!(0.10) };
        assert_eq!(s.project(dec!(1000)), [dec!(1000), dec!(1100), dec!(1210)]);
    }

    #[test]
    fn test_negative_compound_rate_shrinks() {
        let s = GrowthSchedule::Compound { rate: dec!(-0.5) };
        assert_eq!(s.project(dec!(1000)), [dec!(1000), dec!(500), dec!(250)]);
    }

    #[test]
    fn test_stepped_factors_apply_in_sequence() {
        let s = GrowthSchedule::Stepped {
            year2: dec!(0.7),
            year3: dec!(0.8),
        };
        assert_eq!(s.project(dec!(100000)), [dec!(100000), dec!(70000), dec!(56000)]);
    }

    #[test]
    fn test_zero_base_stays_zero() {
        let s = GrowthSchedule::Compound { rate: dec!(2) };
        assert_eq!(s.project(Decimal::ZERO), [Decimal::ZERO; 3]);
    }
}
