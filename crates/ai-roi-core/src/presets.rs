//! Canonical reference values: the demo organisation and the standard
//! sensitivity multipliers. The engine itself embeds none of these.

use rust_decimal_macros::dec;

use crate::estimate::*;
use crate::projection::benefits::ProductivityAssumptions;
use crate::types::Rate;

/// Pessimistic / base / optimistic scaling of projected benefits.
pub const SENSITIVITY_MULTIPLIERS: [(&str, Rate); 3] = [
    ("Pessimistic (70% of estimate)", dec!(0.7)),
    ("Base Case (100%)", dec!(1.0)),
    ("Optimistic (130% of estimate)", dec!(1.3)),
];

pub fn demo_profile() -> OrgProfile {
    OrgProfile {
        org_name: "TechCorp Industries".into(),
        industry: "Technology".into(),
        org_size: "500-1000".into(),
        maturity: "Pilot".into(),
        use_case: "Customer Service/Chatbots".into(),
        expected_users: 250,
    }
}

/// A customer-service chatbot rollout at a mid-sized technology company.
pub fn demo_assumptions() -> DetailedAssumptions {
    DetailedAssumptions {
        api: ApiUsage {
            avg_tokens_per_request: dec!(2500),
            requests_per_day: dec!(5000),
            cost_per_million_tokens: dec!(15),
            monthly_embedding_cost: dec!(800),
            usage_growth_pct: dec!(50),
        },
        infrastructure: MonthlyInfrastructure {
            compute: dec!(3000),
            storage: dec!(800),
            networking: dec!(500),
            security_tools: dec!(1500),
            monitoring_tools: dec!(1000),
            backup_dr: dec!(600),
        },
        development: StaffingCosts {
            roles: vec![
                StaffRole::new("AI/ML Engineer", dec!(2.0), dec!(180000)),
                StaffRole::new("Backend Developer", dec!(2.0), dec!(150000)),
                StaffRole::new("Frontend Developer", dec!(1.5), dec!(130000)),
                StaffRole::new("QA Engineer", dec!(1.0), dec!(120000)),
            ],
            items: vec![AnnualItem::new("Development tools & licences", dec!(60000))],
        },
        data_management: StaffingCosts {
            roles: vec![StaffRole::new("Data Engineer", dec!(1.5), dec!(160000))],
            items: vec![
                AnnualItem::new("Data preparation", dec!(75000)),
                AnnualItem::new("Data quality & governance tools", dec!(40000)),
                AnnualItem::new("Data labeling", dec!(50000)),
            ],
        },
        operations: StaffingCosts {
            roles: vec![
                StaffRole::new("DevOps/SRE Engineer", dec!(1.5), dec!(170000)),
                StaffRole::new("Support Staff", dec!(1.0), dec!(100000)),
            ],
            items: vec![
                AnnualItem::new("Incident management & on-call", dec!(40000)),
                AnnualItem::new("Model retraining", dec!(60000)),
            ],
        },
        organizational: OrganizationalCosts {
            training: dec!(80000),
            change_management: dec!(100000),
            governance: dec!(75000),
            legal: dec!(50000),
        },
        contingency_pct: dec!(18),
        benefits: DetailedBenefits {
            productivity: ProductivityAssumptions {
                hours_saved_per_user_per_week: dec!(6.0),
                hourly_rate: dec!(75),
                affected_users: 200,
                confidence_pct: dec!(75),
            },
            cost_reduction: CostReductionInputs {
                customer_service_reduction: dec!(180000),
                process_automation_value: dec!(200000),
                error_reduction_value: dec!(80000),
                confidence_pct: dec!(70),
            },
            revenue: RevenueInputs {
                new_revenue: dec!(250000),
                customer_retention: dec!(150000),
                confidence_pct: dec!(55),
            },
            strategic: StrategicInputs {
                competitive_advantage: dec!(200000),
                innovation_value: dec!(120000),
                confidence_pct: dec!(60),
            },
        },
    }
}
