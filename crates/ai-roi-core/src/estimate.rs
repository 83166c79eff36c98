use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::projection::benefits::{
    BenefitAssumptions, BenefitItem, BenefitLine, ProductivityAssumptions,
};
use crate::projection::costs::{CostAssumptions, CostLine};
use crate::error::RoiError;
use crate::projection::engine::{check_bounds, ProjectionAssumptions};
use crate::types::{Money, Percent};
use crate::RoiResult;

const DAYS_PER_YEAR: Decimal = dec!(365);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const TOKENS_PER_MILLION: Decimal = dec!(1000000);

fn checked_sum(values: impl IntoIterator<Item = Money>) -> Option<Money> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

fn overflow(field: &str) -> RoiError {
    RoiError::InvalidInput {
        field: field.into(),
        reason: "Line items overflow the decimal range".into(),
    }
}

// ---------------------------------------------------------------------------
// Organisation profile
// ---------------------------------------------------------------------------

/// Descriptive context for a scenario. Not used by the arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgProfile {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub industry: String,
    /// Headcount band, e.g. "500-1000"
    #[serde(default)]
    pub org_size: String,
    /// "Exploring", "Pilot", "Scaling" or "Mature"
    #[serde(default)]
    pub maturity: String,
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub expected_users: u64,
}

// ---------------------------------------------------------------------------
// Cost line items
// ---------------------------------------------------------------------------

/// Model API usage and embedding spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiUsage {
    /// Input + output tokens per request
    pub avg_tokens_per_request: Decimal,
    pub requests_per_day: Decimal,
    /// USD per million tokens
    pub cost_per_million_tokens: Money,
    /// Vector database / embedding spend per month
    #[serde(default)]
    pub monthly_embedding_cost: Money,
    /// Expected annual usage growth (0-200)
    #[serde(default)]
    pub usage_growth_pct: Percent,
}

impl ApiUsage {
    /// tokens/request × requests/day × 365 / 1M × price
    pub fn annual_api_cost(&self) -> Money {
        self.avg_tokens_per_request * self.requests_per_day * DAYS_PER_YEAR / TOKENS_PER_MILLION
            * self.cost_per_million_tokens
    }

    pub fn annual_embedding_cost(&self) -> Money {
        self.monthly_embedding_cost * MONTHS_PER_YEAR
    }

    pub fn annual_total(&self) -> Money {
        self.annual_api_cost() + self.annual_embedding_cost()
    }

    /// `annual_total`, or None if any intermediate product overflows.
    pub fn checked_annual_total(&self) -> Option<Money> {
        let api = self
            .avg_tokens_per_request
            .checked_mul(self.requests_per_day)?
            .checked_mul(DAYS_PER_YEAR)?
            .checked_div(TOKENS_PER_MILLION)?
            .checked_mul(self.cost_per_million_tokens)?;
        let embedding = self.monthly_embedding_cost.checked_mul(MONTHS_PER_YEAR)?;
        api.checked_add(embedding)
    }
}

/// Monthly cloud spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyInfrastructure {
    pub compute: Money,
    pub storage: Money,
    pub networking: Money,
    pub security_tools: Money,
    pub monitoring_tools: Money,
    pub backup_dr: Money,
}

impl MonthlyInfrastructure {
    pub fn monthly_total(&self) -> Money {
        self.compute
            + self.storage
            + self.networking
            + self.security_tools
            + self.monitoring_tools
            + self.backup_dr
    }

    pub fn annual_total(&self) -> Money {
        self.monthly_total() * MONTHS_PER_YEAR
    }

    pub fn checked_annual_total(&self) -> Option<Money> {
        checked_sum([
            self.compute,
            self.storage,
            self.networking,
            self.security_tools,
            self.monitoring_tools,
            self.backup_dr,
        ])?
        .checked_mul(MONTHS_PER_YEAR)
    }
}

/// A role staffed at a fractional headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRole {
    pub role: String,
    pub fte: Decimal,
    /// Salary + benefits + overhead per FTE
    pub annual_cost_per_fte: Money,
}

impl StaffRole {
    pub fn new(role: impl Into<String>, fte: Decimal, annual_cost_per_fte: Money) -> Self {
        StaffRole {
            role: role.into(),
            fte,
            annual_cost_per_fte,
        }
    }

    pub fn annual_cost(&self) -> Money {
        self.fte * self.annual_cost_per_fte
    }

    pub fn checked_annual_cost(&self) -> Option<Money> {
        self.fte.checked_mul(self.annual_cost_per_fte)
    }
}

/// A fixed annual line such as tooling or licences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualItem {
    pub label: String,
    pub annual_amount: Money,
}

impl AnnualItem {
    pub fn new(label: impl Into<String>, annual_amount: Money) -> Self {
        AnnualItem {
            label: label.into(),
            annual_amount,
        }
    }
}

/// People plus fixed annual items. Used for development, data management
/// and operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingCosts {
    pub roles: Vec<StaffRole>,
    pub items: Vec<AnnualItem>,
}

impl StaffingCosts {
    pub fn annual_total(&self) -> Money {
        let people: Money = self.roles.iter().map(StaffRole::annual_cost).sum();
        let items: Money = self.items.iter().map(|i| i.annual_amount).sum();
        people + items
    }

    pub fn checked_annual_total(&self) -> Option<Money> {
        let people = self
            .roles
            .iter()
            .map(StaffRole::checked_annual_cost)
            .collect::<Option<Vec<Money>>>()?;
        checked_sum(people.into_iter().chain(self.items.iter().map(|i| i.annual_amount)))
    }

    pub fn role(&self, name: &str) -> Option<&StaffRole> {
        self.roles.iter().find(|r| r.role.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationalCosts {
    pub training: Money,
    pub change_management: Money,
    pub governance: Money,
    pub legal: Money,
}

impl OrganizationalCosts {
    pub fn annual_total(&self) -> Money {
        self.training + self.change_management + self.governance + self.legal
    }

    pub fn checked_annual_total(&self) -> Option<Money> {
        checked_sum([
            self.training,
            self.change_management,
            self.governance,
            self.legal,
        ])
    }
}

// ---------------------------------------------------------------------------
// Benefit line items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReductionInputs {
    #[serde(default)]
    pub customer_service_reduction: Money,
    #[serde(default)]
    pub process_automation_value: Money,
    #[serde(default)]
    pub error_reduction_value: Money,
    pub confidence_pct: Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueInputs {
    #[serde(default)]
    pub new_revenue: Money,
    #[serde(default)]
    pub customer_retention: Money,
    pub confidence_pct: Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategicInputs {
    #[serde(default)]
    pub competitive_advantage: Money,
    #[serde(default)]
    pub innovation_value: Money,
    pub confidence_pct: Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedBenefits {
    pub productivity: ProductivityAssumptions,
    pub cost_reduction: CostReductionInputs,
    pub revenue: RevenueInputs,
    pub strategic: StrategicInputs,
}

impl DetailedBenefits {
    pub fn resolve(&self) -> BenefitAssumptions {
        BenefitAssumptions {
            productivity: self.productivity.clone(),
            cost_reduction: BenefitLine {
                items: vec![
                    BenefitItem::new(
                        "Customer service cost reduction",
                        self.cost_reduction.customer_service_reduction,
                    ),
                    BenefitItem::new(
                        "Process automation",
                        self.cost_reduction.process_automation_value,
                    ),
                    BenefitItem::new("Error reduction", self.cost_reduction.error_reduction_value),
                ],
                confidence_pct: self.cost_reduction.confidence_pct,
            },
            revenue: BenefitLine {
                items: vec![
                    BenefitItem::new("New revenue from AI features", self.revenue.new_revenue),
                    BenefitItem::new("Improved retention", self.revenue.customer_retention),
                ],
                confidence_pct: self.revenue.confidence_pct,
            },
            strategic: BenefitLine {
                items: vec![
                    BenefitItem::new("Competitive advantage", self.strategic.competitive_advantage),
                    BenefitItem::new("Innovation acceleration", self.strategic.innovation_value),
                ],
                confidence_pct: self.strategic.confidence_pct,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Detailed assumptions
// ---------------------------------------------------------------------------

/// Line-item inputs as collected on the dashboard forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedAssumptions {
    pub api: ApiUsage,
    pub infrastructure: MonthlyInfrastructure,
    pub development: StaffingCosts,
    pub data_management: StaffingCosts,
    pub operations: StaffingCosts,
    pub organizational: OrganizationalCosts,
    pub contingency_pct: Percent,
    pub benefits: DetailedBenefits,
}

impl DetailedAssumptions {
    pub fn resolve_costs(&self) -> CostAssumptions {
        CostAssumptions {
            api: CostLine::new(self.api.annual_total()),
            infrastructure: CostLine::new(self.infrastructure.annual_total()),
            development: CostLine::new(self.development.annual_total()),
            data_management: CostLine::new(self.data_management.annual_total()),
            operations: CostLine::new(self.operations.annual_total()),
            organizational: CostLine::new(self.organizational.annual_total()),
            contingency_pct: self.contingency_pct,
            usage_growth_pct: self.api.usage_growth_pct,
        }
    }

    /// Collapse line items into the flat records the engine consumes.
    ///
    /// Panics if a line-item product overflows; untrusted input goes
    /// through `resolve_checked`.
    pub fn resolve(&self) -> ProjectionAssumptions {
        ProjectionAssumptions {
            costs: self.resolve_costs(),
            benefits: self.benefits.resolve(),
        }
    }

    /// `resolve` with overflow-checked line-item arithmetic, followed by the
    /// engine's input bounds check.
    pub fn resolve_checked(&self) -> RoiResult<ProjectionAssumptions> {
        let line = |total: Option<Money>, field: &str| {
            total.map(CostLine::new).ok_or_else(|| overflow(field))
        };
        let costs = CostAssumptions {
            api: line(self.api.checked_annual_total(), "api")?,
            infrastructure: line(self.infrastructure.checked_annual_total(), "infrastructure")?,
            development: line(self.development.checked_annual_total(), "development")?,
            data_management: line(self.data_management.checked_annual_total(), "data_management")?,
            operations: line(self.operations.checked_annual_total(), "operations")?,
            organizational: line(self.organizational.checked_annual_total(), "organizational")?,
            contingency_pct: self.contingency_pct,
            usage_growth_pct: self.api.usage_growth_pct,
        };
        let assumptions = ProjectionAssumptions {
            costs,
            benefits: self.benefits.resolve(),
        };
        check_bounds(&assumptions)?;
        Ok(assumptions)
    }
}
