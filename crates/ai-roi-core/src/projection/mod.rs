//! The projection engine: cost accumulation, benefit accumulation, payback
//! and ROI aggregation, all pure functions over plain records.

pub mod benefits;
pub mod costs;
pub mod engine;
pub mod growth;
pub mod payback;
pub mod roi;
pub mod sensitivity;

pub use benefits::{accumulate_benefits, project_benefits, BenefitAssumptions, BenefitCategory};
pub use costs::{accumulate_costs, project_costs, CostAssumptions, CostCategory};
pub use engine::{project, project_detailed, project_roi, ProjectionAssumptions, ProjectionReport};
pub use payback::{compute_payback_months, Payback, PaybackRating};
pub use roi::{aggregate, net_benefit, roi_percentage, ProjectionResult};
