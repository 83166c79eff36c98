use napi::Result as NapiResult;
use napi_derive::napi;

use ai_roi_core::estimate::DetailedAssumptions;
use ai_roi_core::projection::engine::{self, ProjectionAssumptions};
use ai_roi_core::projection::sensitivity::{analyze_sensitivity, SensitivityInput};
use ai_roi_core::scenarios::{self, SavedScenario};
use ai_roi_core::validation;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_roi(input_json: String) -> NapiResult<String> {
    let input: ProjectionAssumptions =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine::project_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_detailed(input_json: String) -> NapiResult<String> {
    let input: DetailedAssumptions = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine::project_detailed(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sensitivity(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analyze_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Flat assumptions by default; pass `detailed = true` for line-item input.
#[napi]
pub fn validate(input_json: String, detailed: Option<bool>) -> NapiResult<String> {
    let output = if detailed.unwrap_or(false) {
        let input: DetailedAssumptions =
            serde_json::from_str(&input_json).map_err(to_napi_error)?;
        validation::run_detailed_validation(&input).map_err(to_napi_error)?
    } else {
        let input: ProjectionAssumptions =
            serde_json::from_str(&input_json).map_err(to_napi_error)?;
        validation::run_validation(&input).map_err(to_napi_error)?
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Takes a JSON array of saved scenarios.
#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: Vec<SavedScenario> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenarios::compare_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
