//! Saved scenarios: persistence and side-by-side comparison.

pub mod comparison;
pub mod library;

pub use comparison::{compare_scenarios, ComparisonOutput, WinnerAnalysis};
pub use library::{SavedScenario, ScenarioDocument, ScenarioLibrary, SCENARIO_FORMAT_VERSION};
