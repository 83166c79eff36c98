use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ai_roi_core::estimate::DetailedAssumptions;
use ai_roi_core::presets;
use ai_roi_core::projection::engine::{self, ProjectionAssumptions};
use ai_roi_core::projection::sensitivity::{self, SensitivityCase, SensitivityInput};
use ai_roi_core::validation;

use crate::input;

/// Arguments for a projection from flat assumptions
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON/YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a projection from line-item assumptions
#[derive(Args)]
pub struct DetailedArgs {
    /// Path to JSON/YAML line-item assumptions file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for benefit sensitivity analysis
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON/YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,

    /// Input holds line-item assumptions
    #[arg(long)]
    pub detailed: bool,

    /// Comma-separated benefit multipliers (e.g. "0.5,1.0,1.5").
    /// Defaults to 0.7, 1.0 and 1.3.
    #[arg(long)]
    pub multipliers: Option<String>,
}

/// Arguments for assumption validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON/YAML assumptions file
    #[arg(long)]
    pub input: Option<String>,

    /// Input holds line-item assumptions
    #[arg(long)]
    pub detailed: bool,
}

fn read_assumptions(
    path: Option<&str>,
    detailed: bool,
    what: &str,
) -> Result<ProjectionAssumptions, Box<dyn std::error::Error>> {
    if detailed {
        let d: DetailedAssumptions = input::read_input(path, what)?;
        Ok(d.resolve_checked()?)
    } else {
        input::read_input(path, what)
    }
}

fn parse_multipliers(spec: &str) -> Result<Vec<SensitivityCase>, Box<dyn std::error::Error>> {
    let mut cases = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let multiplier: Decimal = part
            .parse()
            .map_err(|e| format!("Invalid multiplier '{}': {}", part, e))?;
        cases.push(SensitivityCase::new(format!("{multiplier}x benefits"), multiplier));
    }
    if cases.is_empty() {
        return Err("--multipliers must list at least one value".into());
    }
    Ok(cases)
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions: ProjectionAssumptions =
        input::read_input(args.input.as_deref(), "projection")?;
    let result = engine::project_roi(&assumptions)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_detailed(args: DetailedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let detailed: DetailedAssumptions =
        input::read_input(args.input.as_deref(), "detailed projection")?;
    let result = engine::project_detailed(&detailed)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assumptions = read_assumptions(args.input.as_deref(), args.detailed, "sensitivity analysis")?;
    let cases = match args.multipliers.as_deref() {
        Some(spec) => parse_multipliers(spec)?,
        None => sensitivity::standard_cases(),
    };
    let result = sensitivity::analyze_sensitivity(&SensitivityInput { assumptions, cases })?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = if args.detailed {
        let detailed: DetailedAssumptions =
            input::read_input(args.input.as_deref(), "validation")?;
        validation::run_detailed_validation(&detailed)?
    } else {
        let assumptions: ProjectionAssumptions =
            input::read_input(args.input.as_deref(), "validation")?;
        validation::run_validation(&assumptions)?
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_demo() -> Result<Value, Box<dyn std::error::Error>> {
    let profile = presets::demo_profile();
    log::info!("projecting demo organisation '{}'", profile.org_name);
    let result = engine::project_detailed(&presets::demo_assumptions())?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_multipliers() {
        let cases = parse_multipliers("0.5, 1.0,1.5").unwrap();
        let values: Vec<Decimal> = cases.iter().map(|c| c.benefit_multiplier).collect();
        assert_eq!(values, vec![dec!(0.5), dec!(1.0), dec!(1.5)]);
        assert_eq!(cases[0].name, "0.5x benefits");
    }

    #[test]
    fn test_parse_multipliers_rejects_garbage() {
        assert!(parse_multipliers("abc").is_err());
        assert!(parse_multipliers(" , ").is_err());
    }
}
