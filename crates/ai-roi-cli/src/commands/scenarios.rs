use clap::{Args, Subcommand};
use serde_json::{json, Value};
use std::path::Path;

use ai_roi_core::estimate::{DetailedAssumptions, OrgProfile};
use ai_roi_core::projection::engine::ProjectionAssumptions;
use ai_roi_core::scenarios::{self, SavedScenario, ScenarioLibrary};

use crate::input;

/// Arguments for the scenario library commands
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to the scenario library file (created on first save)
    #[arg(long, global = true, default_value = "scenarios.json")]
    pub library: String,

    #[command(subcommand)]
    pub action: ScenarioAction,
}

#[derive(Subcommand)]
pub enum ScenarioAction {
    /// Project assumptions and store them under a name (overwrites)
    Save {
        /// Scenario name
        #[arg(long)]
        name: String,
        /// Path to JSON/YAML assumptions file
        #[arg(long)]
        input: Option<String>,
        /// Input holds line-item assumptions
        #[arg(long)]
        detailed: bool,
        /// Path to JSON/YAML organisation profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// Remove a scenario
    Delete {
        #[arg(long)]
        name: String,
    },
    /// List saved scenarios with their headline figures
    List,
    /// Export one scenario, or the whole library when no name is given
    Export {
        #[arg(long)]
        name: Option<String>,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Import a scenario document or a whole library file
    Import {
        /// Path to the exported document
        #[arg(long)]
        file: String,
        /// Store a single imported scenario under a new name.
        /// Not allowed with a whole-library file.
        #[arg(long)]
        rename: Option<String>,
        /// Replace scenarios that already exist
        #[arg(long)]
        overwrite: bool,
    },
}

/// Arguments for scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to the scenario library file
    #[arg(long, default_value = "scenarios.json")]
    pub library: String,

    /// Compare only these scenarios, in this order (default: all)
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,
}

fn open_library(path: &str) -> Result<ScenarioLibrary, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        log::info!("library '{path}' not found, starting empty");
        return Ok(ScenarioLibrary::new());
    }
    let text = input::file::read_text(path)?;
    Ok(ScenarioLibrary::from_json(&text)?)
}

fn store_library(path: &str, library: &ScenarioLibrary) -> Result<(), Box<dyn std::error::Error>> {
    input::file::write_text(path, &library.export_json()?)
}

fn summary(scenario: &SavedScenario) -> Value {
    let p = &scenario.projection;
    json!({
        "name": scenario.name,
        "org_name": scenario.profile.org_name,
        "saved_at": scenario.saved_at.to_rfc3339(),
        "three_year_tco": p.cost_totals.three_year_total.to_string(),
        "three_year_benefits": p.benefit_totals.three_year_total.to_string(),
        "roi_percentage": p.roi_percentage.round_dp(1).to_string(),
        "payback_months": p.payback_months.to_string(),
    })
}

fn is_library_document(doc: &Value) -> bool {
    doc.get("scenarios").is_some()
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = args.library.as_str();
    match args.action {
        ScenarioAction::Save {
            name,
            input: input_path,
            detailed,
            profile,
        } => {
            let assumptions: ProjectionAssumptions = if detailed {
                let d: DetailedAssumptions =
                    input::read_input(input_path.as_deref(), "scenario save")?;
                d.resolve_checked()?
            } else {
                input::read_input(input_path.as_deref(), "scenario save")?
            };
            let profile: OrgProfile = match profile {
                Some(p) => input::file::read_document(&p)?,
                None => OrgProfile::default(),
            };

            let mut library = open_library(path)?;
            let scenario = SavedScenario::capture(name, profile, assumptions)?;
            let row = summary(&scenario);
            let replaced = library.save(scenario);
            store_library(path, &library)?;
            Ok(json!({ "saved": row, "replaced": replaced }))
        }
        ScenarioAction::Delete { name } => {
            let mut library = open_library(path)?;
            let removed = library.delete(&name)?;
            store_library(path, &library)?;
            Ok(json!({ "deleted": removed.name, "remaining": library.len() }))
        }
        ScenarioAction::List => {
            let library = open_library(path)?;
            Ok(Value::Array(library.scenarios.iter().map(summary).collect()))
        }
        ScenarioAction::Export { name, out } => {
            let library = open_library(path)?;
            let text = match name.as_deref() {
                Some(n) => library.export_scenario_json(n)?,
                None => library.export_json()?,
            };
            match out {
                Some(out) => {
                    input::file::write_text(&out, &text)?;
                    Ok(json!({ "exported": name, "file": out }))
                }
                None => Ok(serde_json::from_str(&text)?),
            }
        }
        ScenarioAction::Import {
            file,
            rename,
            overwrite,
        } => {
            let text = input::file::read_text(&file)?;
            let mut library = open_library(path)?;
            let doc: Value = serde_json::from_str(&text)?;
            let imported: Vec<String> = if is_library_document(&doc) {
                if rename.is_some() {
                    return Err(
                        "--rename applies to a single scenario document, not a whole library"
                            .into(),
                    );
                }
                let incoming = ScenarioLibrary::from_json(&text)?;
                library.import_json(&text, overwrite)?;
                incoming.scenarios.into_iter().map(|s| s.name).collect()
            } else {
                let scenario =
                    library.import_scenario_json(&text, rename.as_deref(), overwrite)?;
                vec![scenario.name.clone()]
            };
            store_library(path, &library)?;
            Ok(json!({ "imported": imported, "total": library.len() }))
        }
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let library = open_library(&args.library)?;
    let selected: Vec<SavedScenario> = if args.names.is_empty() {
        library.scenarios.clone()
    } else {
        args.names
            .iter()
            .map(|n| library.load(n).cloned())
            .collect::<Result<_, _>>()?
    };
    let result = scenarios::compare_scenarios(&selected)?;
    Ok(serde_json::to_value(result)?)
}
