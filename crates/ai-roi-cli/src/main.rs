mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::projection::{DetailedArgs, ProjectArgs, SensitivityArgs, ValidateArgs};
use commands::scenarios::{CompareArgs, ScenarioArgs};

/// Three-year cost and ROI projections for AI adoption
#[derive(Parser)]
#[command(
    name = "airoi",
    version,
    about = "Three-year cost and ROI projections for AI adoption",
    long_about = "A CLI for projecting total cost of ownership, benefits, payback and ROI \
                  of adopting a hosted AI model service, with decimal precision. Supports \
                  flat and line-item assumptions, validation, benefit sensitivity, and a \
                  saved-scenario library with side-by-side comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Project costs, benefits, payback and ROI from flat assumptions
    Project(ProjectArgs),
    /// Resolve line-item assumptions, then project them
    Detailed(DetailedArgs),
    /// Scale projected benefits and re-derive ROI with costs held fixed
    Sensitivity(SensitivityArgs),
    /// Check assumptions and the resulting projection for implausible values
    Validate(ValidateArgs),
    /// Compare saved scenarios side by side
    Compare(CompareArgs),
    /// Manage the saved-scenario library
    Scenario(ScenarioArgs),
    /// Project the built-in demo organisation
    Demo,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Detailed(args) => commands::projection::run_detailed(args),
        Commands::Sensitivity(args) => commands::projection::run_sensitivity(args),
        Commands::Validate(args) => commands::projection::run_validate(args),
        Commands::Compare(args) => commands::scenarios::run_compare(args),
        Commands::Scenario(args) => commands::scenarios::run_scenario(args),
        Commands::Demo => commands::projection::run_demo(),
        Commands::Version => {
            println!("airoi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
