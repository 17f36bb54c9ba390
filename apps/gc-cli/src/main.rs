use clap::{Parser, Subcommand, ValueEnum};
use gc_cycle::Cycle;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod error;
mod report;
mod scenario;

use error::CliResult;
use report::Report;
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(about = "GasCycle CLI - Ideal-gas thermodynamic cycle editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a cycle from a scenario file and print the result
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the default single-point cycle
    Init {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Yaml,
}

fn main() -> CliResult<()> {
    // RUST_LOG=gc_cycle=debug shows propagation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario_path,
            format,
        } => cmd_run(&scenario_path, format),
        Commands::Init { format } => print_cycle(&Cycle::initialize(), format),
    }
}

fn cmd_run(scenario_path: &Path, format: Format) -> CliResult<()> {
    let scenario = Scenario::load(scenario_path)?;
    tracing::info!(
        path = %scenario_path.display(),
        steps = scenario.steps.len(),
        commands = scenario.commands.len(),
        "loaded scenario"
    );
    let cycle = scenario.run()?;
    print_cycle(&cycle, format)
}

fn print_cycle(cycle: &Cycle, format: Format) -> CliResult<()> {
    let report = Report::new(cycle);
    match format {
        Format::Table => print!("{}", report.to_table()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }
    Ok(())
}
