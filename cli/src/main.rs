//! # lasr-cli
//!
//! Runs the bundled LASR programs locally against a ComputeInputs JSON file
//! and prints the resulting Outputs.
//!
//! ## Commands
//!
//! - `lasr run --input-json <file>` - Execute one call
//! - `lasr methods` - List the methods a program registers
//! - `lasr amount <decimal>` - Convert a verse amount to base units
//!
//! See `lasr --help` for the full command reference.

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use lasr_contracts::ProgramKind;
use std::path::PathBuf;
use std::process;

mod commands;
mod config;
mod telemetry;

use config::LasrConfig;

#[derive(Parser)]
#[command(name = "lasr")]
#[command(about = "LASR CLI - Run token programs and inspect their instructions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to lasr.toml configuration file
    #[arg(short, long, global = true, default_value = "lasr.toml")]
    config: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one call and print its Outputs
    Run {
        /// ComputeInputs JSON file ("-" reads stdin)
        #[arg(short, long)]
        input_json: PathBuf,

        /// Program to run (overrides config)
        #[arg(short, long)]
        program: Option<ProgramKind>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List the methods a program registers
    Methods {
        /// Program to inspect (overrides config)
        #[arg(short, long)]
        program: Option<ProgramKind>,
    },

    /// Convert a verse decimal amount to base units
    Amount {
        /// Decimal amount, e.g. 1.5
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = LasrConfig::load_optional(&cli.config)?.unwrap_or_default();
    telemetry::init(
        telemetry::LogOptions::default()
            .with_json_logs(cli.json_logs || config.log.json)
            .with_verbose(cli.verbose),
    )?;
    tracing::debug!(config = %cli.config, kind = %config.program.kind, "Resolved configuration");

    match command {
        Commands::Run {
            input_json,
            program,
            compact,
        } => commands::run::run(
            &input_json,
            config.program_kind(program),
            config.pretty_output(compact),
        ),
        Commands::Methods { program } => commands::methods::list(config.program_kind(program)),
        Commands::Amount { value } => commands::amount::convert(&value),
    }
}
