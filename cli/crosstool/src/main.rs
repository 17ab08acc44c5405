//! crosstool CLI: migrate legacy toolchain descriptor fields into features.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use crosstool_model::DocumentFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crosstool", version, about = "Toolchain descriptor migration")]
struct Cli {
    /// Log every synthesized feature (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite legacy fields as features and write the result
    Migrate {
        /// Input document to be migrated
        #[arg(long, required = true)]
        input: PathBuf,
        /// Output path where the migrated document is written
        #[arg(long, required = true)]
        output: PathBuf,
        /// Interchange format (toml, json); default follows the file extension
        #[arg(long)]
        format: Option<String>,
    },
    /// Report what a migration would change without writing anything
    Check {
        /// Input document to inspect
        #[arg(long, required = true)]
        input: PathBuf,
        /// Interchange format (toml, json); default follows the file extension
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli.command);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Migrate {
            input,
            output,
            format,
        } => {
            let format = parse_format(format.as_deref())?;
            commands::migrate::run(&input, &output, format)
        }
        Commands::Check { input, format } => {
            let format = parse_format(format.as_deref())?;
            commands::check::run(&input, format)
        }
    }
}

fn parse_format(format: Option<&str>) -> anyhow::Result<Option<DocumentFormat>> {
    Ok(format.map(str::parse::<DocumentFormat>).transpose()?)
}
