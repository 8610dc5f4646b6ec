mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::revolver::{AnalyzeArgs, ScenariosArgs, SweepArgs};

/// Revolving credit facility modeling
#[derive(Parser)]
#[command(
    name = "rcf",
    version,
    about = "Revolving credit facility modeling with decimal precision",
    long_about = "Models a revolving credit facility over a per-period cash forecast: \
                  liquidity sweep with draws and repayments, rate-shock cost scenarios, \
                  debt-service coverage, a fixed-rate hedge overlay, and covenant checks. \
                  All arithmetic is exact decimal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the liquidity sweep and print the draw/repay/balance trajectory
    Sweep(SweepArgs),
    /// Price the sweep under base and shocked rates
    Scenarios(ScenariosArgs),
    /// Full analysis: sweep, scenarios, coverage, hedge, covenants
    Analyze(AnalyzeArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sweep(args) => commands::revolver::run_sweep(args),
        Commands::Scenarios(args) => commands::revolver::run_scenarios(args),
        Commands::Analyze(args) => commands::revolver::run_analyze(args),
        Commands::Version => {
            println!("rcf {}", env!("CARGO_PKG_VERSION"));
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
