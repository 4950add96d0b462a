mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::growth::GrowthArgs;
use commands::schedule::ScheduleArgs;
use commands::solve::SolveArgs;

/// Loan and amortization calculations
#[derive(Parser)]
#[command(
    name = "lcalc",
    version,
    about = "Loan and amortization calculations with decimal precision",
    long_about = "A CLI for fixed-installment loan math with decimal precision. \
                  Solves 3-of-4 annuity and compound-growth queries and generates \
                  full Price/SAC amortization schedules with due dates and totals."
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
    /// Solve the missing loan field (supply exactly 3 of 4)
    Solve(SolveArgs),
    /// Solve the missing compound-growth field (supply exactly 3 of 4)
    Growth(GrowthArgs),
    /// Generate a full amortization schedule (Price or SAC)
    Schedule(ScheduleArgs),
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
        Commands::Solve(args) => commands::solve::run_solve(args),
        Commands::Growth(args) => commands::growth::run_growth(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("lcalc {}", env!("CARGO_PKG_VERSION"));
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
