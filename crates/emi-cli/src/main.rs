mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::loan::LoanArgs;
use config::Settings;

/// Loan EMI calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and amortization schedule calculator",
    long_about = "Computes the equated monthly installment (EMI) for a loan from its \
                  principal, annual interest rate and tenure, together with loan totals, \
                  the principal/interest split and the leading amortization rows."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./emi.yaml when present)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate EMI, loan totals, breakdown and amortization rows
    Calculate(LoanArgs),
    /// Print only the amortization schedule rows
    Schedule(LoanArgs),
    /// Print formatted headline figures
    Summary(LoanArgs),
    /// Print the calculator's default loan parameters
    Defaults,
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    debug!(?settings, "loaded settings");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args, &settings),
        Commands::Schedule(args) => commands::loan::run_schedule(args, &settings),
        Commands::Summary(args) => commands::loan::run_summary(args, &settings),
        Commands::Defaults => commands::loan::run_defaults(&settings),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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
