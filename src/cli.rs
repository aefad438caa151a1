//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_advisors, validate_simulation_config};
use crate::domain::simulation::{run_simulation, SimulationConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockadvisor", about = "Advisor strategy portfolio simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured advisor over the historical dataset
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Results CSV path (default: simulation_results.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Price data CSV, overriding the config's [data] csv_path
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Run a single advisor instead of the configured list
        #[arg(long)]
        advisor: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for ticker(s) in a dataset
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            output,
            data,
            advisor,
            dry_run,
        } => run_simulate(
            &config,
            output.as_ref(),
            data.as_ref(),
            advisor.as_deref(),
            dry_run,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data, ticker } => run_info(&data, ticker.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// --data beats the config's `[data] csv_path`, which beats `data.csv`.
pub fn resolve_data_path(data_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(path) = data_override {
        return path.clone();
    }
    config
        .get_string("data", "csv_path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data.csv"))
}

fn run_simulate(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
    advisor_override: Option<&str>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut sim_config: SimulationConfig = match validate_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(advisor) = advisor_override {
        sim_config.advisors = match parse_advisors(advisor) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
    }

    if dry_run {
        eprintln!("Config validated successfully");
        eprintln!("  range:    {} to {}", sim_config.start_date, sim_config.end_date);
        eprintln!("  value:    {:.2}", sim_config.initial_value);
        eprintln!("  tickers:  {}", sim_config.tickers.join(", "));
        eprintln!("  advisors: {}", sim_config.advisors.join(", "));
        eprintln!("\nDry run complete: configuration is valid");
        return ExitCode::SUCCESS;
    }

    // Stage 2: Load price data
    let data_path = resolve_data_path(data_override, &adapter);
    eprintln!("Loading price data from {}", data_path.display());
    let store = match CsvPriceAdapter::from_file(&data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Run every advisor
    eprintln!(
        "Running {} advisors, {} to {}",
        sim_config.advisors.len(),
        sim_config.start_date,
        sim_config.end_date,
    );
    let outcome = match run_simulation(&store, &sim_config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Console summary
    eprintln!("\n=== Final Values ===");
    for run in &outcome.runs {
        if let Some(value) = run.final_value() {
            eprintln!("  {}:  {:.2}", run.advisor, value);
        }
    }
    for failure in &outcome.failures {
        eprintln!("  {}:  failed ({})", failure.advisor, failure.error);
    }

    if outcome.runs.is_empty() {
        eprintln!("error: every advisor run failed");
        return match outcome.failures.first() {
            Some(failure) => (&failure.error).into(),
            None => ExitCode::from(5),
        };
    }

    // Stage 5: Export results
    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("simulation_results.csv"));

    match CsvReportAdapter::new().write(&outcome.runs, &output.to_string_lossy()) {
        Ok(()) => {
            eprintln!("\nResults written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_simulation_config(&adapter) {
        Ok(config) => {
            eprintln!("\nSimulation:");
            eprintln!("  range:    {} to {}", config.start_date, config.end_date);
            eprintln!("  value:    {:.2}", config.initial_value);
            eprintln!("  tickers:  {}", config.tickers.join(", "));
            eprintln!("  advisors: {}", config.advisors.join(", "));
            eprintln!("\nAllocations:");
            for (name, pct) in &config.allocations {
                eprintln!("  {}: {:.1}%", name, pct);
            }
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(data_path: &PathBuf, ticker: Option<&str>) -> ExitCode {
    let store = match CsvPriceAdapter::from_file(data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match ticker {
        Some(t) => vec![t.to_uppercase()],
        None => store.tickers(),
    };

    if tickers.is_empty() {
        eprintln!("No tickers found in {}", data_path.display());
        return ExitCode::from(3);
    }

    for t in &tickers {
        match store.data_range(t) {
            Some((min_date, max_date, count)) => {
                println!("{}: {} bars, {} to {}", t, count, min_date, max_date);
            }
            None => {
                eprintln!("{}: no data found", t);
            }
        }
    }
    ExitCode::SUCCESS
}
