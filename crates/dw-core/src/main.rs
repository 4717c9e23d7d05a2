//! dw-core CLI entry point.
//!
//! Thin argument-parsing and JSON-printing shell over the library; all
//! semantics live in `dw_core`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dw_common::{Error, Result, SCHEMA_VERSION};
use dw_core::{common_horizon, BenefitCost, Decision, IrrOptions, PayoffTable, Worth};
use dw_math::{Convention, RateScale};

#[derive(Parser)]
#[command(name = "dw-core", version, about = "Engineering-economy decision analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate decision criteria over a payoff table
    Decide {
        /// Path to a delimited payoff table (last row = probabilities)
        #[arg(long)]
        payoff: PathBuf,

        /// Comma-separated criterion names; default is all five
        #[arg(long, value_delimiter = ',')]
        criteria: Option<Vec<String>>,

        /// Output format: json or table
        #[arg(long, default_value = "json", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Present, annual, and future worth of a cash-flow series
    Worth {
        #[command(flatten)]
        series: SeriesArgs,

        /// Discount rate, in the configured scale
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
    },

    /// Internal rate of return of a cash-flow series
    Irr {
        #[command(flatten)]
        series: SeriesArgs,

        /// Starting rate for the Newton iteration
        #[arg(long, allow_hyphen_values = true)]
        guess: Option<f64>,

        /// Iteration cap before reporting non-convergence
        #[arg(long, default_value_t = 10_000_000)]
        max_iter: u64,

        /// Present-worth magnitude treated as converged
        #[arg(long, default_value_t = 1e-5)]
        threshold: f64,

        /// Log each Newton step
        #[arg(long)]
        verbose: bool,

        /// Log a summary event on convergence
        #[arg(long)]
        summary: bool,
    },

    /// Benefit-cost ratio of two cash-flow streams
    Bcr {
        /// Comma-separated benefit flows (positive by convention)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        benefit: Vec<f64>,

        /// Comma-separated cost flows (positive by convention)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        cost: Vec<f64>,

        /// Shared discount rate for both streams
        #[arg(long)]
        rate: Option<f64>,

        /// Benefit-stream discount rate (requires --cost-rate)
        #[arg(long)]
        benefit_rate: Option<f64>,

        /// Cost-stream discount rate (requires --benefit-rate)
        #[arg(long)]
        cost_rate: Option<f64>,

        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Broadcast named cash-flow series onto a common horizon
    Horizon {
        /// Repeatable `name=v0,v1,...` series specification
        #[arg(long = "series", required = true)]
        series: Vec<String>,
    },
}

#[derive(Args)]
struct SeriesArgs {
    /// Comma-separated net cash flows; index 0 is period 0
    #[arg(long = "cash-flow", value_delimiter = ',', allow_hyphen_values = true, required = true)]
    cash_flow: Vec<f64>,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Args)]
struct TimingArgs {
    /// Cash-flow timing convention: end or mid
    #[arg(long, default_value = "end", value_parser = parse_convention)]
    convention: Convention,

    /// Interpret rates as whole percentages (10 = 10%)
    #[arg(long)]
    percent: bool,
}

impl TimingArgs {
    fn scale(&self) -> RateScale {
        if self.percent {
            RateScale::Percent
        } else {
            RateScale::Fractional
        }
    }
}

fn parse_convention(name: &str) -> std::result::Result<Convention, String> {
    Convention::from_name(name)
        .ok_or_else(|| format!("unknown convention '{name}' (expected 'end' or 'mid')"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Table,
}

fn parse_format(name: &str) -> std::result::Result<OutputFormat, String> {
    match name {
        "json" => Ok(OutputFormat::Json),
        "table" => Ok(OutputFormat::Table),
        _ => Err(format!("unknown format '{name}' (expected 'json' or 'table')")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.code() as u8)
        }
    }
}

fn run(command: Command) -> Result<()> {
    let output = match command {
        Command::Decide {
            payoff,
            criteria,
            format,
        } => {
            let table = PayoffTable::from_csv_path(payoff)?;
            let decision = match criteria {
                Some(names) => Decision::from_names(table, &names)?,
                None => Decision::new(table),
            };
            let results = decision.evaluate();
            if format == OutputFormat::Table {
                print!("{}", render_table(&results));
                return Ok(());
            }
            serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "criteria": results,
            })
        }

        Command::Worth { series, rate } => {
            let worth = Worth::new(series.cash_flow, series.timing.convention, series.timing.scale());
            serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "rate": rate,
                "present_worth": worth.present_worth(rate),
                "annual_worth": worth.annual_worth(rate),
                "future_worth": worth.future_worth(rate),
            })
        }

        Command::Irr {
            series,
            guess,
            max_iter,
            threshold,
            verbose,
            summary,
        } => {
            let worth = Worth::new(series.cash_flow, series.timing.convention, series.timing.scale());
            let solution = worth.irr(&IrrOptions {
                guess,
                max_iter,
                threshold,
                verbose,
                summary,
            })?;
            serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "irr": solution,
            })
        }

        Command::Bcr {
            benefit,
            cost,
            rate,
            benefit_rate,
            cost_rate,
            timing,
        } => {
            let analysis = BenefitCost::new(
                benefit,
                cost,
                rate,
                benefit_rate,
                cost_rate,
                timing.convention,
                timing.scale(),
            )?;
            serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "benefit_present_worth": analysis.benefit_present_worth(),
                "cost_present_worth": analysis.cost_present_worth(),
                "ratio": analysis.ratio(),
            })
        }

        Command::Horizon { series } => {
            let named = series
                .iter()
                .map(|spec| parse_series_spec(spec))
                .collect::<Result<BTreeMap<_, _>>>()?;
            serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "series": common_horizon(&named)?,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output).expect("output is valid JSON"));
    Ok(())
}

/// Plain-text rendering of a criterion results map.
fn render_table(results: &BTreeMap<dw_core::Criterion, dw_core::Choice>) -> String {
    let alt_width = results
        .values()
        .map(|choice| choice.alternative.to_string().len())
        .chain(["alternative".len()])
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<9} {:<alt_width$} {:>12}\n", "criterion", "alternative", "value");
    for (criterion, choice) in results {
        out.push_str(&format!(
            "{:<9} {:<alt_width$} {:>12.4}\n",
            criterion.to_string(),
            choice.alternative.to_string(),
            choice.value
        ));
    }
    out
}

/// Parse one `name=v0,v1,...` horizon series specification.
fn parse_series_spec(spec: &str) -> Result<(String, Vec<f64>)> {
    let Some((name, values)) = spec.split_once('=') else {
        return Err(Error::Ingestion(format!(
            "series spec '{spec}' is not of the form name=v0,v1,..."
        )));
    };
    let flows = values
        .split(',')
        .map(|v| {
            v.trim().parse::<f64>().map_err(|_| {
                Error::Ingestion(format!("series '{name}' has a non-numeric amount '{v}'"))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok((name.to_string(), flows))
}
