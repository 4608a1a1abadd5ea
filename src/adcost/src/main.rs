//! adcost — generate a synthetic TV advertising dataset, report on it and
//! export filtered views.

mod render;

use adcost_core::config::AppConfig;
use adcost_core::Dimension;
use adcost_generator::{CostSummary, DataGenerator};
use adcost_reporting::{DashboardRequest, DashboardSnapshot, Dataset, FilterField, FilterSpec};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adcost")]
#[command(about = "Sponsored TV advertising cost analytics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a synthetic dataset and write it to a CSV file
    Generate {
        /// Number of records (overrides config)
        #[arg(short = 'n', long, env = "ADCOST__GENERATOR__RECORDS")]
        records: Option<usize>,

        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Filter the dataset and print every dashboard view
    Report {
        /// Dataset file path (overrides config)
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Pivot row dimension
        #[arg(long, default_value = "channel")]
        rows: Dimension,

        /// Pivot column dimension
        #[arg(long, default_value = "time_slot")]
        columns: Dimension,

        /// RNG seed for the scatter sample
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the filtered rows to the export file, replacing it
    Export {
        /// Dataset file path (overrides config)
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Export file path (overrides config)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Filter selection. Unset options fall back to the full span or every
/// value present; an explicitly empty list selects nothing.
#[derive(Args, Debug)]
struct FilterArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Comma-separated channels
    #[arg(long)]
    channels: Option<String>,

    /// Comma-separated time slots
    #[arg(long)]
    time_slots: Option<String>,

    /// Comma-separated program types
    #[arg(long)]
    program_types: Option<String>,

    /// Comma-separated advertiser types
    #[arg(long)]
    advertiser_types: Option<String>,
}

impl FilterArgs {
    fn to_spec(&self, dataset: &Dataset) -> FilterSpec {
        let mut spec = FilterSpec::default();

        if self.from.is_some() || self.to.is_some() {
            if let Some((first, last)) = dataset.date_span() {
                spec = spec.with_date_range(self.from.unwrap_or(first), self.to.unwrap_or(last));
            }
        }

        let selections = [
            (FilterField::Channel, &self.channels),
            (FilterField::TimeSlot, &self.time_slots),
            (FilterField::ProgramType, &self.program_types),
            (FilterField::AdvertiserType, &self.advertiser_types),
        ];
        for (field, raw) in selections {
            if let Some(raw) = raw {
                spec = spec.with_values(field, parse_set(raw));
            }
        }
        spec
    }
}

fn parse_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.clone().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = AppConfig::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    init_tracing(&config);
    if let Err(e) = loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    match cli.command {
        Commands::Generate {
            records,
            seed,
            output,
        } => cmd_generate(&config, records, seed, output),
        Commands::Report {
            input,
            filter,
            rows,
            columns,
            seed,
            format,
        } => cmd_report(&config, input, &filter, rows, columns, seed, format),
        Commands::Export {
            input,
            filter,
            output,
        } => cmd_export(&config, input, &filter, output),
    }
}

fn cmd_generate(
    config: &AppConfig,
    records: Option<usize>,
    seed: Option<u64>,
    output: Option<String>,
) -> anyhow::Result<()> {
    let count = records.unwrap_or(config.generator.records);
    let path = output.unwrap_or_else(|| config.data.dataset_path.clone());
    let mut rng = rng_from(seed.or(config.generator.seed));

    info!(records = count, path = %path, "Generating advertising dataset");
    let generator = DataGenerator::from_config(&config.generator)
        .context("invalid generator configuration")?;
    let dataset = Dataset::new(generator.generate(&mut rng, count)?);
    dataset
        .save(&path)
        .with_context(|| format!("writing dataset to {path}"))?;

    println!("Saved {} records to {path}", dataset.len());
    render::print_preview(dataset.head(5));
    render::print_cost_summary(&CostSummary::from_records(dataset.records()));
    Ok(())
}

fn cmd_report(
    config: &AppConfig,
    input: Option<String>,
    filter: &FilterArgs,
    rows: Dimension,
    columns: Dimension,
    seed: Option<u64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let path = input.unwrap_or_else(|| config.data.dataset_path.clone());
    let base = Dataset::load(&path).with_context(|| format!("loading dataset from {path}"))?;

    let request = DashboardRequest::from_config(&config.dashboard, filter.to_spec(&base))
        .with_pivot(rows, columns);
    let mut rng = rng_from(seed);
    let snapshot = DashboardSnapshot::build(&base, &request, &mut rng);

    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => render::print_snapshot(&snapshot),
    }
    Ok(())
}

fn cmd_export(
    config: &AppConfig,
    input: Option<String>,
    filter: &FilterArgs,
    output: Option<String>,
) -> anyhow::Result<()> {
    let path = input.unwrap_or_else(|| config.data.dataset_path.clone());
    let export_path = output.unwrap_or_else(|| config.data.export_path.clone());

    let base = Dataset::load(&path).with_context(|| format!("loading dataset from {path}"))?;
    let view = filter.to_spec(&base).apply(&base);
    view.save(&export_path)
        .with_context(|| format!("exporting filtered rows to {export_path}"))?;

    println!("Exported {} of {} records to {export_path}", view.len(), base.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set() {
        assert!(parse_set("").is_empty());
        let set = parse_set("НТВ, СТС,,");
        assert_eq!(set.len(), 2);
        assert!(set.contains("СТС"));
    }

    #[test]
    fn test_explicit_empty_selection() {
        let cli = Cli::parse_from(["adcost", "export", "--channels", ""]);
        let Commands::Export { filter, .. } = cli.command else {
            panic!("expected export");
        };
        let spec = filter.to_spec(&Dataset::default());
        assert_eq!(spec.channels, Some(BTreeSet::new()));
        assert!(spec.time_slots.is_none());
    }

    #[test]
    fn test_report_args() {
        let cli = Cli::parse_from([
            "adcost",
            "report",
            "--rows",
            "advertiser_type",
            "--columns",
            "program-type",
            "--from",
            "2023-02-01",
            "--format",
            "json",
        ]);
        let Commands::Report {
            rows,
            columns,
            filter,
            format,
            ..
        } = cli.command
        else {
            panic!("expected report");
        };
        assert_eq!(rows, Dimension::AdvertiserType);
        assert_eq!(columns, Dimension::ProgramType);
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2023, 2, 1));
        assert!(matches!(format, OutputFormat::Json));
    }
}
