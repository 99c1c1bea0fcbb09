//! tablecheck CLI - transform restaurant orders and load them into a warehouse
//!
//! Usage:
//!   tablecheck transform [--source <file.csv>] [--output-dir <dir>]
//!   tablecheck load [--warehouse <name> | --sqlite <file.db>]
//!   tablecheck run [--source <file.csv>] [--warehouse <name>]
//!   tablecheck schema [--dialect <dialect>] [--dataset <name>]
//!
//! Examples:
//!   tablecheck transform --source data/data.csv --output-dir tmp
//!   tablecheck load --warehouse default
//!   tablecheck run --sqlite tmp/warehouse.db
//!   tablecheck schema --dialect bigquery --dataset tablecheck_data

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tablecheck::config::{Settings, WarehouseConfig};
use tablecheck::pipeline::{self, PipelineOptions, TransformOutput};
use tablecheck::sql::Dialect;
use tablecheck::warehouse::{LoadReport, TableOutcome};
use tablecheck::TableName;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tablecheck")]
#[command(about = "tablecheck - Restaurant order analytics: CSV to aggregate tables to warehouse")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $TABLECHECK_CONFIG, ./tablecheck.toml, ~/.config/tablecheck/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the source file, derive the analytical tables, export them as CSV
    Transform {
        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Load exported CSVs into a warehouse
    Load {
        /// Directory holding the exported CSVs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Transform, then load
    Run {
        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print CREATE TABLE statements for the six tables
    Schema {
        /// SQL dialect to generate
        #[arg(short, long, default_value = "bigquery")]
        dialect: DialectArg,

        /// Qualify table names with this dataset (schema)
        #[arg(long)]
        dataset: Option<String>,
    },
}

#[derive(Args)]
struct TransformArgs {
    /// Raw order CSV
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Directory to write the table CSVs to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Dishes kept per restaurant in the dish rankings
    #[arg(long)]
    dish_rank_cutoff: Option<u32>,
}

#[derive(Args)]
struct TargetArgs {
    /// Named warehouse from the config file
    #[arg(short, long, conflicts_with = "sqlite")]
    warehouse: Option<String>,

    /// Load into this SQLite file instead of a configured warehouse
    #[arg(long)]
    sqlite: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Bigquery,
    Duckdb,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Bigquery => Dialect::BigQuery,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Schema { dialect, dataset } = &cli.command {
        return cmd_schema((*dialect).into(), dataset.as_deref());
    }

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Transform { transform } => cmd_transform(&settings, &transform),
        Commands::Load { output_dir, target } => cmd_load(&settings, output_dir, &target).await,
        Commands::Run { transform, target } => cmd_run(&settings, &transform, &target).await,
        Commands::Schema { .. } => ExitCode::SUCCESS,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, tablecheck::config::SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn pipeline_options(settings: &Settings, args: &TransformArgs) -> Result<PipelineOptions, String> {
    let mut options = PipelineOptions::from_settings(settings).map_err(|e| e.to_string())?;
    if let Some(source) = &args.source {
        options = options.with_source(source);
    }
    if let Some(dir) = &args.output_dir {
        options = options.with_output_dir(dir);
    }
    if let Some(cutoff) = args.dish_rank_cutoff {
        options.transform = options.transform.with_dish_rank_cutoff(cutoff);
    }
    Ok(options)
}

/// Flags first, then the config file, then the environment.
fn resolve_target(settings: &Settings, args: &TargetArgs) -> Result<WarehouseConfig, String> {
    if let Some(path) = &args.sqlite {
        return Ok(WarehouseConfig::sqlite(path));
    }
    if let Some(name) = &args.warehouse {
        return settings
            .get_warehouse(name)
            .and_then(|w| w.resolve())
            .map_err(|e| e.to_string());
    }
    if let Some((_, warehouse)) = settings.default_warehouse() {
        return warehouse.resolve().map_err(|e| e.to_string());
    }
    WarehouseConfig::from_env().map_err(|e| e.to_string())
}

fn cmd_transform(settings: &Settings, args: &TransformArgs) -> ExitCode {
    let options = match pipeline_options(settings, args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline::transform(&options) {
        Ok(output) => {
            print_transform(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Transformation failed");
            eprintln!("Transformation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_load(settings: &Settings, output_dir: Option<PathBuf>, args: &TargetArgs) -> ExitCode {
    let target = match resolve_target(settings, args) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error resolving warehouse: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let dir = match output_dir {
        Some(dir) => dir,
        None => match settings.output_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match pipeline::load(&target, &dir).await {
        Ok(report) => finish_load(&report),
        Err(e) => {
            eprintln!("Load error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_run(settings: &Settings, transform: &TransformArgs, args: &TargetArgs) -> ExitCode {
    let options = match pipeline_options(settings, transform) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let target = match resolve_target(settings, args) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error resolving warehouse: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&options, &target).await {
        Ok(output) => {
            print_transform(&output.transform);
            finish_load(&output.load)
        }
        Err(e) => {
            eprintln!("Run error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_schema(dialect: Dialect, dataset: Option<&str>) -> ExitCode {
    for table in TableName::ALL {
        let create = match dataset {
            Some(dataset) => table.create_table().schema(dataset),
            None => table.create_table(),
        };
        println!("{};", create.to_sql(dialect));
    }
    ExitCode::SUCCESS
}

fn print_transform(output: &TransformOutput) {
    println!(
        "Cleaned {} rows ({} dropped)",
        output.cleaned_rows, output.dropped_rows
    );
    for file in &output.exported {
        println!("  {:<20} {:>8} rows  {}", file.table, file.rows, file.path.display());
    }
}

/// Print the per-table outcome; non-zero exit if any table failed.
fn finish_load(report: &LoadReport) -> ExitCode {
    for outcome in &report.outcomes {
        match outcome {
            TableOutcome::Loaded(summary) => {
                println!("  {:<20} loaded {} rows", summary.table, summary.output_rows)
            }
            TableOutcome::Skipped { table } => println!("  {:<20} skipped (no CSV)", table),
            TableOutcome::Failed { table, error } => println!("  {:<20} FAILED: {}", table, error),
        }
    }

    if report.is_degraded() {
        eprintln!("Load finished with failures");
        ExitCode::FAILURE
    } else {
        println!("Load complete");
        ExitCode::SUCCESS
    }
}
