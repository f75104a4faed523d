//! Tangible CLI binary.
//!
//! Builds the tangible book value and historical market cap dataset.

mod settings;

use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use settings::BuildArgs;
use std::process;
use std::time::Duration as StdDuration;
use tangible::data::yahoo::YahooProvider;
use tangible::engine::{
    CompanyOutcome, DATA_COMPANY_MULTIPLIER, DATA_INDUSTRY_KEYWORDS, GENERIC_MULTIPLIER,
    MarketValueEstimator, RecordAssembler, Scheduler,
};
use tangible::output::{Dataset, persist};
use tangible::{
    Sp500Wikipedia, StaticTickers, TickerFile, TickerUniverse, Universe, UniverseSource,
    load_or_empty,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tangible")]
#[command(about = "Tangible: normalized tangible book value and market cap dataset", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset for a ticker universe
    Build(BuildArgs),

    /// Assemble and print the rows of one company without writing a file
    Inspect {
        /// Stock symbol
        symbol: String,

        /// Half-width of the price window around each report date, in days
        #[arg(long, default_value = "5")]
        window_days: u32,
    },

    /// List the data-industry keywords and both multipliers
    Keywords,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build(args) => build(args).await?,
        Commands::Inspect {
            symbol,
            window_days,
        } => inspect(&symbol, window_days).await?,
        Commands::Keywords => list_keywords(),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn universe_source(
    args: &BuildArgs,
) -> Result<Box<dyn UniverseSource>, Box<dyn std::error::Error>> {
    let source: Box<dyn UniverseSource> = match (&args.tickers, &args.universe_file) {
        (Some(list), _) => Box::new(StaticTickers(TickerUniverse::from_csv_list(list))),
        (None, Some(path)) => Box::new(TickerFile::new(path)),
        (None, None) => Box::new(Sp500Wikipedia::new()?),
    };
    Ok(source)
}

async fn build(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.run_config()?;
    let export = args.export_config()?;

    let source = universe_source(&args)?;
    let (mut universe, _) = load_or_empty(source.as_ref()).await;
    if let Some(limit) = args.limit {
        universe = universe.truncated(limit);
    }
    println!("Loaded {} tickers", universe.size());

    let provider = YahooProvider::new()?;
    let scheduler = Scheduler::new(&provider, &config);

    let pb = ProgressBar::new(universe.size() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));

    let report = scheduler.run(universe.as_slice(), Some(&pb)).await;
    pb.finish_with_message(format!(
        "{} rows from {} companies",
        report.dataset.len(),
        report.assembled
    ));

    let path = persist(
        &report.dataset,
        &export.output_dir,
        &export.prefix,
        Local::now().naive_local(),
        export.format,
    )?;

    let summary = report.summary().with_output_path(path);
    println!("{}", summary.to_ascii_table());
    println!("{}", summary);

    Ok(())
}

async fn inspect(symbol: &str, window_days: u32) -> Result<(), Box<dyn std::error::Error>> {
    let provider = YahooProvider::new()?;
    let assembler =
        RecordAssembler::new(&provider).with_estimator(MarketValueEstimator::new(window_days));

    match assembler.assemble(symbol).await {
        CompanyOutcome::Assembled(company) => {
            println!("\n{}", company.symbol);
            println!("  Industry:   {}", company.industry.industry);
            println!("  Sector:     {}", company.industry.sector);
            println!("  Multiplier: {}", company.industry.multiplier);
            println!();

            let dataset: Dataset = company.rows.into_iter().collect();
            println!("{}", dataset.to_dataframe()?);

            for failure in &company.price_failures {
                println!("  ! {}", failure);
            }
        }
        CompanyOutcome::EmptyBalanceSheet => {
            println!("No balance sheet periods for {}", symbol);
        }
        CompanyOutcome::Skipped(err) => return Err(err.into()),
    }

    Ok(())
}

fn list_keywords() {
    println!("Data industry keywords (substring, case-insensitive):");
    println!("=====================================================\n");
    for keyword in DATA_INDUSTRY_KEYWORDS {
        println!("  {}", keyword);
    }
    println!();
    println!("  Data company multiplier: {}", DATA_COMPANY_MULTIPLIER);
    println!("  Generic multiplier:      {}", GENERIC_MULTIPLIER);
}
