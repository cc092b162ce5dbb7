use anyhow::{Context, Result};
use chatter_analysis::AggregationEngine;
use chatter_domain::Item;
use chatter_ingest::{IngestorConfig, ReplaySource, StreamIngestor};
use chatter_sentiment::{EnricherConfig, SentimentEnricher};
use chatter_store::{BoundedCorpusStore, CollectionStore, MemoryCollection};
use chatter_text::{Normalizer, StopwordFilter};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod report;

#[derive(Parser)]
#[command(name = "chatter")]
#[command(about = "Collect a bounded corpus from a stream and analyze its sentiment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest captured stream events into a bounded collection
    Collect(CollectArgs),

    /// Print the items of a collection
    #[command(name = "print-collection")]
    PrintCollection(PrintArgs),

    /// Word frequencies and sentiment distribution over a collection
    Analyze(AnalyzeArgs),

    /// Per-user sentiment averages and the follower/friend ratio curve
    #[command(name = "user-analyze")]
    UserAnalyze(UserAnalyzeArgs),
}

#[derive(clap::Args)]
struct CollectArgs {
    /// JSONL file of captured stream events, one event per line
    #[arg(long)]
    events: PathBuf,

    /// Keyword the collection was captured for
    #[arg(long)]
    keyword: String,

    /// Collection file to create or extend
    #[arg(long)]
    store: PathBuf,

    /// Capacity ceiling of the collection
    #[arg(long, default_value_t = 1_500)]
    capacity: u64,

    /// Language tag an event must declare to be accepted
    #[arg(long, default_value = "en")]
    language: String,
}

#[derive(clap::Args)]
struct PrintArgs {
    /// Collection file to print
    #[arg(long)]
    store: PathBuf,

    /// Print only the first few items plus the total count
    #[arg(short, long)]
    short: bool,
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Collection file to analyze
    #[arg(long)]
    store: PathBuf,

    /// Keyword the collection was captured for
    #[arg(long)]
    keyword: String,

    /// How many of the most frequent words to report
    #[arg(long, default_value_t = 50)]
    top: usize,

    /// Scoring endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Only count word frequencies, skip the scoring calls
    #[arg(long)]
    skip_scoring: bool,
}

#[derive(clap::Args)]
struct UserAnalyzeArgs {
    /// Collection file to analyze
    #[arg(long)]
    store: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Collect(args) => collect(args).await,
        Commands::PrintCollection(args) => print_collection(args).await,
        Commands::Analyze(args) => analyze(args).await,
        Commands::UserAnalyze(args) => user_analyze(args).await,
    }
}

/// Open a collection file. Without an explicit capacity the store is
/// opened read-only in effect: its ceiling is the current item count.
async fn open_store(
    path: &Path,
    name: &str,
    capacity: Option<u64>,
) -> Result<(Arc<MemoryCollection>, BoundedCorpusStore)> {
    let collection = Arc::new(
        MemoryCollection::load(path)
            .await
            .with_context(|| format!("loading collection from {}", path.display()))?,
    );
    let capacity = match capacity {
        Some(value) => value,
        None => collection.count().await?,
    };
    let store = BoundedCorpusStore::new(collection.clone(), name, capacity).await?;
    Ok((collection, store))
}

async fn collect(args: CollectArgs) -> Result<()> {
    let (collection, store) = open_store(&args.store, &args.keyword, Some(args.capacity)).await?;

    let source = ReplaySource::from_jsonl(&args.events)
        .await
        .with_context(|| format!("loading events from {}", args.events.display()))?;

    let handle = StreamIngestor::start(
        source,
        store.clone(),
        IngestorConfig {
            language: args.language,
        },
    );
    let summary = handle.wait().await?;

    collection.save(&args.store).await?;
    report::print_ingest_summary(&summary, store.count().await, store.capacity());
    Ok(())
}

async fn print_collection(args: PrintArgs) -> Result<()> {
    let collection = MemoryCollection::load(&args.store).await?;
    let items = collection.find_all().await?;
    report::print_items(&items, args.short);
    Ok(())
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let (collection, store) = open_store(&args.store, &args.keyword, None).await?;

    let mut config = EnricherConfig::default();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    let engine = AggregationEngine::new(
        store,
        Normalizer::new(&args.keyword),
        StopwordFilter::nltk_english(),
        SentimentEnricher::new(config)?,
    );

    let table = engine.compute_frequencies().await?;
    report::print_frequents(&table, args.top, &StopwordFilter::nltk_english());

    if args.skip_scoring {
        return Ok(());
    }

    match engine.compute_sentiment().await {
        Ok(distribution) => report::print_distribution(&distribution),
        Err(err) if err.is_daily_limit() => {
            // Write-backs up to the abort point are kept; rerunning the
            // command tomorrow picks up where this run stopped.
            collection.save(&args.store).await?;
            anyhow::bail!("{err}. Scored items so far were saved; rerun once the quota resets.");
        }
        Err(err) => return Err(err.into()),
    }

    collection.save(&args.store).await?;
    Ok(())
}

async fn user_analyze(args: UserAnalyzeArgs) -> Result<()> {
    let (_collection, store) = open_store(&args.store, "user-analysis", None).await?;

    let engine = AggregationEngine::new(
        store,
        Normalizer::new(""),
        StopwordFilter::nltk_english(),
        SentimentEnricher::new(EnricherConfig::default())?,
    );

    let summaries = engine.compute_user_summary().await?;
    report::print_user_summaries(&summaries);

    let series = engine
        .compute_cumulative_series(Item::follower_friend_ratio)
        .await?;
    report::print_series(&series);
    Ok(())
}
