use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, UserId};
use engine::{Recommender, ScoredItem, Strategy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::warn;

/// recs - user-based, item-based and content-based recommendations
#[derive(Parser)]
#[command(name = "recs")]
#[command(about = "Recommend items from ratings and item tags", long_about = None)]
struct Cli {
    /// Directory containing items.dat and ratings.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON snapshot to load instead of the data directory
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for a user
    Recommend {
        /// User to get recommendations for
        #[arg(long)]
        user: UserId,

        /// Scoring strategy: user, item or content
        #[arg(long, default_value = "content")]
        strategy: Strategy,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Show the score and tags behind each recommendation
        #[arg(long)]
        explain: bool,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's ratings
    User {
        /// User to display
        #[arg(long)]
        user: UserId,
    },

    /// Run every strategy on the built-in five-film example
    Demo {
        /// Number of recommendations per strategy
        #[arg(long, default_value = "3")]
        limit: usize,
    },

    /// Run concurrent recommendation requests and report latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Scoring strategy to benchmark
        #[arg(long, default_value = "content")]
        strategy: Strategy,

        /// Recommendations per request
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            ref user,
            strategy,
            limit,
            explain,
            json,
        } => {
            let engine = load_engine(&cli)?;
            handle_recommend(&engine, user, strategy, limit, explain, json)?
        }
        Commands::User { ref user } => {
            let engine = load_engine(&cli)?;
            handle_user(&engine, user)?
        }
        Commands::Demo { limit } => handle_demo(limit),
        Commands::Benchmark {
            requests,
            concurrent,
            strategy,
            limit,
        } => {
            let engine = Arc::new(load_engine(&cli)?);
            handle_benchmark(engine, requests, concurrent, strategy, limit).await?
        }
    }

    Ok(())
}

/// Load the dataset named on the command line into a fresh engine
fn load_engine(cli: &Cli) -> Result<Recommender> {
    let start = Instant::now();
    let index = match &cli.snapshot {
        Some(path) => DataIndex::load_from_json(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        None => DataIndex::load_from_files(&cli.data_dir)
            .with_context(|| format!("Failed to load dataset from {}", cli.data_dir.display()))?,
    };
    eprintln!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());
    Ok(Recommender::from_index(index))
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &Recommender,
    user: &str,
    strategy: Strategy,
    limit: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    if !engine.data_index().ratings().contains_user(user) {
        warn!("User {} has no ratings; results fall back to zero-weight scoring", user);
    }

    let recommendations = engine.recommend_scored(strategy, user, limit);

    if json {
        let out = serde_json::to_string_pretty(&recommendations)
            .context("Failed to serialize recommendations")?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "{}",
        format!("{} recommendations for {}:", strategy, user).bold().blue()
    );
    print_recommendations(engine, &recommendations, explain);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(engine: &Recommender, user: &str) -> Result<()> {
    let index = engine.data_index();
    if !index.ratings().contains_user(user) {
        bail!("User {} not found", user);
    }

    let ratings = index.ratings_of(user);
    println!("{}", format!("User: {}", user).bold().blue());

    let count = ratings.len();
    let avg = if count > 0 {
        ratings.values().sum::<f64>() / count as f64
    } else {
        0.0
    };
    println!("{}Number of ratings: {}", "• ".cyan(), count);
    println!("{}Average rating: {:.2}", "• ".cyan(), avg);

    let mut by_rating: Vec<(&String, &f64)> = ratings.iter().collect();
    by_rating.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("Ratings:");
    for (item_id, rating) in by_rating {
        let tags = format_tags(index, item_id);
        println!("  - {} [{}] {:.1}", item_id, tags, rating);
    }
    Ok(())
}

/// Handle the 'demo' command
fn handle_demo(limit: usize) {
    let engine = demo_engine();

    for user in ["Alice", "Bob", "Charlie"] {
        for strategy in Strategy::ALL {
            let recs = engine.recommend(strategy, user, limit);
            println!(
                "{} for {}: {:?}",
                format!("{}-based", strategy).bold().blue(),
                user.green(),
                recs
            );
        }
    }
}

/// The five-film catalog and three users used by `demo`
fn demo_engine() -> Recommender {
    let mut engine = Recommender::new();

    engine.register_item("Inception", ["Sci-Fi", "Action"]);
    engine.register_item("Avatar", ["Sci-Fi", "Adventure"]);
    engine.register_item("Titanic", ["Romance", "Drama"]);
    engine.register_item("Matrix", ["Sci-Fi", "Action"]);
    engine.register_item("Avengers", ["Action", "Adventure"]);

    engine.set_ratings("Alice", [("Inception", 5.0), ("Titanic", 3.0)]);
    engine.set_ratings("Bob", [("Inception", 4.0), ("Avatar", 4.0), ("Titanic", 5.0)]);
    engine.set_ratings("Charlie", [("Avengers", 5.0), ("Avatar", 3.0), ("Matrix", 4.0)]);

    engine
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<Recommender>,
    requests: usize,
    concurrent: usize,
    strategy: Strategy,
    limit: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let user_ids: Vec<UserId> = engine.data_index().all_user_ids().cloned().collect();
    if user_ids.is_empty() {
        bail!("Dataset has no users to benchmark");
    }

    // Reads never mutate the engine, so a plain Arc is enough to share it
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_start = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let user = user_ids[rand::random::<u32>() as usize % user_ids.len()].clone();
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let engine = Arc::clone(&engine);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            engine.recommend(strategy, &user, limit);
            start.elapsed()
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await.context("Benchmark task panicked")?);
    }
    let wall_time = wall_start.elapsed();

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| {
        let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Strategy: {}", strategy);
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(engine: &Recommender, recommendations: &[ScoredItem], explain: bool) {
    if recommendations.is_empty() {
        println!("  (no recommendations)");
        return;
    }

    for (i, rec) in recommendations.iter().enumerate() {
        let rank = i + 1;
        println!(
            "{}. {} - Score: {:.3}",
            rank.to_string().green(),
            rec.item_id,
            rec.score
        );
        if explain {
            println!(
                "   Strategy: {}, Tags: [{}]",
                rec.strategy,
                format_tags(engine.data_index(), &rec.item_id)
            );
        }
    }
}

fn format_tags(index: &DataIndex, item_id: &str) -> String {
    index
        .tags_of(item_id)
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
