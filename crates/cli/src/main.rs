use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use analysis::{EnrichedMovie, MovieSummary, QueryError, queries};
use data_loader::DataIndex;
use explorer::{ExplorationReport, ExplorerConfig, ExternalOutcome, MovieExplorer};
use rating_client::config::{DEFAULT_BASE_URL, DEFAULT_WORKERS};
use rating_client::{FetchConfig, ImdbClient, RatingFetcher};

/// Suggestions shown when a title search has no exact match
const MAX_SUGGESTIONS: usize = 5;

/// Movie Explorer - MovieLens statistics with IMDb ratings
#[derive(Parser)]
#[command(name = "movie-explorer")]
#[command(about = "Explore the MovieLens dataset and enrich it with IMDb ratings", long_about = None)]
struct Cli {
    /// Path to MovieLens dataset directory
    #[arg(short, long, default_value = "data/ml-latest-small")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full exploration and print the report
    Report {
        /// Movies need more ratings than this to count as popular
        #[arg(long, default_value = "50")]
        min_ratings: u32,

        /// Where to write the rating distribution chart
        #[arg(long, default_value = "fight_club_ratings.svg")]
        chart: PathBuf,

        /// Do not render the chart
        #[arg(long)]
        no_chart: bool,

        /// Do not fetch IMDb ratings
        #[arg(long)]
        skip_fetch: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Look up a movie id by exact title
    Search {
        /// Exact title, e.g. "Fight Club (1999)"
        #[arg(long)]
        title: String,
    },

    /// Fetch IMDb ratings for the given ids
    Fetch {
        /// IMDb ids without the "tt" prefix, e.g. 137523
        #[arg(long = "imdb-id", required = true, num_args = 1..)]
        imdb_ids: Vec<String>,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Maximum number of requests in flight
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Base URL of the ratings site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl FetchArgs {
    fn to_config(&self) -> FetchConfig {
        FetchConfig {
            workers: self.workers,
            timeout: Duration::from_secs(self.timeout_secs),
            base_url: self.base_url.clone(),
            ..FetchConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Report {
            min_ratings,
            chart,
            no_chart,
            skip_fetch,
            fetch,
        } => {
            let data_index = load_data(cli.data_dir).await?;
            let config = ExplorerConfig {
                min_ratings,
                chart_path: (!no_chart).then_some(chart),
                ..ExplorerConfig::default()
            };
            handle_report(data_index, config, &fetch, skip_fetch).await?
        }
        Commands::Search { title } => {
            let data_index = load_data(cli.data_dir).await?;
            handle_search(&data_index, &title)
        }
        Commands::Fetch { imdb_ids, fetch } => handle_fetch(&imdb_ids, &fetch).await?,
    }

    Ok(())
}

/// Parse the CSV files off the async runtime
async fn load_data(data_dir: PathBuf) -> Result<Arc<DataIndex>> {
    println!("Loading MovieLens dataset from {}...", data_dir.display());
    let start = Instant::now();

    let data_index = tokio::task::spawn_blocking(move || DataIndex::load_from_files(&data_dir))
        .await
        .context("Loader task panicked")?
        .context("Failed to load MovieLens dataset")?;

    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());
    Ok(Arc::new(data_index))
}

/// Handle the 'report' command
async fn handle_report(
    data_index: Arc<DataIndex>,
    config: ExplorerConfig,
    fetch: &FetchArgs,
    skip_fetch: bool,
) -> Result<()> {
    let fetcher = if skip_fetch {
        None
    } else {
        let fetch_config = fetch.to_config();
        let client = ImdbClient::new(&fetch_config)?;
        info!("Fetching IMDb ratings from {}", client.base_url());
        Some(RatingFetcher::new(client, &fetch_config))
    };

    let explorer = MovieExplorer::new(data_index, config, fetcher);
    let report = explorer.run().await?;
    print_report(&report, explorer.config());
    Ok(())
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, title: &str) {
    match queries::find_movie_id(data_index, title) {
        Ok(movie_id) => {
            println!("{} {}", title.bold(), format!("=> movieId {}", movie_id).green());
            if let Some(movie) = data_index.get_movie(movie_id) {
                let year = movie
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("  Year: {}", year);
                println!("  Genres: {}", movie.genres.join(", "));
            }
        }
        Err(e) => {
            println!("{}", e.to_string().yellow());

            let needle = title.to_lowercase();
            let suggestions: Vec<_> = data_index
                .movies()
                .iter()
                .filter(|movie| movie.title.to_lowercase().contains(&needle))
                .take(MAX_SUGGESTIONS)
                .collect();
            if !suggestions.is_empty() {
                println!("Did you mean:");
                for movie in suggestions {
                    println!("  - {} (movieId {})", movie.title, movie.id);
                }
            }
        }
    }
}

/// Handle the 'fetch' command
async fn handle_fetch(imdb_ids: &[String], fetch: &FetchArgs) -> Result<()> {
    let config = fetch.to_config();
    let client = ImdbClient::new(&config)?;
    info!("Fetching IMDb ratings from {}", client.base_url());
    let fetcher = RatingFetcher::new(client, &config);

    let ratings = fetcher.fetch_all(imdb_ids).await;
    info!("Fetch complete");

    println!("{}", "IMDb ratings:".bold().blue());
    for (imdb_id, rating) in imdb_ids.iter().zip(ratings) {
        match rating {
            Some(value) => println!("  tt{:0>7}: {}", imdb_id, format!("{:.1}", value).green()),
            None => println!("  tt{:0>7}: {}", imdb_id, "no rating".yellow()),
        }
    }
    Ok(())
}

/// Print every section of the report in order
fn print_report(report: &ExplorationReport, config: &ExplorerConfig) {
    let counts = &report.counts;
    println!(
        "{}",
        format!(
            "Dataset: {} movies, {} ratings, {} tags, {} links",
            counts.movies, counts.ratings, counts.tags, counts.links
        )
        .bold()
        .blue()
    );
    println!(
        "{} movies have more than {} ratings",
        report.popular_count, config.min_ratings
    );
    println!();

    print_line("Most rated popular movie", report.most_rated.as_ref().map(|m| m.title.clone()));

    print_line(
        &format!("Tags for {}", config.tags_title),
        report.tags.as_ref().map(|t| {
            if t.tags.is_empty() {
                "(no tags)".to_string()
            } else {
                t.tags.join(", ")
            }
        }),
    );

    print_line(
        &format!("Mean rating of {}", config.mean_title),
        report.mean.as_ref().map(|m| format!("{:.4}", m.mean)),
    );

    print_line(
        &format!("Rating distribution of {}", config.distribution_title),
        report.distribution.as_ref().map(|d| {
            let written = match &d.chart_path {
                Some(path) => format!(", chart written to {}", path.display()),
                None => String::new(),
            };
            format!("{} ratings{}", d.distribution.sample_size, written)
        }),
    );

    print_line(
        "Most popular movie by mean rating",
        report
            .highest_mean
            .as_ref()
            .map(|m| format!("{} ({:.2})", m.title, m.rating_mean)),
    );

    println!("{}", format!("Top {} popular movies by rating count:", config.top_n).bold());
    for (rank, movie) in report.top_by_count.iter().enumerate() {
        print_ranked(rank, movie);
    }

    print_line(
        &format!(
            "Popular {} movie #{} by rating count",
            config.genre,
            config.genre_rank + 1
        ),
        report.nth_in_genre.as_ref().map(|m| m.title.clone()),
    );

    println!();
    match &report.external {
        ExternalOutcome::Skipped => println!("{}", "IMDb enrichment skipped".dimmed()),
        ExternalOutcome::Fetched(summary) => {
            println!(
                "Fetched IMDb ratings for {} of {} popular movies",
                summary.rated.len(),
                summary.requested
            );
            print_line("Highest IMDb rating (movieId)", summary.highest.as_ref().map(describe_external));
            print_line(
                &format!("Highest IMDb rating in {} (movieId)", config.genre),
                summary.highest_in_genre.as_ref().map(describe_external),
            );
        }
    }
}

fn describe_external(movie: &EnrichedMovie) -> String {
    format!(
        "{} ({}, {:.1})",
        movie.movie.movie_id,
        movie.movie.title,
        movie.imdb_rating.unwrap_or_default()
    )
}

fn print_ranked(rank: usize, movie: &MovieSummary) {
    println!(
        "  {}. {} ({} ratings)",
        (rank + 1).to_string().green(),
        movie.title,
        movie.rating_count
    );
}

/// One labelled result, or the reason there is none
fn print_line(label: &str, outcome: Result<String, &QueryError>) {
    match outcome {
        Ok(value) => println!("{}: {}", label.bold(), value),
        Err(e) => println!("{}: {}", label.bold(), e.to_string().yellow()),
    }
}
