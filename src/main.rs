use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use matcha::catalog::dataset::DatasetSource;
use matcha::catalog::MAX_SUGGESTIONS;
use matcha::config::Config;
use matcha::error::RecommendError;
use matcha::output::terminal;
use matcha::recommend::Recommender;

/// Matcha: "if you liked this BL drama, watch these next".
///
/// Builds a content-similarity matrix from a curated drama catalog and
/// serves top-K recommendations from it.
#[derive(Parser)]
#[command(name = "matcha", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the curated dataset and build catalog.json + similarity.json
    Build {
        /// CSV source, URL or local path (default: MATCHA_DATASET_SOURCE)
        #[arg(long)]
        source: Option<String>,
    },

    /// Recommend dramas similar to a title
    Recommend {
        /// The title to start from (case-insensitive)
        title: String,

        /// Number of recommendations (default: MATCHA_DEFAULT_K)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Show the highest-rated dramas from a country
    Top {
        /// Country name, e.g. "Thailand"
        country: String,

        /// Number of titles (default: MATCHA_DEFAULT_K)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Find titles containing a partial name
    Search {
        query: String,
    },

    /// Show the curated "watch next" picks
    Picks,

    /// Show artifact status (sizes, item count, countries)
    Info,

    /// Start the web server (JSON API + UI)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: MATCHA_PORT or 3000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: MATCHA_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("matcha=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source } => {
            let config = Config::load()?;
            let source = DatasetSource::parse(source.as_deref().unwrap_or(&config.dataset_source));

            println!("Building artifacts from {source}...");
            let summary = matcha::pipeline::build::run(&source, &config.data_dir).await?;
            terminal::display_build_summary(&summary);
            println!("\nNext: `matcha recommend \"<title>\"` or `matcha serve`");
        }

        Commands::Recommend { title, k } => {
            let config = Config::load()?;
            let recommender = load_recommender(&config)?;
            let k = k.unwrap_or(config.default_k);

            match recommender.recommend_by_title(&title, k) {
                Ok(results) => {
                    // recommend_by_title only succeeds for a known title
                    if let Some(query) = recommender.catalog().by_title(&title) {
                        terminal::display_recommendations(query, &results);
                    }
                }
                Err(RecommendError::NotFound(_)) => {
                    println!("{} No drama titled \"{}\".", "Not found:".yellow(), title.trim());
                    let suggestions = recommender.catalog().search(&title, MAX_SUGGESTIONS);
                    if !suggestions.is_empty() {
                        terminal::display_search(&title, &suggestions);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Top { country, k } => {
            let config = Config::load()?;
            let recommender = load_recommender(&config)?;
            let k = k.unwrap_or(config.default_k);

            let items = recommender.top_by_country(&country, k)?;
            terminal::display_top_by_country(country.trim(), &items);
        }

        Commands::Search { query } => {
            let config = Config::load()?;
            let recommender = load_recommender(&config)?;
            let items = recommender.catalog().search(&query, MAX_SUGGESTIONS);
            terminal::display_search(&query, &items);
        }

        Commands::Picks => {
            let config = Config::load()?;
            let recommender = load_recommender(&config)?;
            terminal::display_picks(&recommender.featured_picks());
        }

        Commands::Info => {
            let config = Config::load()?;
            matcha::status::show(&config)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let recommender = load_recommender(&config)?;
            info!(
                items = recommender.catalog().len(),
                countries = ?config.top_countries,
                "Starting web server"
            );
            let state = matcha::web::AppState::new(recommender, config);
            matcha::web::run_server(state).await?;
        }
    }

    Ok(())
}

/// Load both artifacts. A missing or invalid artifact aborts the command.
fn load_recommender(config: &Config) -> Result<Recommender> {
    config.require_artifacts()?;
    let recommender = Recommender::load(&config.catalog_path(), &config.matrix_path())?;
    Ok(recommender)
}
