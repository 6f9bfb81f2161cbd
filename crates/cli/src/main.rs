use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lumina_core::aggregate::Aggregator;
use lumina_core::book::Book;
use lumina_core::config::{config_path, load_config, save_config, set_config_key, AppConfig};
use lumina_core::cover::book_cover;
use lumina_core::error::{ConfigError, FavoritesError};
use lumina_core::favorites::FavoritesStore;
use lumina_core::reader::{download_links, reader_link};
use lumina_core::related::exclude_seed;
use lumina_core::topics::{topic_query, TOPICS};

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "Search, browse and save public-domain books")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Favorites file (overrides config)
    #[arg(long, global = true)]
    favorites: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search both catalogs
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show the default front-page listing
    Trending,

    /// Browse a genre (see `topics`)
    Topic {
        /// Topic name or free-text query
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// List browsable genres
    Topics,

    /// Find books related to a saved favorite
    Related {
        /// Favorite id
        id: String,
    },

    /// Manage saved books
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show reader and download links for a saved book
    Open {
        /// Favorite id
        id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List saved books
    List,
    /// Save a book from search results
    Add {
        /// Id of the book to save
        id: String,
        /// Search query whose results contain the book
        #[arg(long, required = true)]
        query: String,
    },
    /// Remove a saved book
    Remove {
        /// Favorite id
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config();
    let favorites_path = cli
        .favorites
        .clone()
        .unwrap_or_else(|| cfg.favorites.resolved_path());

    let result = match &cli.command {
        Commands::Search { query } => run_search(&cfg, &query.join(" "), cli.json).await,
        Commands::Trending => run_trending(&cfg, cli.json).await,
        Commands::Topic { name } => run_topic(&cfg, &name.join(" "), cli.json).await,
        Commands::Topics => run_topics(cli.json),
        Commands::Related { id } => run_related(&cfg, &favorites_path, id, cli.json).await,
        Commands::Favorites { action } => run_favorites(&cfg, &favorites_path, action, cli.json).await,
        Commands::Open { id } => run_open(&favorites_path, id, cli.json),
        Commands::Config { action } => run_config(action, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn spinner(message: &str, json: bool) -> ProgressBar {
    if json {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn run_search(cfg: &AppConfig, query: &str, json: bool) -> CliResult {
    let aggregator = Aggregator::from_config(&cfg.providers)?;
    let pb = spinner("Searching...", json);
    let books = aggregator.search(query).await;
    pb.finish_and_clear();
    print_books(&books, json)
}

async fn run_trending(cfg: &AppConfig, json: bool) -> CliResult {
    let aggregator = Aggregator::from_config(&cfg.providers)?;
    let pb = spinner("Loading trending books...", json);
    let books = aggregator.trending().await;
    pb.finish_and_clear();
    print_books(&books, json)
}

async fn run_topic(cfg: &AppConfig, name: &str, json: bool) -> CliResult {
    let aggregator = Aggregator::from_config(&cfg.providers)?;
    let pb = spinner(&format!("Browsing {}...", name), json);
    let books = aggregator.by_topic(topic_query(name)).await;
    pb.finish_and_clear();
    print_books(&books, json)
}

fn run_topics(json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(TOPICS)?);
    } else {
        for topic in TOPICS {
            println!("{}", topic.name);
        }
    }
    Ok(())
}

async fn run_related(cfg: &AppConfig, favorites_path: &Path, id: &str, json: bool) -> CliResult {
    let store = FavoritesStore::open(favorites_path)?;
    let seed = store
        .get(id)
        .cloned()
        .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;
    let aggregator = Aggregator::from_config(&cfg.providers)?;
    let pb = spinner("Finding related books...", json);
    let books = exclude_seed(aggregator.related(&seed).await, &seed.id);
    pb.finish_and_clear();
    print_books(&books, json)
}

async fn run_favorites(
    cfg: &AppConfig,
    favorites_path: &Path,
    action: &FavoritesAction,
    json: bool,
) -> CliResult {
    let mut store = FavoritesStore::open(favorites_path)?;
    match action {
        FavoritesAction::List => print_books(store.list(), json)?,
        FavoritesAction::Add { id, query } => {
            let aggregator = Aggregator::from_config(&cfg.providers)?;
            let pb = spinner("Searching...", json);
            let results = aggregator.search(query).await;
            pb.finish_and_clear();
            let book = results
                .into_iter()
                .find(|b| &b.id == id)
                .ok_or_else(|| format!("No search result with id {} for query \"{}\"", id, query))?;
            let title = book.volume_info.title.clone();
            let added = store.add(book)?;
            if json {
                println!("{}", serde_json::json!({ "id": id, "added": added }));
            } else if added {
                println!("Saved: {}", title);
            } else {
                println!("Already saved: {}", title);
            }
        }
        FavoritesAction::Remove { id } => {
            let removed = store.remove(id)?;
            if json {
                println!("{}", serde_json::json!({ "id": removed.id, "removed": true }));
            } else {
                println!("Removed: {}", removed.volume_info.title);
            }
        }
    }
    Ok(())
}

fn run_open(favorites_path: &Path, id: &str, json: bool) -> CliResult {
    let store = FavoritesStore::open(favorites_path)?;
    let book = store
        .get(id)
        .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;
    let reader = reader_link(book);
    let downloads = download_links(book);
    if json {
        let info = serde_json::json!({
            "id": book.id,
            "title": book.volume_info.title,
            "reader": reader,
            "downloads": downloads,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("Reading \"{}\"", book.volume_info.title);
    match reader {
        Some(url) => println!("Reader: {}", url),
        None => println!("Sorry, no reading link is available for this title."),
    }
    for link in &downloads {
        println!("Download ({:?}): {}", link.format, link.url);
    }
    Ok(())
}

fn print_books(books: &[Book], json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(books)?);
        return Ok(());
    }
    if books.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for (i, b) in books.iter().enumerate() {
        let info = &b.volume_info;
        println!("{}. {} by {}", i + 1, info.title, info.authors.join(", "));
        if let Some(date) = &info.published_date {
            println!("   Published: {}", date);
        }
        println!("   Id: {}", b.id);
        println!("   Cover: {}", book_cover(b));
    }
    Ok(())
}

fn run_config(action: &ConfigAction, json: bool) -> CliResult {
    match action {
        ConfigAction::Init => {
            let path = save_config(&AppConfig::default())?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let cfg = load_config();
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = match config_path() {
                Some(path) if path.exists() => {
                    let s = std::fs::read_to_string(&path)?;
                    toml::from_str(&s).map_err(ConfigError::from)?
                }
                _ => AppConfig::default(),
            };
            set_config_key(&mut cfg, key, value)?;
            save_config(&cfg)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}
