use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use draftcheck::config::Config;
use draftcheck::corpus::{CorpusStore, DirectoryStore, Upload};
use draftcheck::db::ResultLog;
use draftcheck::pipeline::{self, CheckOptions};
use draftcheck::report::Engine;
use draftcheck::style::LexiconSentiment;

/// draftcheck: overlap and style-drift detection for submitted documents.
///
/// Scores a document against every earlier submission with two separate
/// signals (word overlap and meaning), points at the sentences that match,
/// and flags paragraphs whose style shifts abruptly.
#[derive(Parser)]
#[command(name = "draftcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and corpus directory
    Init,

    /// Download the sentence encoder model (~90 MB)
    DownloadModel,

    /// Check a text file against every document in the corpus
    Check {
        /// Path to the .txt file to check
        file: PathBuf,

        /// Score without adding the file to the corpus
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two documents already in the corpus
    Compare {
        /// Identifier of the first document (see `draftcheck list`)
        first: String,

        /// Identifier of the second document
        second: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the documents in the corpus
    List,

    /// Show the most recent logged checks
    History {
        /// Number of entries to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show system status (database, corpus, encoder)
    Status,

    /// Serve the JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("draftcheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing draftcheck...");
            let config = Config::load()?;
            let log = draftcheck::db::initialize_sqlite(&config.db_path)?;
            let table_count = log.table_count().await?;
            let store = DirectoryStore::new(&config.corpus_dir);
            store.ensure_exists().await?;

            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("Corpus directory: {}", config.corpus_dir.display());
            println!("\nNext step: run `draftcheck download-model` to fetch the sentence encoder.");
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            println!("Downloading sentence encoder...");
            println!("  Destination: {}", config.model_dir.display());

            draftcheck::model::download::download_model(&config.model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `draftcheck check <file>`.");
        }

        Commands::Check {
            file,
            dry_run,
            json,
        } => {
            let config = Config::load()?;
            let log = open_log(&config)?;
            let engine = build_engine(&config)?;
            let store = DirectoryStore::new(&config.corpus_dir);

            let upload = Upload::from_path(&file).await?;
            let options = CheckOptions {
                dry_run,
                max_upload_bytes: config.max_upload_bytes,
            };
            let report =
                pipeline::check::run(&engine, &store, log.as_ref(), &upload, options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                draftcheck::output::terminal::display_check_report(&report);
                if dry_run {
                    println!("{}", "Dry run: the file was not added to the corpus.".dimmed());
                }
            }
        }

        Commands::Compare {
            first,
            second,
            json,
        } => {
            let config = Config::load()?;
            let engine = build_engine(&config)?;
            let store = DirectoryStore::new(&config.corpus_dir);

            let report = pipeline::compare::run(&engine, &store, &first, &second).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                draftcheck::output::terminal::display_compare_report(&report);
            }
        }

        Commands::List => {
            let config = Config::load()?;
            let store = DirectoryStore::new(&config.corpus_dir);
            let ids = store.list_ids().await?;
            draftcheck::output::terminal::display_corpus(&ids);
        }

        Commands::History { limit } => {
            let config = Config::load()?;
            let log = open_log(&config)?;
            let entries = log.recent(limit).await?;
            draftcheck::output::terminal::display_history(&entries);
        }

        Commands::Status => {
            let config = Config::load()?;
            let store = DirectoryStore::new(&config.corpus_dir);
            let log = if draftcheck::status::database_exists(&config.db_path) {
                Some(open_log(&config)?)
            } else {
                None
            };
            draftcheck::status::show(&config, &store, log.as_deref()).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let log = draftcheck::db::initialize_sqlite(&config.db_path)?;
            let engine = build_engine(&config)?;
            let store = DirectoryStore::new(&config.corpus_dir);
            store.ensure_exists().await?;

            let state = draftcheck::web::AppState {
                engine,
                store: Arc::new(store),
                log,
                config: Arc::new(config),
            };
            draftcheck::web::run_server(state, port, &bind).await?;
        }
    }

    Ok(())
}

/// Open the existing result log (fails with a hint if `init` hasn't run).
fn open_log(config: &Config) -> Result<Arc<dyn ResultLog>> {
    draftcheck::db::open_sqlite(&config.db_path)
}

/// Load the encoder once and build the shared scoring context.
fn build_engine(config: &Config) -> Result<Engine> {
    config.require_encoder()?;
    let encoder = draftcheck::model::load_encoder(&config.model_dir)?;
    info!("Sentence encoder loaded");
    Ok(Engine::new(encoder, Arc::new(LexiconSentiment)))
}
