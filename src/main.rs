//! icfinder CLI - look up part numbers in a bundled SQLite database

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use icfinder::config::{self, IcfinderConfig};
use icfinder::output::{self, OutputMode, emit_success};
use icfinder::ui::{self, Icons, ResultView};
use icfinder::{BundledProvider, History, HistoryEntry, Searcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "icfinder")]
#[command(version)]
#[command(about = "Look up IC / part numbers in a database of unknown schema")]
#[command(long_about = r#"
icfinder searches every table of a bundled SQLite database for a part number:
  1. exact match on identifier-like columns (part, model, chip, code, ...)
  2. substring match on the same columns
  3. substring match on any text column

Example usage:
  icfinder search --query PM660
  icfinder tables
  icfinder samples --limit 20
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct DatabaseArgs {
    /// Bundled database file to copy from
    #[arg(short, long)]
    asset: Option<PathBuf>,

    /// Directory for the working copy of the database
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a part number
    Search {
        /// Part number or fragment
        #[arg(short, long)]
        query: String,

        /// Ignore the history and query the database again
        #[arg(long)]
        fresh: bool,

        /// Render the record as a table
        #[arg(short, long)]
        table: bool,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// List tables and columns with their classification
    Tables {
        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Print identifier-like values to use as test queries
    Samples {
        /// Maximum number of values
        #[arg(short, long, default_value = "10")]
        limit: usize,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Show or edit the lookup history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Serve lookups over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        db: DatabaseArgs,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past lookups, newest first
    List,
    /// Forget one lookup
    Remove { query: String },
    /// Forget everything
    Clear,
}

/// Settings after merging flags over the config file
struct Settings {
    config: IcfinderConfig,
    base: PathBuf,
}

impl Settings {
    fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = config::load_config(path)?.unwrap_or_default();
        Ok(Self { config, base: PathBuf::from(".") })
    }

    fn provider(&self, db: &DatabaseArgs) -> BundledProvider {
        let asset = db.asset.clone().unwrap_or_else(|| self.config.asset_path(&self.base));
        let data_dir = db.data_dir.clone().unwrap_or_else(|| self.config.data_dir_path(&self.base));
        BundledProvider::new(asset, data_dir)
    }

    fn searcher(&self, db: &DatabaseArgs) -> Searcher {
        Searcher::new(Arc::new(self.provider(db)))
    }

    fn history(&self) -> anyhow::Result<History> {
        let path = self.config.history_path(&self.base);
        Ok(History::load(&path, self.config.history_limit())?)
    }

    /// History for lookups, where a damaged file must not block the search
    fn search_history(&self) -> History {
        let path = self.config.history_path(&self.base);
        History::load_or_empty(&path, self.config.history_limit())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output_mode = OutputMode::from_json_flag(cli.json);

    if let Err(e) = run(cli, output_mode).await {
        if output_mode.is_human() {
            ui::error(&error_message(&e));
        } else {
            println!("{}", output::error_envelope(&error_message(&e)));
        }
        std::process::exit(1);
    }
}

/// Top-level message only. Library errors already embed their source.
fn error_message(e: &anyhow::Error) -> String {
    e.to_string()
}

async fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search { query, fresh, table, db } => {
            let query = query.trim().to_string();
            let mut history = settings.search_history();

            let cached = if fresh { None } else { history.find(&query).cloned() };
            let text = match cached {
                Some(entry) => {
                    tracing::debug!("Answering '{}' from history", query);
                    entry.text
                }
                None => {
                    let searcher = settings.searcher(&db);
                    let spinner = output_mode
                        .decorated()
                        .then(|| ui::Spinner::new(&format!("Searching for '{}'...", query)));
                    let result = searcher.search_record(&query).await;
                    if let Some(spinner) = &spinner {
                        spinner.finish();
                    }
                    let text = result?;
                    if !query.is_empty() {
                        history.record(HistoryEntry::new(query.clone(), text.clone()));
                        if let Err(e) = history.save() {
                            tracing::warn!("Could not save history: {}", e);
                        }
                    }
                    text
                }
            };

            if output_mode.is_human() {
                print_result(&query, &text, table);
            } else {
                let view = ResultView::from_text(&text);
                emit_success(output_mode, "search", serde_json::json!({
                    "query": query,
                    "found": view != ResultView::NotFound,
                    "text": text,
                }))?;
            }
        }

        Commands::Tables { db } => {
            let searcher = settings.searcher(&db);
            let tables = searcher.tables().await?;

            if output_mode.is_human() {
                if tables.is_empty() {
                    println!("{} No tables found.", Icons::EMPTY);
                }
                for summary in &tables {
                    ui::table_heading(&summary.name);
                    match &summary.error {
                        Some(e) => ui::warn(&format!("Could not read columns: {}", e)),
                        None => println!("{}", ui::columns_table(&summary.columns)),
                    }
                }
            } else {
                emit_success(output_mode, "tables", serde_json::to_value(&tables)?)?;
            }
        }

        Commands::Samples { limit, db } => {
            let searcher = settings.searcher(&db);
            let values = searcher.samples(limit).await?;

            if output_mode.is_human() {
                if values.is_empty() {
                    println!("{} No sample values found.", Icons::EMPTY);
                }
                for value in values {
                    println!("{}", value);
                }
            } else {
                emit_success(output_mode, "samples", serde_json::json!(values))?;
            }
        }

        Commands::History { action } => {
            let mut history = settings.history()?;
            match action {
                HistoryAction::List => {
                    if output_mode.is_human() {
                        if history.entries().is_empty() {
                            println!("{} History is empty.", Icons::EMPTY);
                        }
                        for entry in history.entries() {
                            let first = entry.text.lines().next().unwrap_or_default();
                            println!("{} {}  {}", Icons::HISTORY, entry.query, ui::muted(first));
                        }
                    } else {
                        emit_success(output_mode, "history", serde_json::to_value(history.entries())?)?;
                    }
                }
                HistoryAction::Remove { query } => {
                    let removed = history.remove(&query);
                    history.save()?;
                    if output_mode.is_human() {
                        if removed {
                            ui::success(&format!("Removed '{}' from history", query));
                        } else {
                            ui::warn(&format!("'{}' is not in the history", query));
                        }
                    } else {
                        emit_success(output_mode, "history.remove", serde_json::json!({ "removed": removed }))?;
                    }
                }
                HistoryAction::Clear => {
                    history.clear();
                    history.save()?;
                    if output_mode.is_human() {
                        ui::success("History cleared");
                    } else {
                        emit_success(output_mode, "history.clear", serde_json::json!({}))?;
                    }
                }
            }
        }

        Commands::Serve { port, db } => {
            let searcher = settings.searcher(&db);
            icfinder::server::start_server(port, searcher).await?;
        }

        Commands::Init { force, db } => {
            let path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let mut config = settings.config.clone();
            if let Some(asset) = db.asset {
                config.asset = Some(asset.display().to_string());
            }
            if let Some(data_dir) = db.data_dir {
                config.data_dir = Some(data_dir.display().to_string());
            }
            config::write_config(&path, &config, force)?;

            if output_mode.is_human() {
                ui::success(&format!("Wrote {}", path.display()));
            } else {
                emit_success(output_mode, "init", serde_json::json!({ "path": path }))?;
            }
        }
    }

    Ok(())
}

fn print_result(query: &str, text: &str, as_table: bool) {
    match ResultView::from_text(text) {
        ResultView::NotFound => {
            ui::not_found(text, query);
        }
        ResultView::Record { table, fields } => {
            ui::header(query);
            ui::matched_table(&table);
            if as_table {
                println!("{}", ui::fields_table(&fields));
            } else {
                for (name, value) in &fields {
                    ui::field(name, value);
                }
            }
        }
        ResultView::Structured(fields) => {
            ui::header(query);
            println!("{}", ui::fields_table(&fields));
        }
        ResultView::Raw(raw) => {
            ui::header(query);
            ui::section("Details");
            println!("{}", raw);
        }
    }
}
