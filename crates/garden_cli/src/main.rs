//! Command-line driver for the gardening content catalog.
//!
//! Opens a SQLite-backed store (in-memory unless `--db` is given), seeds
//! empty collections with the default catalog, runs one repository
//! operation and prints the result as JSON.

use clap::{Parser, Subcommand};
use garden_core::{
    init_logging, Accessory, Book, ContentPatch, ContentRepository, ContentStatus, ContentType,
    DefaultCatalog, Essential, LogLevel, Pot, SqliteStore, Suggestion, Technique, Tool, Video,
};
use log::error;
use serde_json::{json, Value};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Inspect and edit the gardening content catalog",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        env = "GARDEN_DB",
        value_name = "PATH",
        help = "SQLite database file; an in-memory database is used when omitted"
    )]
    db: Option<PathBuf>,

    #[arg(
        long,
        env = "GARDEN_LOG_DIR",
        value_name = "DIR",
        help = "Absolute directory for rolling log files; logging is off when omitted"
    )]
    log_dir: Option<String>,

    #[arg(
        long,
        env = "GARDEN_LOG_LEVEL",
        value_name = "LEVEL",
        help = "trace|debug|info|warn|error (defaults to debug in debug builds, info otherwise)"
    )]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known content types
    Types,
    /// List a collection in stored order
    List {
        content_type: ContentType,
        #[arg(long, help = "Only show published entries")]
        published: bool,
    },
    /// Show one entry
    Show { content_type: ContentType, id: String },
    /// Mark an entry as published
    Publish { content_type: ContentType, id: String },
    /// Move an entry back to draft
    Unpublish { content_type: ContentType, id: String },
    /// Delete an entry
    Remove { content_type: ContentType, id: String },
}

enum Action<'a> {
    List { published: bool },
    Show(&'a str),
    SetStatus(&'a str, ContentStatus),
    Remove(&'a str),
}

impl Command {
    fn target(&self) -> Option<(ContentType, Action<'_>)> {
        match self {
            Self::Types => None,
            Self::List {
                content_type,
                published,
            } => Some((
                *content_type,
                Action::List {
                    published: *published,
                },
            )),
            Self::Show { content_type, id } => Some((*content_type, Action::Show(id))),
            Self::Publish { content_type, id } => Some((
                *content_type,
                Action::SetStatus(id, ContentStatus::Published),
            )),
            Self::Unpublish { content_type, id } => {
                Some((*content_type, Action::SetStatus(id, ContentStatus::Draft)))
            }
            Self::Remove { content_type, id } => Some((*content_type, Action::Remove(id))),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.unwrap_or_else(LogLevel::build_default);
        if let Err(err) = init_logging(level.as_str(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<Value> {
    let Some((content_type, action)) = cli.command.target() else {
        return Ok(json!(ContentType::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()));
    };

    let store = match &cli.db {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_in_memory()?,
    };

    match content_type {
        ContentType::Technique => apply::<Technique>(&store, action),
        ContentType::Tool => apply::<Tool>(&store, action),
        ContentType::Essential => apply::<Essential>(&store, action),
        ContentType::Pot => apply::<Pot>(&store, action),
        ContentType::Accessory => apply::<Accessory>(&store, action),
        ContentType::Suggestion => apply::<Suggestion>(&store, action),
        ContentType::Video => apply::<Video>(&store, action),
        ContentType::Book => apply::<Book>(&store, action),
    }
}

fn apply<V: DefaultCatalog>(store: &SqliteStore, action: Action<'_>) -> CliResult<Value> {
    let mut repo = ContentRepository::open(store, V::default_catalog());
    let not_found = |id: &str| format!("{} `{id}` not found", V::CONTENT_TYPE);

    let value = match action {
        Action::List { published: true } => serde_json::to_value(repo.get_published())?,
        Action::List { published: false } => serde_json::to_value(repo.list())?,
        Action::Show(id) => match repo.get_by_id(id) {
            Some(content) => serde_json::to_value(content)?,
            None => return Err(not_found(id).into()),
        },
        Action::SetStatus(id, status) => match repo.update(id, &ContentPatch::status(status))? {
            Some(content) => serde_json::to_value(&content)?,
            None => return Err(not_found(id).into()),
        },
        Action::Remove(id) => json!({ "id": id, "removed": repo.remove(id) }),
    };

    if let Some(err) = repo.last_save_error() {
        eprintln!("warning: changes kept in memory only: {err}");
    }
    Ok(value)
}
