use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossbeam_channel::{after, never};
use tracing::{debug, info};

use crate::clipboard::{
    ClipboardAccess, MemoryClipboard, SystemClipboard, clipboard_owned_by_process,
    validate_clipboard_text,
};
use crate::engine::{DEFAULT_POLL_INTERVAL, HistoryEngine, MIN_POLL_INTERVAL, Poller};
use crate::logging::{LogTarget, init_logging};
use crate::presentation::{apply_search, format_time_ago, item_count_label};
use crate::store::JsonFileStore;
use crate::tui::run_interactive;
use crate::utils::{default_store_path, log_file_path, single_line};

#[derive(Parser)]
#[command(name = "clip-history")]
#[command(version)]
#[command(about = "Record and browse clipboard text history", long_about = None)]
pub struct Cli {
    /// History store file (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Clipboard polling interval in milliseconds
    #[arg(
        long,
        global = true,
        value_name = "MS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(MIN_POLL_INTERVAL.as_millis() as u64..)
    )]
    pub interval_ms: u64,

    /// Persist a new maximum number of entries before running the command
    #[arg(
        long,
        global = true,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_items: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record clipboard changes without the interactive UI
    Watch {
        /// Stop after this many seconds (runs until interrupted otherwise)
        #[arg(long, value_name = "SECS")]
        for_secs: Option<u64>,
    },
    /// Print recorded entries, most recent first
    List {
        /// Only show entries containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of entries to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Copy a recorded entry back to the clipboard
    Copy {
        /// Entry id as shown by `list`
        id: String,
    },
    /// Delete a recorded entry
    Delete {
        /// Entry id as shown by `list`
        id: String,
    },
    /// Delete every recorded entry
    Clear,
    /// Show statistics about the history
    Stats,
    /// Serve text read from stdin on the clipboard until another application replaces it
    #[command(hide = true)]
    ServeClipboard,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_target = match cli.command {
        None => LogTarget::File(log_file_path()?),
        Some(_) => LogTarget::Stderr,
    };
    init_logging(log_target)?;

    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => default_store_path()?,
    };

    match &cli.command {
        None => {
            let engine = open_engine(&cli, &store_path, system_clipboard()?)?;
            run_interactive(engine, poller(&cli))?;
        }
        Some(Commands::Watch { for_secs }) => {
            let engine = open_engine(&cli, &store_path, system_clipboard()?)?;
            watch(engine, poller(&cli), *for_secs)?;
        }
        Some(Commands::List { search, limit }) => {
            let engine = open_engine(&cli, &store_path, MemoryClipboard::new())?;
            list_entries(&engine, search.as_deref(), *limit)?;
        }
        Some(Commands::Copy { id }) => {
            copy_entry(&cli, &store_path, id)?;
        }
        Some(Commands::Delete { id }) => {
            let mut engine = open_engine(&cli, &store_path, MemoryClipboard::new())?;
            delete_entry(&mut engine, id)?;
        }
        Some(Commands::Clear) => {
            let mut engine = open_engine(&cli, &store_path, MemoryClipboard::new())?;
            let removed = engine.history()?.len();
            engine.clear().context("Failed to clear history")?;
            println!("Cleared {}", item_count_label(removed));
        }
        Some(Commands::Stats) => {
            let engine = open_engine(&cli, &store_path, MemoryClipboard::new())?;
            show_stats(&engine, &store_path)?;
        }
        Some(Commands::ServeClipboard) => {
            serve_clipboard()?;
        }
    }

    Ok(())
}

fn system_clipboard() -> Result<SystemClipboard> {
    SystemClipboard::new().context("Failed to open the system clipboard")
}

fn poller(cli: &Cli) -> Poller {
    Poller::new(Duration::from_millis(cli.interval_ms))
}

/// Open the store and apply `--max-items`. Commands that never touch the system clipboard
/// pass an in-memory one.
fn open_engine<C: ClipboardAccess>(
    cli: &Cli,
    store_path: &Path,
    clipboard: C,
) -> Result<HistoryEngine<JsonFileStore, C>> {
    let store = JsonFileStore::open(store_path)
        .with_context(|| format!("Failed to open history store {}", store_path.display()))?;
    let mut engine = HistoryEngine::new(store, clipboard);

    if let Some(max_items) = cli.max_items {
        let max_items = usize::try_from(max_items).context("--max-items is out of range")?;
        engine.set_max_items(max_items).context("Failed to update max items")?;
    }

    Ok(engine)
}

fn watch<C: ClipboardAccess>(
    mut engine: HistoryEngine<JsonFileStore, C>,
    mut poller: Poller,
    for_secs: Option<u64>,
) -> Result<()> {
    let shutdown = match for_secs {
        Some(secs) => after(Duration::from_secs(secs)),
        None => never(),
    };

    engine.prime();
    info!(interval_ms = poller.interval().as_millis() as u64, "watching clipboard");
    let recorded = poller.run(&mut engine, &shutdown);

    println!("Recorded {}", item_count_label(recorded));
    Ok(())
}

fn list_entries<C: ClipboardAccess>(
    engine: &HistoryEngine<JsonFileStore, C>,
    search: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let history = engine.history().context("Failed to read history")?;
    let matches = apply_search(&history, search.unwrap_or(""));

    if matches.is_empty() {
        if history.is_empty() {
            println!("No clipboard history yet");
        } else {
            println!("No entries match");
        }
        return Ok(());
    }

    let shown = limit.unwrap_or(matches.len()).min(matches.len());
    for entry in &matches[..shown] {
        println!(
            "{}  {:>10}  {}",
            entry.id,
            format_time_ago(&entry.timestamp),
            single_line(&entry.preview)
        );
    }

    if shown < matches.len() {
        println!("... {} more", matches.len() - shown);
    }

    Ok(())
}

fn copy_entry(cli: &Cli, store_path: &Path, id: &str) -> Result<()> {
    // Look the id up before touching the system clipboard
    let lookup = open_engine(cli, store_path, MemoryClipboard::new())?;
    let Some(entry) = lookup.history()?.into_iter().find(|e| e.id == id) else {
        bail!("No entry with id {}", id);
    };
    drop(lookup);

    validate_clipboard_text(&entry.text)?;
    let mut clipboard = system_clipboard()?;

    if clipboard_owned_by_process() {
        // The selection dies with this process, so a detached copy of ourselves keeps it
        drop(clipboard);
        spawn_clipboard_server(&entry.text)?;
    } else {
        clipboard.write_text(&entry.text).context("Failed to copy entry to clipboard")?;
    }

    println!("Copied {} chars to clipboard", entry.char_count());
    Ok(())
}

// Not waited on: this process exits right after and the server outlives it
#[allow(clippy::zombie_processes)]
fn spawn_clipboard_server(text: &str) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the clip-history binary")?;
    let mut child = Command::new(exe)
        .arg("serve-clipboard")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to start clipboard server")?;

    let mut stdin = child.stdin.take().context("Clipboard server has no stdin")?;
    stdin.write_all(text.as_bytes()).context("Failed to hand text to clipboard server")?;
    debug!(pid = child.id(), "clipboard server started");
    Ok(())
}

fn serve_clipboard() -> Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("Failed to read text from stdin")?;
    validate_clipboard_text(&text)?;

    system_clipboard()?.write_text_and_wait(&text).context("Failed to serve clipboard")?;
    Ok(())
}

fn delete_entry<C: ClipboardAccess>(
    engine: &mut HistoryEngine<JsonFileStore, C>,
    id: &str,
) -> Result<()> {
    let before = engine.history()?.len();
    let after = engine.delete(id).context("Failed to delete entry")?;

    if after.len() < before {
        println!("Deleted {}", id);
    } else {
        println!("No entry with id {}; nothing deleted", id);
    }

    Ok(())
}

fn show_stats<C: ClipboardAccess>(
    engine: &HistoryEngine<JsonFileStore, C>,
    store_path: &Path,
) -> Result<()> {
    let history = engine.history().context("Failed to read history")?;
    let max_items = engine.max_items()?;
    let total_chars: usize = history.iter().map(|e| e.char_count()).sum();

    println!("Clipboard History Statistics");
    println!("============================");
    println!("Total entries: {} (max {})", history.len(), max_items);
    println!("Total characters: {}", total_chars);
    println!();
    println!("Store: {}", store_path.display());

    if let Some(oldest) = history.last() {
        println!("Oldest entry: {}", oldest.timestamp.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = history.first() {
        println!("Newest entry: {}", newest.timestamp.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}
