use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use redreader_core::{
    document::Document,
    input::QueuedInput,
    player::{ReaderConfig, TickResult},
    session::ReadingSession,
    state::DEFAULT_WPM,
    text::normalize,
};
use sha2::{Digest, Sha256};

use state_file::JsonStateFile;
use stdin_input::StdinCommands;
use terminal::TerminalRenderer;

#[path = "main/state_file.rs"]
mod state_file;
#[path = "main/stdin_input.rs"]
mod stdin_input;
#[path = "main/terminal.rs"]
mod terminal;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_STATE_FILE: &str = "redreader-state.json";
const ORP_ANCHOR_COLUMN: usize = 24;
const DOCUMENT_ID_BYTES: usize = 8;

#[derive(Debug, Parser)]
#[command(name = "redreader", version, about = "RSVP speed reader for plain text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a text file one word at a time
    Read {
        file: PathBuf,
        /// Title shown in the log; defaults to the file name
        #[arg(long)]
        title: Option<String>,
        /// Start at this speed instead of the saved one
        #[arg(long)]
        wpm: Option<u16>,
        /// JSON file holding reading positions
        #[arg(long, default_value = DEFAULT_STATE_FILE)]
        state: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TICK_MS)]
        tick_ms: u64,
        /// Play immediately without reading commands from stdin
        #[arg(long)]
        headless: bool,
    },
    /// Print display tokens with their anchor and dwell time
    Tokens {
        file: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value_t = DEFAULT_WPM)]
        wpm: u16,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Read {
            file,
            title,
            wpm,
            state,
            tick_ms,
            headless,
        } => read(&file, title, wpm, &state, tick_ms, headless),
        Command::Tokens { file, limit, wpm } => print_tokens(&file, limit, wpm),
    }
}

fn read(
    file: &Path,
    title: Option<String>,
    wpm: Option<u16>,
    state_path: &Path,
    tick_ms: u64,
    headless: bool,
) -> Result<()> {
    let title = title.unwrap_or_else(|| file_title(file));
    let document = load_document(file, &title)?;
    info!(
        "reader: {} ({} tokens) id={}",
        document.title(),
        document.len(),
        document.id()
    );

    let store = JsonStateFile::new(state_path);
    info!("reader: positions in {}", store.path().display());
    let mut session =
        ReadingSession::open(document, store, QueuedInput::new(), ReaderConfig::default());
    if let Some(wpm) = wpm {
        session.player_mut().set_speed(wpm);
    }

    let commands = if headless {
        session.player_mut().play();
        None
    } else {
        eprintln!("{}", stdin_input::HELP);
        Some(StdinCommands::spawn())
    };

    let mut renderer = TerminalRenderer::new(io::stdout(), ORP_ANCHOR_COLUMN, !headless);
    let tick = Duration::from_millis(tick_ms.max(1));
    let started = Instant::now();

    loop {
        if let Some(commands) = &commands
            && !commands.forward(session.input_mut())
        {
            break;
        }

        let now_ms = started.elapsed().as_millis() as u64;
        if session.tick(now_ms) == TickResult::RenderRequested
            && let Some(frame) = session.frame()
        {
            renderer.draw(&frame).context("failed to draw frame")?;
        }

        if headless && !session.player().is_playing() {
            break;
        }
        thread::sleep(tick);
    }

    renderer.finish().context("failed to draw frame")?;
    let position = session.player().cursor();
    if !session.close() {
        warn!("reader: final position {} was not written", position);
    }
    Ok(())
}

fn print_tokens(file: &Path, limit: Option<usize>, wpm: u16) -> Result<()> {
    let document = load_document(file, &file_title(file))?;
    let config = ReaderConfig::default();
    let wpm = config.clamp_wpm(wpm);

    let shown = limit.unwrap_or(document.len()).min(document.len());
    let rows = document.tokens().iter().zip(document.orp_indexes());
    for (index, (token, orp)) in rows.take(shown).enumerate() {
        println!(
            "{index:>6}  {orp:>2}  {:>5}ms  {token}",
            config.pacing.dwell_ms(token, wpm)
        );
    }
    if shown < document.len() {
        println!("... {} more", document.len() - shown);
    }
    Ok(())
}

fn load_document(file: &Path, title: &str) -> Result<Document> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let id = document_id(&raw);
    Document::from_text(id, title, raw)
        .with_context(|| format!("{} has nothing to read", file.display()))
}

/// Stable id derived from the normalized text, so whitespace-only edits keep
/// the saved position. The digest is fixed across toolchains.
fn document_id(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(raw).as_bytes());
    let digest = hasher.finalize();

    let mut id = String::with_capacity(DOCUMENT_ID_BYTES * 2);
    for byte in &digest[..DOCUMENT_ID_BYTES] {
        let _ = write!(id, "{byte:02x}");
    }
    id
}

fn file_title(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
