//! Terminal Tetris runner (default binary).
//!
//! Crossterm for input, the framebuffer renderer for output, and a fixed 16ms tick
//! feeding a monotonic millisecond clock into the engine.

use std::cell::Cell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use happy_tetris::core::{EngineConfig, GameSnapshot, SimpleRng};
use happy_tetris::engine::{EngineEvent, GameEngine};
use happy_tetris::input::{command_for_key, is_help_key, is_press, should_quit};
use happy_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use happy_tetris::types::{SessionState, TICK_MS};

#[derive(Debug, Parser)]
#[command(version, about = "Tetris in the terminal")]
struct Cli {
    #[arg(long, value_name = "FILE", help = "JSON engine config (board size, seed)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Piece RNG seed; defaults to the system clock")]
    seed: Option<u32>,

    #[arg(long, value_name = "FILE", help = "Write logs to FILE (RUST_LOG sets the filter)")]
    log: Option<PathBuf>,

    #[arg(long, help = "Board width in cells")]
    width: Option<u8>,

    #[arg(long, help = "Board height in cells")]
    height: Option<u8>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let seed = config.seed.unwrap_or_else(seed_from_clock);
    let board = config.board()?;
    info!(
        width = config.board_width,
        height = config.board_height,
        seed,
        "starting"
    );
    let engine = GameEngine::with_source(board, SimpleRng::new(seed));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; stdout belongs to the game screen.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}

/// Config file (if any), then command-line overrides.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(width) = cli.width {
        config.board_width = width;
    }
    if let Some(height) = cli.height {
        config.board_height = height;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid board size")?;
    Ok(config)
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut engine: GameEngine) -> Result<()> {
    // Redraw only after the engine reports a change (or the terminal is resized).
    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    engine.subscribe(move |event| {
        if event == EngineEvent::StateChanged {
            flag.set(true);
        }
    });
    engine.subscribe(|event| match event {
        EngineEvent::StateChanged => {}
        EngineEvent::LinesCleared(n) => debug!(lines = n, "lines cleared"),
        other => debug!(event = ?other, "engine event"),
    });

    let mut view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut next_tick = clock + tick;

    loop {
        if dirty.replace(false) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.present(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        info!(score = engine.score(), "quit");
                        return Ok(());
                    }
                    if is_help_key(key) {
                        view.set_help(!view.help_visible());
                        // Opening the key list pauses a running game.
                        if view.help_visible() && engine.state() == SessionState::Playing {
                            engine.toggle_pause();
                        }
                        dirty.set(true);
                    } else if let Some(command) = command_for_key(key) {
                        engine.apply(command);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty.set(true);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            next_tick = now + tick;
            engine.update(clock.elapsed().as_millis() as u64);
        }
    }
}
