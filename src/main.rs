//! Blockfall terminal runner.
//!
//! One tokio task owns the driver. Keyboard events arrive from a blocking
//! reader over a channel and frame ticks come from an interval; both are
//! handled in a single `select!` loop, so every session call is serialized.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{event, terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use blockfall::core::{Session, SimpleRng};
use blockfall::engine::{Config, Driver};
use blockfall::input::{map_event, InputEvent};
use blockfall::store::StateFile;
use blockfall::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};

/// How long the reader blocks before re-checking the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const STACK_FULL: &str = "Stack full, [C] to clear";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let (width, height) = config.grid_size(cols, rows);
    let shapes = SimpleRng::new(config.seed_or_clock());

    let mut load_notice = None;
    let mut driver = match &config.state_path {
        Some(path) => {
            let store = StateFile::new(path);
            let loaded = store.load_or_new(width, height, shapes);
            if let Some(e) = &loaded.error {
                eprintln!("[Store] {:#}", e);
                load_notice = Some(format!("{:#}", e));
            } else if loaded.restored {
                eprintln!("[Store] resumed {}", path.display());
            }
            Driver::new(loaded.session, config.speed).with_store(store)
        }
        None => Driver::new(Session::new(width, height, shapes), config.speed),
    };
    driver.set_size(width, height);

    let mut term = TerminalRenderer::new();
    let result = match term.enter() {
        Ok(()) => run(&mut term, &mut driver, &config, load_notice).await,
        Err(e) => Err(e),
    };

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        eprintln!("[Blockfall] failed to restore terminal: {:#}", e);
    }

    driver.autosave();
    if let Some(e) = driver.save_error() {
        eprintln!("[Blockfall] save failed: {}", e);
    }
    result
}

async fn run(
    term: &mut TerminalRenderer,
    driver: &mut Driver,
    config: &Config,
    notice: Option<String>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let reader = spawn_reader(tx, Arc::clone(&stop));

    let result = frame_loop(term, driver, config, notice, &mut rx).await;

    stop.store(true, Ordering::Relaxed);
    drop(rx);
    let reader_result = reader.await.context("input reader panicked").and_then(|r| r);
    result.and(reader_result)
}

/// Forward mapped terminal events until `stop` is set or the loop hangs up.
fn spawn_reader(
    tx: mpsc::UnboundedSender<InputEvent>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            if !event::poll(POLL_INTERVAL).context("poll terminal events")? {
                continue;
            }
            let Some(input) = map_event(event::read().context("read terminal event")?) else {
                continue;
            };
            if tx.send(input).is_err() {
                break;
            }
        }
        Ok(())
    })
}

async fn frame_loop(
    term: &mut TerminalRenderer,
    driver: &mut Driver,
    config: &Config,
    mut notice: Option<String>,
    rx: &mut mpsc::UnboundedReceiver<InputEvent>,
) -> Result<()> {
    let mut ticker = time::interval(Duration::from_millis(config.frame_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let view = GameView::default();
    let (mut cols, mut rows) = terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(cols, rows);
    let mut composite = driver.session().composite();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                driver.tick();
                driver.session().composite_into(&mut composite);

                let hud = Hud {
                    lines: driver.session().lines_cleared(),
                    speed: driver.speed(),
                    paused: driver.paused(),
                    notice: driver
                        .save_error()
                        .or(notice.as_deref())
                        .or_else(|| driver.session().spawn_blocked().then_some(STACK_FULL)),
                };
                view.render_into(&composite, &hud, Viewport::new(cols, rows), &mut fb);
                term.draw_swap(&mut fb)?;
            }
            input = rx.recv() => match input {
                Some(InputEvent::Command(command)) => {
                    notice = None;
                    driver.apply(command);
                }
                Some(InputEvent::Resize(c, r)) => {
                    (cols, rows) = (c, r);
                    term.invalidate();
                    let (width, height) = config.grid_size(c, r);
                    driver.set_size(width, height);
                }
                Some(InputEvent::Quit) | None => return Ok(()),
            },
        }
    }
}

