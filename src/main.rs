//! Terminal Blocky runner (default binary).
//!
//! A reader thread turns terminal key events into key transitions and queues
//! them; this thread drains the queue, steps the engine at a fixed rate and
//! draws the settled snapshot after each tick.
//!
//! Usage: `blocky [CONFIG.toml]`

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use blocky::config::Config;
use blocky::core::{Engine, Snapshot, Status};
use blocky::input::{channel, spawn_reader, KeyQueue, ReleaseTimeout};
use blocky::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Upper bound on catch-up steps after a stall, so a long pause does not
/// fast-forward the game.
const MAX_CATCH_UP_STEPS: u32 = 5;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (config, path) = Config::discover(std::env::args_os().nth(1).map(Into::into))
        .context("loading configuration")?;
    match &path {
        Some(p) => log::info!("using config {}", p.display()),
        None => log::info!("no config file, using defaults"),
    }
    let table = config
        .rotation_table()
        .context("loading rotation data")?;
    let seed = config.seed_or_clock();
    log::info!("seed {seed}");
    let engine = Engine::new(table, config.attributes, seed);

    let (sender, queue) = channel();
    let mut term = TerminalRenderer::new();
    term.enter()?;
    spawn_reader(sender, ReleaseTimeout::new(config.key_release_timeout()))
        .context("starting input thread")?;

    let result = run(&mut term, engine, &queue, config.tick_duration());

    // Always try to restore terminal state.
    let _ = term.exit();
    let lines = result?;
    println!("Lines cleared: {lines}");
    Ok(())
}

/// Play until game over or quit; returns the number of lines cleared.
fn run(
    term: &mut TerminalRenderer,
    mut engine: Engine,
    queue: &KeyQueue,
    tick: Duration,
) -> Result<u64> {
    let view = GameView::default();
    let mut snap = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick = Instant::now() + tick;

    loop {
        let mut steps = 0;
        while Instant::now() >= next_tick {
            next_tick += tick;
            steps += 1;
            if steps > MAX_CATCH_UP_STEPS {
                next_tick = Instant::now() + tick;
                break;
            }

            let drained = queue.drain_into(&mut engine);
            if drained.quit || drained.disconnected {
                return Ok(engine.lines_cleared());
            }
            if engine.step() == Status::GameOver {
                draw(term, &view, &engine, &mut snap, &mut fb)?;
                log::info!(
                    "game over after {} frames, {} lines",
                    engine.frame(),
                    engine.lines_cleared()
                );
                std::thread::sleep(Duration::from_secs(1));
                return Ok(engine.lines_cleared());
            }
        }

        if steps > 0 {
            draw(term, &view, &engine, &mut snap, &mut fb)?;
        }
        std::thread::sleep(next_tick.saturating_duration_since(Instant::now()));
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    engine: &Engine,
    snap: &mut Snapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    engine.snapshot_into(snap);
    view.render_into(snap, Viewport::new(w, h), fb);
    term.draw(fb)
}
