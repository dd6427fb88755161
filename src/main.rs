//! Terminal Fronton runner.
//!
//! Owns the frame loop: poll keys until the next tick, step the match,
//! render a snapshot. Configuration comes from `FRONTON_*` environment
//! variables (a `.env` file is honoured).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use tui_fronton::audio::AudioOutput;
use tui_fronton::core::{MatchSnapshot, MatchState, StepOutcome};
use tui_fronton::input::KeyTracker;
use tui_fronton::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_fronton::types::TICK_MS;
use tui_fronton::{logging, AppConfig};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    logging::init(config.log_path.as_deref())?;
    info!("Fronton v{}", env!("CARGO_PKG_VERSION"));

    // Missing sound files abort before the terminal is touched.
    let mut audio = AudioOutput::start(&config.audio)?;

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &config, &mut audio));

    // Always try to restore terminal state.
    let _ = term.exit();
    audio.shutdown();
    info!("bye");
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, audio: &mut AudioOutput) -> Result<()> {
    let match_config = config.match_config();
    info!(
        seed = match_config.seed,
        bounds = ?match_config.paddle_bounds,
        enhanced_keys = term.enhanced_keys(),
        "starting session"
    );

    let mut game = MatchState::with_config(match_config);
    game.spawn_default_ball();

    let view = GameView::default();
    let mut keys = KeyTracker::new();
    let mut snap = MatchSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut next_tick = Instant::now();

    loop {
        // Input until the next tick is due.
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => keys.handle_key_event(key),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
        if Instant::now() < next_tick {
            continue;
        }

        next_tick += tick_duration;
        // Do not try to catch up after a stall (e.g. a suspended process).
        let now = Instant::now();
        if next_tick < now {
            next_tick = now;
        }

        if game.step(keys.frame_input(), audio) == StepOutcome::Quit {
            return Ok(());
        }

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
