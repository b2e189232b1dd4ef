//! Terminal runner (default binary).
//!
//! Title screen, then a fixed-step game loop: crossterm for input, the
//! framebuffer renderer for output. `TETRIS_OVERLORD_BOSS` skips the title.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tetris_overlord::core::{validate_catalog, GameSnapshot, GameState};
use tetris_overlord::input::{handle_key_event, mode_choice, should_quit, ModeChoice};
use tetris_overlord::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris_overlord::RunConfig;

fn main() -> Result<()> {
    validate_catalog()?;
    let config = RunConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let boss_mode = match config.boss_mode {
        Some(boss) => boss,
        None => match title_screen(term, &view, &mut fb)? {
            Some(choice) => choice == ModeChoice::Boss,
            None => return Ok(()),
        },
    };

    let mut state = GameState::new(config.game_config(config.resolve_seed(), boss_mode));
    let mut snap = GameSnapshot::default();
    let tick = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        state.snapshot_into(&mut snap);
        view.render_into(&snap, viewport(), &mut fb);
        term.present(&fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        state.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            // Whole milliseconds only; a slow frame is caught up in one step.
            let dt = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            // A lost session stays on its overlay until restart or quit.
            let _ = state.tick(dt);
            state.drain_events();
        }
    }
}

/// Show the mode picker until a choice is made. `None` means quit.
fn title_screen(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
) -> Result<Option<ModeChoice>> {
    loop {
        view.render_title(viewport(), fb);
        term.present(fb)?;

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(None);
                }
                if let Some(choice) = mode_choice(key) {
                    return Ok(Some(choice));
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
