//! Terminal bloxx runner (default binary).
//!
//! crossterm for input, the framebuffer renderer from `tui_bloxx::term` for
//! output. Keys and clicks become `UiAction`s for the `App`; the loop feeds
//! measured time back into it every tick.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use tui_bloxx::app::App;
use tui_bloxx::config::{Args, ABOUT};
use tui_bloxx::core::SimpleRng;
use tui_bloxx::engine::GridEngine;
use tui_bloxx::input::{handle_key_event, handle_mouse_event, handle_prompt_key};
use tui_bloxx::logging;
use tui_bloxx::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_bloxx::types::{UiAction, TICK_MS};

fn main() -> Result<()> {
    let args = Args::parse();
    if args.about {
        println!("{ABOUT}");
        return Ok(());
    }
    if args.log {
        logging::init_file(Path::new(logging::LOG_FILE))?;
    }

    let mut app = build_app(&args);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn build_app(args: &Args) -> App<SimpleRng> {
    let seed = args.seed_or_random();
    info!(seed, scores = %args.scores.display(), "starting");

    let engine = GridEngine::new(SimpleRng::new(seed));
    let app = App::new(engine, args.scores.clone(), args.player_name());

    let help_path = args.help_path();
    match std::fs::read_to_string(&help_path) {
        Ok(text) => app.with_help_text(&text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => app,
        Err(err) => {
            warn!(path = %help_path.display(), %err, "could not read help text");
            app
        }
    }
}

fn run(term: &mut TerminalRenderer, app: &mut App<SimpleRng>, args: &Args) -> Result<()> {
    let view = GameView::default().with_grid(args.show_border);
    let mut throttle = RenderThrottle::default();
    let mut fb = FrameBuffer::new(0, 0);

    let start = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut viewport = current_viewport();

    loop {
        // Render.
        let now_ms = start.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.view_fingerprint(), app.is_animating()) {
            view.render_into(app.snapshot(), &app.hud(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.prompt_active() {
                        handle_prompt_key(key)
                    } else {
                        handle_key_event(key)
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse)
                    .and_then(|(x, y)| view.hit_test(viewport, x, y))
                    .map(UiAction::SelectAt),
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.invalidate();
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                app.handle(action);
            }
            if app.should_quit() {
                info!(
                    cleared = app.engine().total_cleared(),
                    moves = app.engine().moves_made(),
                    "quit"
                );
                return Ok(());
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
