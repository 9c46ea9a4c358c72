mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use click_shooter::compute::{activate, blank_state, tick, track_pointer};
use click_shooter::config::{Cli, Config};
use click_shooter::entities::GameState;

use display::Viewport;

/// Pointer step for keyboard steering, in playfield units.
const KEY_NUDGE: f32 = 20.0;

enum Flow {
    Continue,
    Quit,
}

/// Apply one terminal event to the session.
fn handle_event(
    event: Event,
    state: GameState,
    view: &mut Viewport,
    config: &Config,
    now_ms: u64,
) -> (GameState, Flow) {
    match event {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) if kind != KeyEventKind::Release => {
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => (state, Flow::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    (state, Flow::Quit)
                }
                KeyCode::Char(' ') | KeyCode::Enter => (activate(&state, now_ms), Flow::Continue),
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    let x = (state.player.target_x - KEY_NUDGE).max(0.0);
                    (track_pointer(&state, x), Flow::Continue)
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    let x = (state.player.target_x + KEY_NUDGE).min(state.width);
                    (track_pointer(&state, x), Flow::Continue)
                }
                _ => (state, Flow::Continue),
            }
        }
        Event::Mouse(MouseEvent { kind, column, .. }) => {
            let x = view.column_to_x(column);
            match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    (track_pointer(&state, x), Flow::Continue)
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    let state = activate(&track_pointer(&state, x), now_ms);
                    (state, Flow::Continue)
                }
                _ => (state, Flow::Continue),
            }
        }
        Event::Resize(cols, rows) => {
            *view = Viewport::new(cols, rows, config.width, config.height);
            (state, Flow::Continue)
        }
        _ => (state, Flow::Continue),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Frame scheduler: drains input, ticks while a session is running, renders.
/// Ticking stops as soon as the session is over; only an activate resumes it.
fn game_loop<W: Write>(out: &mut W, config: &Config, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let mut view = Viewport::new(cols, rows, config.width, config.height);
    let mut state = blank_state(config.width, config.height);
    let clock = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let (next, flow) = handle_event(ev, state, &mut view, config, now_ms);
            state = next;
            if let Flow::Quit = flow {
                info!(score = state.score, "quit");
                return Ok(());
            }
        }

        if state.is_playing() {
            state = tick(&state, state.player.target_x, now_ms, &mut rng);
        }

        display::render(out, &view, &state).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config)?;
    info!(width = config.width, height = config.height, seed = ?config.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &config, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
