mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ghost_chase::app::App;
use ghost_chase::asset;
use ghost_chase::config::GameConfig;
use ghost_chase::error::GameError;
use ghost_chase::input::{Control, KeyTracker};

use display::{TerminalSurface, MIN_TERM_COLS, MIN_TERM_ROWS};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// once OS key-repeat kicks in (≥ 15 Hz) a window of 8 frames (≈130 ms) keeps
/// the key held.  The initial repeat delay (typically 250–600 ms) is longer,
/// so on such terminals a held arrow moves, pauses briefly, then resumes.
const HOLD_WINDOW: u64 = 8;

const IMAGE_ENV: &str = "GHOST_CHASE_OBSTACLE_IMAGE";
const DEFAULT_IMAGE: &str = "assets/tsai.png";

fn obstacle_image_path() -> PathBuf {
    std::env::var_os(IMAGE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// stdout is the game screen, so logs go to a file in the temp directory.
/// Filtering follows `RUST_LOG` and defaults to `info`.
fn init_tracing() {
    let path = std::env::temp_dir().join("ghost_chase.log");
    let Ok(file) = File::create(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Up => Some(Control::Up),
        KeyCode::Down => Some(Control::Down),
        KeyCode::Left => Some(Control::Left),
        KeyCode::Right => Some(Control::Right),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: key events only update the `KeyTracker`; each frame takes one
/// level-state sample from it, so any combination of arrows can be held
/// together.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<(), GameError> {
    let config = GameConfig::default();
    config.validate()?;

    let loader = asset::spawn_loader(obstacle_image_path());
    let mut app = App::new(config, TerminalSurface::new(out), thread_rng(), loader);
    let mut keys = KeyTracker::new(HOLD_WINDOW);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        info!("quit requested");
                        return Ok(());
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        info!("quit requested");
                        return Ok(());
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => keys.request_reset(),
                    _ => {
                        if let Some(control) = control_for(code) {
                            keys.press(control, frame);
                        }
                    }
                },
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    if let Some(control) = control_for(code) {
                        keys.press(control, frame);
                    }
                }
                // Release: drop key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    if let Some(control) = control_for(code) {
                        keys.release(control);
                    }
                }
            }
        }

        let input = keys.sample(frame);
        app.run_frame(&input, frame_start)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_tracing();

    let (cols, rows) = terminal::size()?;
    if cols < MIN_TERM_COLS || rows < MIN_TERM_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            need_cols: MIN_TERM_COLS,
            need_rows: MIN_TERM_ROWS,
        });
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx);
    if let Err(err) = &result {
        error!(%err, "game loop failed");
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
