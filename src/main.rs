mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_barrage::compute::init_state;
use sky_barrage::consts::{PLAY_HEIGHT, PLAY_WIDTH, TICKS_PER_SECOND};
use sky_barrage::game_loop::{run, InputSource, RunOutcome, SleepPacer};
use sky_barrage::{GameConfig, HeldKeys, Key, TickInput};

use display::TerminalSink;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 6 ticks (120 ms at
/// 50 ticks/s) is refreshed before it expires.
const HOLD_WINDOW: u64 = 6;

#[derive(Parser, Debug)]
#[command(name = "sky_barrage")]
#[command(about = "Terminal arcade shooter: dodge the bombs, down the invaders")]
struct Cli {
    /// Play-area width in world units
    #[arg(long, default_value_t = PLAY_WIDTH)]
    width: f32,

    /// Play-area height in world units
    #[arg(long, default_value_t = PLAY_HEIGHT)]
    height: f32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = TICKS_PER_SECOND)]
    tps: u32,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            width: self.width,
            height: self.height,
            ticks_per_second: self.tps,
            seed: self.seed.unwrap_or(defaults.seed),
            ..defaults
        }
    }
}

/// The terminal is in raw alternate-screen mode while playing, so logs go to
/// a file. Without one, logging stays off unless RUST_LOG asks for it.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            if !rust_log_set {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        None if !rust_log_set => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    builder.try_init().context("initialising logger")?;
    Ok(())
}

// ── Keyboard input ────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Gravity),
        KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::Up),
            's' => Some(Key::Down),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            ' ' => Some(Key::Fire),
            'f' => Some(Key::FanModifier),
            'e' => Some(Key::Emp),
            'i' => Some(Key::Invincible),
            '1' => Some(Key::Shield),
            'q' => Some(Key::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Turns the stream of terminal key events into one `TickInput` per tick.
///
/// Instead of acting on each key event individually, we keep a `key_frame`
/// map recording the tick of the last press/repeat event for every key.
/// Keys seen within `HOLD_WINDOW` ticks count as held. Terminals with the
/// keyboard-enhancement protocol also send releases, which drop the key at
/// once.
struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        TerminalInput {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }

    fn held(&self) -> HeldKeys {
        let mut held = HeldKeys::default();
        for (code, &seen) in &self.key_frame {
            if self.frame.saturating_sub(seen) < HOLD_WINDOW {
                if let Some(key) = map_key(*code) {
                    held.set(key, true);
                }
            }
        }
        held
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> TickInput {
        self.frame += 1;
        let mut input = TickInput::default();
        let mut shifted_fire = false;

        // Drain all pending input events (non-blocking)
        loop {
            let event = match self.rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("keyboard reader stopped, quitting");
                    input.quit = true;
                    break;
                }
            };
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        input.quit = true;
                        continue;
                    }
                    if let Some(key) = map_key(code) {
                        if key == Key::Fire && modifiers.contains(KeyModifiers::SHIFT) {
                            shifted_fire = true;
                        }
                        input = input.press(key);
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        input.held = self.held();
        if shifted_fire {
            input.held.fan_modifier = true;
        }
        input
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;
    init_logging(cli.log_file.as_deref())?;
    log::info!(
        "starting: {}x{} play area, {} ticks/s, seed {}",
        config.width,
        config.height,
        config.ticks_per_second,
        config.seed
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
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

    let result = play(&mut out, rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();

    match result? {
        RunOutcome::Defeated { score, ticks } => {
            println!("Shot down after {ticks} ticks. Final score: {score}");
        }
        RunOutcome::Quit { score, .. } => println!("Final score: {score}"),
    }
    Ok(())
}

fn play<W: Write>(
    out: &mut W,
    rx: mpsc::Receiver<Event>,
    config: &GameConfig,
) -> Result<RunOutcome> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut sink = TerminalSink::new(out, cols, rows, Vec2::new(config.width, config.height));
    let mut input = TerminalInput::new(rx);
    let mut pacer = SleepPacer::new(config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut state = init_state(config);
    run(&mut state, &mut input, &mut sink, &mut pacer, &mut rng)
}
