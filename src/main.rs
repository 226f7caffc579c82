mod event;
mod scheduler;
mod session;
mod timer;
mod ui;

use std::fs::File;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as ct_event, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::event::AppEvent;
use crate::scheduler::Scheduler;
use crate::session::SessionPolicy;
use crate::timer::{Action, TimerEngine};

#[derive(Parser)]
#[command(name = "pomo-tui", version, about = "Pomodoro interval timer TUI")]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_logging();

    // ── Terminal setup ──────────────────────────────────────────
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialise terminal")?;

    // Panic hook: restore terminal before printing the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // ── Run ─────────────────────────────────────────────────────
    let result = run(&mut terminal);

    // ── Terminal teardown ───────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

/// Log to a file in the temp dir; the TUI owns stdout and stderr.
fn init_logging() {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let path = std::env::temp_dir().join("pomo-tui.log");
    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(LevelFilter::Info, log_config, log_file);
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let engine = TimerEngine::new(SessionPolicy::default());
    let size = terminal.size()?;
    let mut state = engine.initial_state(size.width, size.height);
    let mut scheduler = Scheduler::new();
    let (tx, rx) = mpsc::channel::<AppEvent>();

    log::info!("starting {}s work session, stopped", state.duration_secs);

    // ── Keyboard + resize thread ────────────────────────────────
    thread::spawn(move || loop {
        match ct_event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(Event::Resize(w, h)) => {
                if tx.send(AppEvent::Resize(w, h)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("terminal input failed: {err}");
                break;
            }
        }
    });

    // ── Main event loop ─────────────────────────────────────────
    terminal.draw(|frame| ui::draw(frame, &state))?;

    loop {
        let mut batch = Vec::new();
        match rx.recv_timeout(scheduler.timeout(Instant::now())) {
            Ok(event) => batch.push(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        let now = Instant::now();
        batch.extend(std::iter::from_fn(|| scheduler.pop_due(now)));

        for event in batch {
            let Some(event) = to_timer_event(event) else {
                continue;
            };
            let (next, action) = engine.update(state, event);
            state = next;
            match action {
                Some(Action::ScheduleTick(delay)) => {
                    scheduler.schedule(Instant::now(), delay, || AppEvent::Tick);
                }
                Some(Action::Terminate) => {
                    log::info!("quit requested");
                    return Ok(());
                }
                None => {}
            }
        }

        terminal.draw(|frame| ui::draw(frame, &state))?;
    }

    Ok(())
}

/// Translate a loop event into timer input. `None` for keys the timer
/// never sees (releases, repeats, unmapped chords).
fn to_timer_event(event: AppEvent) -> Option<timer::Event> {
    match event {
        AppEvent::Tick => Some(timer::Event::Tick),
        AppEvent::Resize(width, height) => Some(timer::Event::Resize { width, height }),
        AppEvent::Key(key) => map_key(key).map(timer::Event::KeyPress),
    }
}

fn map_key(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        // Raw mode swallows SIGINT, so treat Ctrl-C as quit.
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some('q'),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(c),
        _ => None,
    }
}
