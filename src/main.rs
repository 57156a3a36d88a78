//! LivreMente - Entry Point
//!
//! Initializes logging and the terminal, opens the progression session for
//! the requested user and runs the UI loop.

use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use livremente::audio::AudioManager;
use livremente::feedback::{FeedbackEmitter, MonotonicClock};
use livremente::profile::{JsonProfileStore, LocalStorage, UserId};
use livremente::ui::App;
use livremente::{ProgressionConfig, Session};

/// Target frames per second for the UI loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

const DEFAULT_USER: &str = "local";

fn main() -> Result<()> {
    // Log to a file so output doesn't tear the TUI
    let builder_env = env_logger::Env::default().default_filter_or("info");
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("livremente.log")
    {
        Ok(log_file) => env_logger::Builder::from_env(builder_env)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .init(),
        Err(_) => env_logger::Builder::from_env(builder_env)
            .filter_level(log::LevelFilter::Off)
            .init(),
    }

    log::info!("Starting LivreMente v{}", env!("CARGO_PKG_VERSION"));

    let user_arg = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_USER.to_string());
    let user = UserId::new(user_arg).context("invalid user id")?;

    let config = ProgressionConfig::load();
    let storage = LocalStorage::open_default();
    log::info!("Data directory: {}", storage.root().display());

    let feedback = FeedbackEmitter::new(
        config.feedback,
        Box::new(MonotonicClock::new()),
        Box::new(AudioManager::from_settings(&config.sound)),
    );
    let session = Session::open(
        user,
        config,
        Box::new(JsonProfileStore::new(storage.clone())),
        feedback,
    );
    let mut app = App::new(session, storage);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }
    if app.session().has_unsaved_progress() {
        log::warn!("Exiting with progress that could not be saved");
    }

    log::info!("LivreMente shut down cleanly");
    result
}

/// Main UI loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Drain pending input
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                // Only handle key press events, not releases
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_input(key) {
                        Ok(true) => return Ok(()),
                        Ok(false) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        app.update();

        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }
}
