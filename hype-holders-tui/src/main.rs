/// HYPE Holder Dashboard
///
/// Terminal view of holder clusters over the seeded record set.
///
/// Configure via SPOT_WHALE_FLOOR, SPOT_MID_FLOOR, PERP_WHALE_OI_FLOOR,
/// PERP_MID_OI_FLOOR, HYPE_SEED and HYPE_TUI_LOG.
use std::{error::Error, fs::File, io, sync::Mutex, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hype_holders::{ThresholdConfig, seed::seed_records};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

mod app;
mod ui;

use app::App;

const DEFAULT_SEED: u64 = 42;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Log to the file named by HYPE_TUI_LOG, never to the terminal being drawn on.
fn init_logging() -> Result<(), Box<dyn Error>> {
    let Ok(path) = std::env::var("HYPE_TUI_LOG") else {
        return Ok(());
    };

    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Get the RNG seed from HYPE_SEED env var (default: 42)
fn get_seed() -> u64 {
    match std::env::var("HYPE_SEED") {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(value = %raw, "invalid HYPE_SEED, using default");
            DEFAULT_SEED
        }),
        Err(_) => DEFAULT_SEED,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let seed = get_seed();
    let thresholds = ThresholdConfig::from_env_or_default();
    let records = seed_records(seed);
    info!(seed, records = records.len(), ?thresholds, "starting dashboard");

    let mut app = App::new(records, thresholds);

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    while !app.should_quit() {
        terminal.draw(|f| ui::render_ui(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(view = %app.active(), "dashboard closed");
    Ok(())
}
