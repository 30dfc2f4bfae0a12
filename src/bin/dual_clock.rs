//! Dual Clock
//!
//! Runs the clock against the text-mode screen driver and shows the screens
//! in the terminal, redrawing whenever the visible text changes.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dual_clock::app::{CliArgs, ClockApp, Config};
use dual_clock::clock::SystemClock;
use dual_clock::lifecycle::ScriptedHost;

/// Clear the terminal and home the cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> dual_clock::Result<()> {
    let config = Config::load_with_args(args)?;

    let mut host: ScriptedHost = args.script.as_deref().unwrap_or("").parse()?;
    if let Some(frames) = args.frames {
        host = host.with_frame_limit(frames);
    }

    let driver = config.text_mode_driver();
    let clock = SystemClock::new(config.utc_offset_secs)?;
    let mut app = ClockApp::init(&config, driver, host, clock)?;

    let stdout = io::stdout();
    let mut shown = String::new();
    app.run_with(|console| {
        let text = console.presenter().driver().render();
        if text != shown {
            let mut out = stdout.lock();
            write!(out, "{}{}", CLEAR_SCREEN, text)?;
            out.flush()?;
            shown = text;
        }
        Ok(())
    })?;

    let console = app.shutdown();
    tracing::debug!(redraws = console.presenter().redraw_count(), "exiting");
    Ok(())
}
