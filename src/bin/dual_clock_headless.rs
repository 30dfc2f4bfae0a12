//! Dual Clock Headless Runner
//!
//! Runs a fixed number of clock frames against the text-mode screen
//! driver at a fixed instant and prints the final console snapshot. Useful
//! for checking layout and lifecycle scripts without a display.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dual_clock::app::{ClockApp, Config};
use dual_clock::clock::{CalendarTime, FixedClock};
use dual_clock::lifecycle::ScriptedHost;

#[derive(Parser, Debug)]
#[command(name = "dual-clock-headless")]
#[command(version)]
#[command(about = "Render clock frames without a display and print a snapshot", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 1)]
    frames: u64,

    /// Lifecycle script, e.g. "release@1,acquire@2"
    #[arg(short, long, default_value = "")]
    script: String,

    /// Instant to display, in seconds since the UNIX epoch
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    at: i64,

    /// Run the shutdown sequence before taking the snapshot
    #[arg(long)]
    shutdown: bool,

    /// Output snapshot as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.interval_ms = 0;
    config.validate()?;

    let host: ScriptedHost = args.script.parse()?;
    let host = host.with_frame_limit(args.frames);
    let at = CalendarTime::from_unix(args.at, 0)
        .ok_or_else(|| format!("instant {} is out of range", args.at))?;
    let clock = FixedClock(at);

    let mut app = ClockApp::init(&config, config.text_mode_driver(), host, clock)?;
    app.run()?;

    let snapshot = if args.shutdown {
        app.shutdown().snapshot()
    } else {
        app.console().snapshot()
    };

    if args.json {
        Ok(snapshot.to_json()?)
    } else {
        Ok(snapshot.to_text())
    }
}
