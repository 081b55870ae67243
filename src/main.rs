//! flick-gestures - replay recorded touch traces through the gesture recognizer
//!
//! Prints one line per recognized gesture, either as text or JSON.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flick_gestures::config::Settings;
use flick_gestures::replay::{self, Recognized};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flick-gestures")]
#[command(about = "Replay a touch trace through the Flick gesture recognizer", long_about = None)]
struct Args {
    /// Touch trace (JSON lines)
    trace: PathBuf,

    /// Settings file (defaults to $XDG_CONFIG_HOME/flick/gestures.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay at recorded speed on a real event loop
    #[arg(short, long)]
    realtime: bool,

    /// Print gestures as JSON lines
    #[arg(short, long)]
    json: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let log_dir = state_dir();
    std::fs::create_dir_all(&log_dir).ok();
    install_panic_hook(log_dir.join("crash.log"));

    let args = Args::parse();

    // File appender - rotates daily
    let file_appender = rolling::daily(&log_dir, "gestures.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Quiet by default, verbose with --debug
    let default_filter = if args.debug {
        "debug,flick_gestures=debug"
    } else {
        "warn,flick_gestures=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!(log_path = %log_dir.display(), "flick-gestures starting");

    let settings = match &args.config {
        Some(path) => Settings::load(path),
        None => Settings::load_default(),
    }
    .context("Failed to load gesture settings")?;

    let events = replay::load_trace(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;

    let recognized = if args.realtime {
        replay::replay_realtime(&events, &settings.gestures)?
    } else {
        replay::replay(&events, &settings.gestures)
    };

    info!(count = recognized.len(), "Replay finished");
    print_recognized(&recognized, args.json)
}

/// Log directory: $XDG_STATE_HOME/flick, ~/.local/state/flick or /tmp/flick
fn state_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("flick")
}

/// Append panics to the crash log before the process dies
fn install_panic_hook(crash_log: PathBuf) {
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&crash_log) {
            let _ = writeln!(f, "[{}] PANIC: {}", chrono::Local::now(), panic_info);
        }
    }));
}

fn print_recognized(recognized: &[Recognized], json: bool) -> Result<()> {
    for r in recognized {
        if json {
            println!("{}", serde_json::to_string(r)?);
        } else {
            println!("{}", r);
        }
    }
    Ok(())
}
