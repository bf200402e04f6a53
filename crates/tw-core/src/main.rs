//! Tripwatch - runtime fault-detection monitor.
//!
//! The binary drives one monitored session over stdin: each line is a
//! JSON log event, classified against the configured detection level.
//! The first panic trips the session, raises the console alert, and
//! captures a screenshot artifact. stdout carries the session report;
//! stderr carries logs and the alert itself.

use std::io::BufRead;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use tw_common::error::ErrorCategory;
use tw_common::{format_error_human, DetectionLevel, Error, LogEvent, OutputFormat, TripRecord};
use tw_config::{resolve_settings_path, SettingsStore};
use tw_core::capture::ArtifactCapturer;
use tw_core::console::{console_hosts, ConsoleRevealHost};
use tw_core::control::LevelControl;
use tw_core::exit_codes::ExitCode;
use tw_core::logging::{init_logging, LogConfig, LogFormat};
use tw_core::overlay::AlertPresenter;
use tw_core::{Monitor, SessionState};

/// Tripwatch - in-session visual trip-wire for diagnostic log faults
#[derive(Parser)]
#[command(name = "tripwatch")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Override config directory
    #[arg(long, global = true, env = "TRIPWATCH_CONFIG_DIR")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format (human or jsonl)
    #[arg(long, global = true, default_value = "human", value_parser = parse_log_format)]
    log_format: LogFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    s.parse()
}

#[derive(Subcommand)]
enum Commands {
    /// Run a monitored session reading JSONL log events from stdin
    Watch {
        /// Detection level for this session (default: persisted setting)
        #[arg(long)]
        level: Option<DetectionLevel>,

        /// Artifact output directory (default: persisted setting)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show or set the persisted detection level
    Level {
        /// New level to persist; omit to show the current selection
        level: Option<DetectionLevel>,
    },

    /// Open the artifact output directory in the file browser
    Reveal,
}

/// Session report printed to stdout at session end.
#[derive(Debug, Serialize)]
struct WatchReport {
    tripped: bool,
    level: DetectionLevel,
    events_seen: u64,
    parse_errors: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trip: Option<TripRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<PathBuf>,
    ended_at: DateTime<Utc>,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_flags(cli.global.verbose, cli.global.quiet, cli.global.log_format);
    init_logging(&log_config);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format_error_human(&err, !cli.global.no_color));
            match err.category() {
                ErrorCategory::Config => ExitCode::ConfigError,
                _ => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(code.code());
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let settings_path = match &cli.global.config {
        Some(dir) => dir.join("settings.json"),
        None => resolve_settings_path(None).path,
    };
    let store = SettingsStore::new(&settings_path);

    match &cli.command {
        Commands::Watch { level, output_dir } => cmd_watch(cli, &store, *level, output_dir.clone()),
        Commands::Level { level } => cmd_level(cli, &store, *level),
        Commands::Reveal => cmd_reveal(&store),
    }
}

fn cmd_watch(
    cli: &Cli,
    store: &SettingsStore,
    level: Option<DetectionLevel>,
    output_dir: Option<PathBuf>,
) -> Result<ExitCode, Error> {
    let settings = store.settings()?;

    // The level is read once here and cached for the whole session.
    let level = level.unwrap_or(settings.detection_level);
    let output_dir = output_dir.unwrap_or_else(|| settings.output_dir());

    let (stream, overlay, capture) = console_hosts(!cli.global.no_color);
    let mut monitor = Monitor::new(
        stream,
        AlertPresenter::new(overlay),
        ArtifactCapturer::new(capture, &output_dir),
    );

    monitor.session_start(level);

    let mut events_seen: u64 = 0;
    let mut parse_errors: u64 = 0;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "stdin read failed; ending session");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match LogEvent::from_jsonl(&line) {
            Ok(event) => {
                events_seen += 1;
                monitor.handle_event(&event);
            }
            Err(err) => {
                parse_errors += 1;
                warn!(error = %err, "skipping malformed log event");
            }
        }
    }

    // Snapshot before session_end resets the trip references.
    let tripped = monitor.state() == SessionState::Tripped;
    let trip = monitor.trip().cloned();
    let artifact = monitor.artifact().cloned();
    monitor.session_end();

    let report = WatchReport {
        tripped,
        level,
        events_seen,
        parse_errors,
        trip,
        artifact,
        ended_at: Utc::now(),
    };

    match cli.global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            if let Some(trip) = &report.trip {
                println!("tripped: {} ({})", trip.message, trip.severity);
                if let Some(artifact) = &report.artifact {
                    println!("artifact: {}", artifact.display());
                }
            } else {
                println!("clean: {} events at level {}", report.events_seen, report.level);
            }
        }
    }

    Ok(if tripped {
        ExitCode::Tripped
    } else {
        ExitCode::Clean
    })
}

fn cmd_level(
    cli: &Cli,
    store: &SettingsStore,
    level: Option<DetectionLevel>,
) -> Result<ExitCode, Error> {
    let control = LevelControl::new(store.clone());

    if let Some(level) = level {
        control.select(level)?;
    }

    let options = control.options()?;
    match cli.global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Text => {
            for option in options {
                let mark = if option.checked { "*" } else { " " };
                println!("{} {}", mark, option.label);
            }
        }
    }

    Ok(ExitCode::Clean)
}

fn cmd_reveal(store: &SettingsStore) -> Result<ExitCode, Error> {
    let settings = store.settings()?;
    let output_dir = settings.output_dir();

    let control = LevelControl::new(store.clone());
    control.reveal(&ConsoleRevealHost, &output_dir);

    println!("{}", output_dir.display());
    Ok(ExitCode::Clean)
}
