// SPDX-License-Identifier: MIT OR Apache-2.0
//! `levelsync` - sync visible streaming levels into a level sequence.
//!
//! Reads a session file (editor world + level sequence), adds a level
//! visibility interval for every streaming level that is visible and loaded
//! but not yet on the sequence's visibility track, and writes the session
//! back.
//!
//! ```text
//! levelsync <session.ron> [--dry-run] [--output <path>]
//! ```
//!
//! Logging follows `RUST_LOG`; the default shows the sync steps at `info`.

mod session;

use levelsync_sequencer::{sync_visible_levels, SyncOutcome};
use session::SessionFile;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const USAGE: &str = "usage: levelsync <session.ron> [--dry-run] [--output <path>]";

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct Args {
    session: PathBuf,
    dry_run: bool,
    output: Option<PathBuf>,
}

fn parse_args(args: &[&str]) -> Result<Args, String> {
    let mut session = None;
    let mut dry_run = false;
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--dry-run" | "-n" => dry_run = true,
            "--output" | "-o" => {
                let Some(path) = iter.next() else {
                    return Err(format!("{arg} needs a path"));
                };
                output = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
            path => {
                if session.is_some() {
                    return Err(format!("unexpected argument: {path}"));
                }
                session = Some(PathBuf::from(path));
            }
        }
    }

    let session = session.ok_or_else(|| USAGE.to_string())?;
    Ok(Args {
        session,
        dry_run,
        output,
    })
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("levelsync=info,levelsync_sequencer=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run(args: &Args) -> Result<(), String> {
    let mut session = SessionFile::load(&args.session).map_err(|e| e.to_string())?;
    let dry_run = args.dry_run || session.settings.dry_run;
    let output = args
        .output
        .clone()
        .or_else(|| session.settings.output.clone())
        .unwrap_or_else(|| args.session.clone());

    let outcome = sync_visible_levels(&session.scene, session.sequence.as_mut(), || {
        tracing::debug!("[Sequencer] Track refreshed");
    })
    .map_err(|e| e.to_string())?;

    let SyncOutcome::Synced(result) = outcome else {
        return Ok(());
    };
    for name in &result.failed {
        tracing::warn!("Not synced: {}", name);
    }
    if result.added.is_empty() {
        tracing::info!("Track already up to date");
        return Ok(());
    }
    if dry_run {
        tracing::info!("Dry run: not writing {:?}", output);
        return Ok(());
    }

    session.save(&output).map_err(|e| e.to_string())?;
    tracing::info!("Wrote {:?}", output);
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();

    let args = match parse_args(&arg_refs) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("levelsync: {e}");
            process::exit(2);
        }
    };

    init_logging();
    tracing::info!("Starting levelsync v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        process::exit(1);
    }
}
