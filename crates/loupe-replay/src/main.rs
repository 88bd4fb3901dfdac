//! Loupe Replay: feed a recorded touch script through the gesture core.
//!
//! Each event is applied to a [`loupe_core::Carousel`] at its own timestamp
//! on a manual clock. The resulting frames (effect, focused index, committed
//! zoom state, transform and displayed scale) are written as JSON lines to
//! stdout or `--output`. Logs go to stderr.

mod config;
mod error;
mod replay;
mod report;
mod script;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use loupe_core::{SwipeMode, ViewportSize};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigLayer, ReplayConfig};
use crate::error::ReplayError;
use crate::replay::Replay;
use crate::script::Script;

#[derive(Parser)]
#[command(name = "loupe-replay")]
#[command(about = "Replay a touch script through the loupe gesture core")]
struct Cli {
    /// Script to replay (JSON)
    script: PathBuf,

    /// Viewport size, e.g. `375x667`
    #[arg(long, value_parser = config::parse_viewport)]
    viewport: Option<ViewportSize>,

    /// Number of items in the list
    #[arg(long)]
    items: Option<usize>,

    /// Swipe policy: `continuous` or `release-threshold`
    #[arg(long, value_parser = config::parse_mode)]
    mode: Option<SwipeMode>,

    /// Item focused before the first event
    #[arg(long)]
    start_index: Option<usize>,

    /// Run with no list attached; navigation requests are dropped
    #[arg(long)]
    detached: bool,

    /// Write frames here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `loupe_core=trace`. Defaults to RUST_LOG, then `info`.
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            viewport: self.viewport,
            item_count: self.items,
            mode: self.mode,
            start_index: self.start_index,
            detached: self.detached.then_some(true),
        }
    }
}

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let script = Script::load(&cli.script)?;
    let config = ReplayConfig::default()
        .layered(&script.header)
        .layered(&cli.layer());
    config.validate()?;

    tracing::info!(
        width = config.viewport.width,
        height = config.viewport.height,
        items = config.item_count,
        mode = ?config.mode,
        detached = config.detached,
        events = script.events.len(),
        "replaying"
    );

    let mut replay = Replay::new(&config);
    let frames = replay.run(&script.events);
    match &cli.output {
        Some(path) => report::write_frames(BufWriter::new(File::create(path)?), &frames)?,
        None => report::write_frames(std::io::stdout().lock(), &frames)?,
    }

    let summary = replay.summary();
    tracing::info!(
        frames = summary.frames,
        navigations = ?summary.navigations,
        final_index = summary.final_index,
        zoom_level = summary.final_state.zoom_level,
        "replay finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
