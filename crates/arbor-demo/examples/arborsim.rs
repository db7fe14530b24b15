//! Run the gallery scene headless, feeding it scripted host input and printing every frame's
//! draw calls as JSON lines.

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use arbor::{EngineConfig, Ui, backend::record::RecordingBackend, event::HostEvent};
use arbor_demo::gallery::Gallery;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI flags for the simulator.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration file (TOML).
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// JSON array of host events, delivered one per frame.
    #[clap(short, long)]
    script: Option<PathBuf>,

    /// Minimum number of frames to run.
    #[clap(short, long, default_value_t = 30)]
    frames: usize,

    /// Seconds per frame.
    #[clap(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Rows in the swatch grid.
    #[clap(long, default_value_t = 3)]
    rows: usize,

    /// Columns in the swatch grid.
    #[clap(long, default_value_t = 3)]
    columns: usize,

    /// Open the dialog before the first frame.
    #[clap(long)]
    open: bool,
}

/// Run the simulator.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let script = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            HostEvent::from_script(&text)?
        }
        None => Vec::new(),
    };

    let mut ui = Ui::new(config);
    let gallery = Gallery::build(&mut ui, args.rows, args.columns)?;
    if args.open {
        gallery.open_dialog(&mut ui)?;
    }

    let frames = args.frames.max(script.len());
    info!(frames, events = script.len(), "starting simulation");
    let mut events = script.into_iter();
    let mut backend = RecordingBackend::default();
    for frame in 0..frames {
        backend.clear();
        ui.frame(args.dt, events.next(), &mut backend)?;
        let line = serde_json::json!({ "frame": frame, "ops": backend.ops() });
        println!("{line}");
    }
    info!(dialog = gallery.dialog_open(), "simulation finished");
    Ok(())
}
