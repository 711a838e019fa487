//! # webgl_scenes
//!
//! Evaluates one demo scene for a number of frames and writes the uniform
//! matrices and draw calls as JSON or MessagePack.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use webgl_scenes::{FrameConfig, FrameLoop, SceneConfig, SceneKind, codec};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Msgpack,
}

#[derive(Parser)]
#[command(name = "webgl_scenes", about = "Evaluate WebGL demo scenes headlessly")]
struct Args {
    /// Scene to evaluate
    #[arg(value_enum)]
    scene: SceneKind,

    /// Number of frames to compute
    #[arg(short, long, default_value_t = 1)]
    frames: u64,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    frame_rate: f32,

    /// JSON file with canvas and camera parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width override, in pixels
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height override, in pixels
    #[arg(long)]
    height: Option<f32>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut scene_config = match &args.config {
        Some(path) => SceneConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let (Some(width), Some(height)) = (args.width, args.height) {
        scene_config = scene_config.with_canvas(width, height);
    } else if args.width.is_some() || args.height.is_some() {
        anyhow::bail!("--width and --height must be given together");
    }

    let frame_config = FrameConfig {
        frame_rate: args.frame_rate,
        max_frames: args.frames,
    };
    let mut frame_loop = FrameLoop::new(args.scene.build(), frame_config, scene_config)?;
    let frames = frame_loop.run()?;

    let bytes = match args.format {
        Format::Json => codec::to_json(&frames)?.into_bytes(),
        Format::Msgpack => codec::encode(&frames)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "frames written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
