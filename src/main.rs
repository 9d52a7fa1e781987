//! Replay classified overhead camera frames into a fused map.
//!
//! Loads a Drishti config, streams one image per camera through the frame
//! handoff from loader threads, runs a few update ticks and writes the result
//! in ROS map_server format.
//!
//! Usage:
//!   drishti-replay --config configs/drishti.yaml \
//!       --frame ceiling_north=frames/north.png \
//!       --frame ceiling_south=frames/south.png \
//!       --output output/fused
//!
//! Enable debug logging to see per-camera fusion summaries:
//!   RUST_LOG=debug drishti-replay ...

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use log::{error, info};

use drishti::config::DrishtiConfig;
use drishti::io::{export_ros_map, load_frame};

/// Overhead camera replay
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (default: configs/drishti.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera frame as `<camera id>=<image path>`; repeat per camera
    #[arg(short, long = "frame", value_parser = parse_frame_arg)]
    frames: Vec<(String, PathBuf)>,

    /// Output path without extension (writes .pgm and .yaml)
    #[arg(short, long, default_value = "./output/fused")]
    output: PathBuf,

    /// Number of update ticks to run
    #[arg(long, default_value = "1")]
    ticks: usize,
}

fn parse_frame_arg(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => {
            Ok((id.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected <camera id>=<image path>, got '{}'", arg)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> drishti::Result<()> {
    let config = match &args.config {
        Some(path) => DrishtiConfig::load(path)?,
        None => DrishtiConfig::load_default()?,
    };

    let layer = config.build_layer("overhead_cameras")?;
    info!(
        "Loaded {} cameras ({:?} fusion)",
        layer.cameras().len(),
        config.fusion.mode
    );

    // Resolve every sender up front so a bad id fails before any work
    let mut jobs = Vec::with_capacity(args.frames.len());
    for (id, path) in &args.frames {
        jobs.push((id.clone(), path.clone(), layer.sender(id)?));
    }

    let mut map = config.to_layered_map();
    map.add_layer(layer);

    let loaders: Vec<_> = jobs
        .into_iter()
        .map(|(id, path, sender)| {
            thread::spawn(move || -> drishti::Result<()> {
                let image = load_frame(&path)?;
                info!("Camera '{}': loaded {}", id, path.display());
                sender.send_resized(image)?;
                Ok(())
            })
        })
        .collect();

    for loader in loaders {
        match loader.join() {
            Ok(result) => result?,
            Err(_) => error!("Frame loader thread panicked"),
        }
    }

    for tick in 0..args.ticks {
        let report = map.update();
        let total = report.total();
        info!(
            "Tick {}: {} cameras fused, {} free, {} occupied{}",
            tick,
            total.cameras_fused,
            total.cells_free,
            total.cells_occupied,
            report
                .resized_to
                .map(|s| format!(", map resized to {}x{}", s.width, s.height))
                .unwrap_or_default()
        );
        if let Some(reason) = total.skipped {
            info!("Tick {}: skipped ({:?})", tick, reason);
        }
    }

    if map.layer("overhead_cameras").is_some_and(|l| !l.enabled()) {
        info!("Camera layer is disabled; map left unchanged");
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    export_ros_map(map.grid(), &args.output)?;
    Ok(())
}
