//! Explorer simulator CLI
//!
//! Run the explorer animation headless, paced in real time, or streamed to a
//! Rerun viewer, and optionally export the run as JSON.

use clap::Parser;
use explorer_core::{ExplorerConfig, NullRenderer, Position, RenderAdapter, ThresholdBasis};
use explorer_sim::{
    AnimationDriver, ExplorerExport, FramePacer, RealTimePacer, RerunRenderer, RunReport,
    SimError, VirtualPacer,
};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// 3D explorer path visualizer
#[derive(Parser, Debug)]
#[command(name = "explorer-sim")]
#[command(about = "Animate a random-walking explorer with an auto-expanding viewport", long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<String>,

    /// Master seed for determinism (0 = random from time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(short, long)]
    frames: Option<u64>,

    /// Milliseconds between frames
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Initial half-width of the visible cube
    #[arg(short, long)]
    boundary: Option<f64>,

    /// Number of static landmarks
    #[arg(short, long)]
    landmarks: Option<usize>,

    /// Boundary the expansion threshold follows (current, initial)
    #[arg(short = 't', long)]
    threshold_basis: Option<ThresholdBasis>,

    /// Pace frames in wall-clock time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Stream the run to a Rerun viewer (needs the `visualization` feature)
    #[arg(long)]
    visualize: bool,

    /// Export the run to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// JSON summary on stdout
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Loads the config file (if any) and applies flag overrides.
    fn resolve_config(&self) -> Result<ExplorerConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                ExplorerConfig::from_json_str(&json)?
            }
            None => ExplorerConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(frames) = self.frames {
            config.frame_count = frames;
        }
        if let Some(interval) = self.interval_ms {
            config.frame_interval_ms = interval;
        }
        if let Some(boundary) = self.boundary {
            config.boundary_limit = boundary;
        }
        if let Some(landmarks) = self.landmarks {
            config.landmark_count = landmarks;
        }
        if let Some(basis) = self.threshold_basis {
            config.threshold_basis = basis;
        }

        // Seed 0 means "pick one"
        if config.seed == 0 {
            config.seed = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42);
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(ExplorerConfig, RunReport), SimError> {
    let config = args.resolve_config()?;
    let mut driver = AnimationDriver::new(config.clone())?;

    let mut renderer: Box<dyn RenderAdapter> = if args.visualize {
        let viewer = RerunRenderer::new("explorer_sim");
        if !viewer.is_enabled() {
            warn!("Viewer unavailable; running without rendering");
        }
        Box::new(viewer)
    } else {
        Box::new(NullRenderer)
    };

    let mut pacer: Box<dyn FramePacer> = if args.realtime {
        Box::new(RealTimePacer::new())
    } else {
        Box::new(VirtualPacer::new())
    };

    let report = driver.run(renderer.as_mut(), pacer.as_mut())?;

    if let Some(path) = &args.export {
        let export = ExplorerExport::from_report(&config, &report);
        export.write_to_file(path)?;
        info!("Exported {} frames to {}", export.frames.len(), path);
    }

    Ok((config, report))
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !args.json {
        info!("Explorer simulator v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let (config, report) = match run(&args) {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let newest = report.path.newest().copied().unwrap_or_else(Position::zeros);

    if args.json {
        let summary = serde_json::json!({
            "seed": report.seed,
            "frames_requested": report.frames_requested,
            "frames_run": report.frames_run,
            "path_length": report.path.len(),
            "expansions": report.expansions,
            "initial_boundary": report.initial_boundary.half_width(),
            "final_boundary": report.final_boundary().half_width(),
            "final_position": [newest.x, newest.y, newest.z],
            "threshold_basis": config.threshold_basis.name(),
            "stopped_early": report.stopped_early,
            "elapsed_secs": report.elapsed.as_secs_f64(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to encode summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!(
            "seed={} frames={}/{} path={} expansions={}",
            report.seed,
            report.frames_run,
            report.frames_requested,
            report.path.len(),
            report.expansions
        );
        info!(
            "boundary {} -> {} | explorer at ({:.2}, {:.2}, {:.2})",
            report.initial_boundary,
            report.final_boundary(),
            newest.x,
            newest.y,
            newest.z
        );
        if report.stopped_early {
            info!("Run ended early by the renderer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "explorer-sim",
            "--seed", "9",
            "--frames", "12",
            "--boundary", "40",
            "--threshold-basis", "initial",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.seed, 9);
        assert_eq!(config.frame_count, 12);
        assert_eq!(config.boundary_limit, 40.0);
        assert_eq!(config.threshold_basis, ThresholdBasis::Initial);
        assert_eq!(config.landmark_count, 20);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = Args::parse_from(["explorer-sim", "--boundary", "3"]);
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_zero_seed_is_replaced() {
        let args = Args::parse_from(["explorer-sim", "--seed", "0"]);
        assert_ne!(args.resolve_config().unwrap().seed, 0);
    }
}
