//! Animation driver - runs the per-frame loop against a renderer.

use crate::context::SimContext;
use crate::error::SimError;
use crate::pacing::{FramePacer, VirtualPacer};

use explorer_core::{
    Boundary, Explorer, ExplorerConfig, FrameControl, LandmarkSet, NullRenderer, Path,
    RenderAdapter, RenderStyle,
};
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Master seed used
    pub seed: u64,

    /// Frames actually executed
    pub frames_run: u64,

    /// Frames requested by the configuration
    pub frames_requested: u64,

    /// Static landmarks shown during the run
    pub landmarks: LandmarkSet,

    /// Final path (length = frames_run + 1)
    pub path: Path,

    /// Boundary before the first frame
    pub initial_boundary: Boundary,

    /// Boundary after each frame, in frame order
    pub boundary_history: Vec<Boundary>,

    /// Number of frames in which the viewport grew
    pub expansions: u64,

    /// True if the renderer ended the run before the frame budget
    pub stopped_early: bool,

    /// Virtual time covered by the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Boundary after the last executed frame.
    pub fn final_boundary(&self) -> Boundary {
        self.boundary_history
            .last()
            .copied()
            .unwrap_or(self.initial_boundary)
    }

    /// True if the boundary never shrank during the run.
    pub fn boundary_is_monotonic(&self) -> bool {
        std::iter::once(&self.initial_boundary)
            .chain(self.boundary_history.iter())
            .collect::<Vec<_>>()
            .windows(2)
            .all(|pair| pair[1] >= pair[0])
    }
}

/// Owns one run: configuration, explorer and seeded context.
pub struct AnimationDriver {
    config: ExplorerConfig,
    explorer: Explorer,
    context: SimContext,
    style: RenderStyle,
}

impl AnimationDriver {
    /// Creates a driver, validating the configuration.
    pub fn new(config: ExplorerConfig) -> Result<Self, SimError> {
        let explorer = Explorer::from_config(&config)?;
        let context = SimContext::new(config.seed);
        Ok(Self {
            config,
            explorer,
            context,
            style: RenderStyle::default(),
        })
    }

    /// Overrides the render style handed to the renderer.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn context(&self) -> &SimContext {
        &self.context
    }

    /// Generates the landmark set for this run's seed.
    pub fn landmarks(&self) -> Result<LandmarkSet, SimError> {
        let mut rng = self.context.landmark_rng();
        Ok(LandmarkSet::generate(
            self.config.landmark_count,
            self.config.boundary_limit,
            &mut rng,
        )?)
    }

    /// Runs without drawing or waiting.
    pub fn run_headless(&mut self) -> Result<RunReport, SimError> {
        self.run(&mut NullRenderer, &mut VirtualPacer::new())
    }

    /// Runs the frame loop until the frame budget is spent or the renderer stops it.
    pub fn run<A, P>(&mut self, renderer: &mut A, pacer: &mut P) -> Result<RunReport, SimError>
    where
        A: RenderAdapter + ?Sized,
        P: FramePacer + ?Sized,
    {
        let interval = self.config.frame_interval();
        let frame_count = self.config.frame_count;

        let landmarks = self.landmarks()?;
        let mut rng = self.context.path_rng();
        let mut state = self.explorer.initial_state();
        let initial_boundary = state.boundary;

        renderer.begin(&landmarks, initial_boundary, &self.style)?;

        info!(
            "Starting run: seed={} frames={} boundary={} landmarks={} basis={}",
            self.config.seed,
            frame_count,
            initial_boundary,
            landmarks.len(),
            self.config.threshold_basis
        );

        // The renderer may stop long before `frame_count`, so grow on demand.
        let mut boundary_history = Vec::new();
        let mut expansions = 0;
        let mut stopped_early = false;

        for frame in 0..frame_count {
            let (next, update) = self.explorer.step(state, frame, &mut rng)?;
            state = next;

            if update.expanded {
                expansions += 1;
                debug!(
                    "frame {}: viewport {} -> {} (newest {:.2}, {:.2}, {:.2})",
                    frame,
                    update.previous_boundary,
                    update.boundary,
                    update.newest.x,
                    update.newest.y,
                    update.newest.z
                );
            }
            boundary_history.push(update.boundary);
            self.context.advance_time(interval);

            let control = renderer.draw(&update);

            if frame % 10 == 0 {
                debug!(
                    "  t={:.1}s | path={} | boundary={}",
                    self.context.now().as_secs_f64(),
                    state.path.len(),
                    state.boundary
                );
            }

            if control == FrameControl::Stop {
                info!("Renderer closed after frame {}; stopping", frame);
                stopped_early = frame + 1 < frame_count;
                break;
            }

            if frame + 1 < frame_count {
                pacer.pace(interval);
            }
        }

        renderer.finish();

        let report = RunReport {
            seed: self.config.seed,
            frames_run: state.frames,
            frames_requested: frame_count,
            landmarks,
            path: state.path,
            initial_boundary,
            boundary_history,
            expansions,
            stopped_early,
            elapsed: self.context.now(),
        };

        info!(
            "Run finished: {} frames, {} expansions, final boundary {}",
            report.frames_run,
            report.expansions,
            report.final_boundary()
        );

        Ok(report)
    }
}
