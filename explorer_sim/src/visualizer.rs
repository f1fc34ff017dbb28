//! Rerun renderer for explorer runs.
//!
//! Visualization is optional and only available with the `visualization`
//! feature. Without it, [`RerunRenderer`] is a disabled no-op renderer.
//!
//! # What Gets Logged
//!
//! - Landmarks as static points (once)
//! - The explorer path as a line strip, per frame
//! - The visible cube as a wireframe box, whenever it changes
//! - Viewport expansions as text events

use explorer_core::{Boundary, CoreError, FrameControl, FrameUpdate, LandmarkSet, RenderAdapter, RenderStyle};

#[cfg(feature = "visualization")]
use rerun::{RecordingStream, RecordingStreamBuilder};

/// Streams the scene to a Rerun viewer.
pub struct RerunRenderer {
    #[cfg(feature = "visualization")]
    rec: Option<RecordingStream>,

    #[cfg(feature = "visualization")]
    style: RenderStyle,

    /// Whether visualization is enabled
    enabled: bool,
}

impl RerunRenderer {
    /// Creates a renderer with visualization disabled.
    pub fn disabled() -> Self {
        Self {
            #[cfg(feature = "visualization")]
            rec: None,
            #[cfg(feature = "visualization")]
            style: RenderStyle::default(),
            enabled: false,
        }
    }

    /// Spawns a Rerun viewer; falls back to disabled if that fails.
    #[cfg(feature = "visualization")]
    pub fn new(app_id: &str) -> Self {
        match RecordingStreamBuilder::new(app_id).spawn() {
            Ok(rec) => {
                tracing::info!("Rerun visualization enabled - open Rerun Viewer to watch the explorer");
                Self {
                    rec: Some(rec),
                    style: RenderStyle::default(),
                    enabled: true,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize Rerun: {:?}", e);
                Self::disabled()
            }
        }
    }

    /// Creates a renderer - returns disabled if visualization feature not enabled.
    #[cfg(not(feature = "visualization"))]
    pub fn new(_app_id: &str) -> Self {
        tracing::info!("Rerun visualization not available (compile with --features visualization)");
        Self::disabled()
    }

    /// Returns whether visualization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(feature = "visualization")]
    fn log_boundary(&self, rec: &RecordingStream, boundary: Boundary) {
        let size = (boundary.half_width() * 2.0) as f32;
        if let Err(e) = rec.log(
            "world/viewport",
            &rerun::Boxes3D::from_centers_and_sizes([[0.0, 0.0, 0.0]], [[size, size, size]])
                .with_colors([self.style.plot_background]),
        ) {
            tracing::warn!("Rerun viewport log failed: {:?}", e);
        }
    }
}

impl RenderAdapter for RerunRenderer {
    #[cfg(feature = "visualization")]
    fn begin(
        &mut self,
        landmarks: &LandmarkSet,
        boundary: Boundary,
        style: &RenderStyle,
    ) -> Result<(), CoreError> {
        self.style = style.clone();
        let Some(rec) = self.rec.as_ref() else {
            return Ok(());
        };

        rec.log_static("world", &rerun::ViewCoordinates::RIGHT_HAND_Z_UP())
            .map_err(CoreError::render)?;

        let points: Vec<[f32; 3]> = landmarks
            .positions()
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect();
        rec.log_static(
            "world/landmarks",
            &rerun::Points3D::new(points)
                .with_colors([style.landmark_color])
                .with_radii([rerun::Radius::new_ui_points(style.landmark_radius())]),
        )
        .map_err(CoreError::render)?;

        rec.set_time_sequence("frame", 0);
        self.log_boundary(rec, boundary);
        Ok(())
    }

    #[cfg(not(feature = "visualization"))]
    fn begin(
        &mut self,
        _landmarks: &LandmarkSet,
        _boundary: Boundary,
        _style: &RenderStyle,
    ) -> Result<(), CoreError> {
        Ok(())
    }

    #[cfg(feature = "visualization")]
    fn draw(&mut self, update: &FrameUpdate) -> FrameControl {
        let Some(rec) = self.rec.as_ref() else {
            return FrameControl::Continue;
        };

        rec.set_time_sequence("frame", update.frame_index as i64 + 1);

        let c = &update.coordinates;
        let strip: Vec<[f32; 3]> = (0..c.len())
            .map(|i| [c.x[i] as f32, c.y[i] as f32, c.z[i] as f32])
            .collect();
        if let Err(e) = rec.log(
            "world/path",
            &rerun::LineStrips3D::new([strip])
                .with_colors([self.style.path_color])
                .with_radii([rerun::Radius::new_ui_points(self.style.path_line_width / 2.0)])
                .with_labels([self.style.path_label.as_str()]),
        ) {
            tracing::warn!("Rerun path log failed: {:?}", e);
        }

        if update.expanded {
            self.log_boundary(rec, update.boundary);
            if let Err(e) = rec.log(
                "events",
                &rerun::TextLog::new(format!(
                    "viewport expanded {} -> {}",
                    update.previous_boundary, update.boundary
                )),
            ) {
                tracing::warn!("Rerun event log failed: {:?}", e);
            }
        }

        FrameControl::Continue
    }

    #[cfg(not(feature = "visualization"))]
    fn draw(&mut self, _update: &FrameUpdate) -> FrameControl {
        FrameControl::Continue
    }

    fn finish(&mut self) {
        #[cfg(feature = "visualization")]
        if let Some(rec) = self.rec.as_ref() {
            // Flush so the viewer gets the last frame before the process exits.
            #[allow(clippy::let_unit_value)]
            let _ = rec.flush_blocking();
        }
    }
}
