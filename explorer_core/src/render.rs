//! Rendering collaborator interface.
//!
//! The core hands a renderer the static landmark set once, then one
//! [`FrameUpdate`] per frame. Drawing a frame is the commit point: once
//! [`RenderAdapter::draw`] returns, the frame counts as rendered. A renderer
//! can end the run early (for example when its window is closed) by
//! returning [`FrameControl::Stop`].

use crate::error::CoreError;
use crate::explorer::FrameUpdate;
use crate::landmarks::LandmarkSet;
use crate::viewport::Boundary;
use serde::{Deserialize, Serialize};

/// RGBA colour, one byte per channel.
pub type Rgba = [u8; 4];

/// Marker glyph for scatter points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
}

/// Cosmetic settings for the scene. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Figure size in inches (width, height)
    pub figure_size: (f32, f32),
    pub figure_background: Rgba,
    pub plot_background: Rgba,
    pub tick_label_color: Rgba,

    pub path_label: String,
    pub path_color: Rgba,
    pub path_line_width: f32,

    pub landmark_label: String,
    pub landmark_color: Rgba,
    pub landmark_marker: Marker,
    /// Marker area in points squared
    pub landmark_size: f32,
}

impl RenderStyle {
    /// Landmark marker radius in points, derived from the marker area.
    pub fn landmark_radius(&self) -> f32 {
        self.landmark_size.sqrt() / 2.0
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            figure_size: (10.0, 7.0),
            figure_background: [0, 0, 0, 255],        // black
            plot_background: [112, 128, 144, 255],    // slate gray
            tick_label_color: [255, 255, 255, 255],   // white
            path_label: "Explorer Path".to_string(),
            path_color: [0, 191, 255, 255],           // deep sky blue
            path_line_width: 2.5,
            landmark_label: "Landmarks".to_string(),
            landmark_color: [255, 0, 255, 191],       // magenta, alpha 0.75
            landmark_marker: Marker::TriangleUp,
            landmark_size: 70.0,
        }
    }
}

/// Returned by a renderer after each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// A sink for the scene and its per-frame updates.
pub trait RenderAdapter {
    /// One-time scene setup before the first frame.
    fn begin(
        &mut self,
        landmarks: &LandmarkSet,
        boundary: Boundary,
        style: &RenderStyle,
    ) -> Result<(), CoreError>;

    /// Redraws the path and applies the boundary to all three axes.
    fn draw(&mut self, update: &FrameUpdate) -> FrameControl;

    /// Called once after the last frame, including after an early stop.
    fn finish(&mut self) {}
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderAdapter for NullRenderer {
    fn begin(
        &mut self,
        _landmarks: &LandmarkSet,
        _boundary: Boundary,
        _style: &RenderStyle,
    ) -> Result<(), CoreError> {
        Ok(())
    }

    fn draw(&mut self, _update: &FrameUpdate) -> FrameControl {
        FrameControl::Continue
    }
}

/// Headless renderer that keeps every update it receives.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    landmarks: Option<LandmarkSet>,
    initial_boundary: Option<Boundary>,
    frames: Vec<FrameUpdate>,
    stop_after: Option<usize>,
    finished: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the driver to stop once `frames` frames have been drawn,
    /// the way a viewer window closing mid-run would.
    pub fn stop_after(mut self, frames: usize) -> Self {
        self.stop_after = Some(frames);
        self
    }

    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }

    pub fn initial_boundary(&self) -> Option<Boundary> {
        self.initial_boundary
    }

    pub fn frames(&self) -> &[FrameUpdate] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RenderAdapter for FrameRecorder {
    fn begin(
        &mut self,
        landmarks: &LandmarkSet,
        boundary: Boundary,
        _style: &RenderStyle,
    ) -> Result<(), CoreError> {
        self.landmarks = Some(landmarks.clone());
        self.initial_boundary = Some(boundary);
        Ok(())
    }

    fn draw(&mut self, update: &FrameUpdate) -> FrameControl {
        self.frames.push(update.clone());
        match self.stop_after {
            Some(limit) if self.frames.len() >= limit => FrameControl::Stop,
            _ => FrameControl::Continue,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
