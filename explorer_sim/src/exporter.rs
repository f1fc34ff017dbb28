//! JSON exporter for finished runs.
//!
//! Writes the landmarks, one record per frame and the final boundary so a run
//! can be replayed or plotted offline.

use crate::driver::RunReport;
use crate::error::SimError;
use explorer_core::{ExplorerConfig, Position};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A point in the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Position> for PointRecord {
    fn from(p: &Position) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// A single frame of run data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFrame {
    /// Frame index
    pub frame: u64,

    /// Virtual time at the end of this frame in seconds
    pub time_sec: f64,

    /// Position appended this frame
    pub position: PointRecord,

    /// Boundary half-width after the viewport check
    pub boundary: f64,

    /// Viewport grew this frame
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expanded: bool,
}

/// Complete run export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerExport {
    /// Seed used
    pub seed: u64,

    /// Configuration the run used
    pub config: ExplorerConfig,

    /// Starting position of the path
    pub origin: PointRecord,

    /// Static landmarks
    pub landmarks: Vec<PointRecord>,

    /// All frames
    pub frames: Vec<ExportFrame>,

    /// Boundary half-width after the last frame
    pub final_boundary: f64,

    /// Renderer ended the run early
    pub stopped_early: bool,
}

impl ExplorerExport {
    /// Builds the export from a finished run.
    pub fn from_report(config: &ExplorerConfig, report: &RunReport) -> Self {
        let interval = config.frame_interval().as_secs_f64();
        let positions = report.path.positions();

        let mut previous = report.initial_boundary;
        let frames = report
            .boundary_history
            .iter()
            .zip(positions.iter().skip(1))
            .enumerate()
            .map(|(i, (boundary, position))| {
                let frame = ExportFrame {
                    frame: i as u64,
                    time_sec: (i as f64 + 1.0) * interval,
                    position: position.into(),
                    boundary: boundary.half_width(),
                    expanded: *boundary != previous,
                };
                previous = *boundary;
                frame
            })
            .collect();

        Self {
            seed: report.seed,
            config: config.clone(),
            origin: positions
                .first()
                .map(PointRecord::from)
                .unwrap_or(PointRecord { x: 0.0, y: 0.0, z: 0.0 }),
            landmarks: report.landmarks.positions().iter().map(PointRecord::from).collect(),
            frames,
            final_boundary: report.final_boundary().half_width(),
            stopped_early: report.stopped_early,
        }
    }

    /// Number of frames where the viewport grew.
    pub fn expansion_count(&self) -> usize {
        self.frames.iter().filter(|f| f.expanded).count()
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an export back from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), SimError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
