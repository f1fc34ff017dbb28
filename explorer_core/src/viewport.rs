//! Viewport boundary and the controller that grows it.
//!
//! The visible volume is a cube centred on the origin with the same half-width
//! on every axis. When the newest path position gets within the threshold
//! margin of the edge, the controller replaces the boundary with the largest
//! absolute coordinate in the whole path plus the expansion margin.

use crate::path::{Path, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-width of the symmetric visible cube.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boundary(f64);

impl Boundary {
    pub fn new(half_width: f64) -> Self {
        Self(half_width)
    }

    pub fn half_width(&self) -> f64 {
        self.0
    }

    /// Axis limits `[-half_width, half_width]`, identical for x, y and z.
    pub fn limits(&self) -> [f64; 2] {
        [-self.0, self.0]
    }

    /// True if every coordinate of `position` lies strictly inside the cube.
    pub fn contains(&self, position: &Position) -> bool {
        position.amax() < self.0
    }
}

impl From<f64> for Boundary {
    fn from(half_width: f64) -> Self {
        Self(half_width)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{:.2}", self.0)
    }
}

/// Which boundary the expansion threshold is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    /// Threshold follows the current, possibly expanded, boundary.
    #[default]
    Current,

    /// Threshold stays at the initial boundary. Once the path has left the
    /// initial threshold every further frame recomputes the boundary.
    Initial,
}

impl ThresholdBasis {
    pub fn name(&self) -> &'static str {
        match self {
            ThresholdBasis::Current => "current",
            ThresholdBasis::Initial => "initial",
        }
    }
}

impl fmt::Display for ThresholdBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ThresholdBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(ThresholdBasis::Current),
            "initial" | "fixed" => Ok(ThresholdBasis::Initial),
            _ => Err(format!("Unknown threshold basis: {}", s)),
        }
    }
}

/// Decides when and how far to expand the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    initial: Boundary,
    threshold_margin: f64,
    expansion_margin: f64,
    basis: ThresholdBasis,
}

impl ViewportController {
    /// Distance from the edge at which expansion kicks in.
    pub const DEFAULT_THRESHOLD_MARGIN: f64 = 5.0;

    /// Headroom added beyond the path's largest coordinate.
    pub const DEFAULT_EXPANSION_MARGIN: f64 = 10.0;

    /// Creates a controller with default margins, measuring from the current boundary.
    pub fn new(initial: Boundary) -> Self {
        Self {
            initial,
            threshold_margin: Self::DEFAULT_THRESHOLD_MARGIN,
            expansion_margin: Self::DEFAULT_EXPANSION_MARGIN,
            basis: ThresholdBasis::Current,
        }
    }

    /// Sets the threshold and expansion margins.
    pub fn with_margins(mut self, threshold_margin: f64, expansion_margin: f64) -> Self {
        self.threshold_margin = threshold_margin;
        self.expansion_margin = expansion_margin;
        self
    }

    /// Sets the threshold basis.
    pub fn with_basis(mut self, basis: ThresholdBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Boundary the run starts with.
    pub fn initial(&self) -> Boundary {
        self.initial
    }

    pub fn basis(&self) -> ThresholdBasis {
        self.basis
    }

    pub fn threshold_margin(&self) -> f64 {
        self.threshold_margin
    }

    pub fn expansion_margin(&self) -> f64 {
        self.expansion_margin
    }

    /// Absolute coordinate value above which the viewport expands.
    pub fn threshold(&self, boundary: Boundary) -> f64 {
        match self.basis {
            ThresholdBasis::Current => boundary.half_width() - self.threshold_margin,
            ThresholdBasis::Initial => self.initial.half_width() - self.threshold_margin,
        }
    }

    /// True if the newest position has a coordinate past the threshold.
    pub fn should_expand(&self, path: &Path, boundary: Boundary) -> bool {
        let threshold = self.threshold(boundary);
        path.newest().is_some_and(|p| p.amax() > threshold)
    }

    /// Returns the expanded boundary, or `boundary` unchanged if no expansion is due.
    pub fn maybe_expand(&self, path: &Path, boundary: Boundary) -> Boundary {
        if self.should_expand(path, boundary) {
            Boundary(path.max_abs_coordinate() + self.expansion_margin)
        } else {
            boundary
        }
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(Boundary::new(30.0))
    }
}
