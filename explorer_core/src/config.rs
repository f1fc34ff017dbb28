//! Run configuration.

use crate::error::CoreError;
use crate::landmarks::LandmarkSet;
use crate::path::PathGenerator;
use crate::viewport::{Boundary, ThresholdBasis, ViewportController};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an explorer run.
///
/// Every field has a default, so a JSON file only needs to name the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Initial half-width of the visible cube
    pub boundary_limit: f64,

    /// Number of static landmarks
    pub landmark_count: usize,

    /// Total frames before the driver stops
    pub frame_count: u64,

    /// Target time between frames in milliseconds
    pub frame_interval_ms: u64,

    /// Per-axis bound of each random displacement
    pub step_bound: f64,

    /// How close to the edge the newest position may get before expanding
    pub threshold_margin: f64,

    /// Headroom added beyond the path's largest coordinate on expansion
    pub expansion_margin: f64,

    /// Boundary the expansion threshold is measured from
    pub threshold_basis: ThresholdBasis,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            boundary_limit: 30.0,
            landmark_count: LandmarkSet::DEFAULT_COUNT,
            frame_count: 100,
            frame_interval_ms: 100,
            step_bound: PathGenerator::DEFAULT_STEP_BOUND,
            threshold_margin: ViewportController::DEFAULT_THRESHOLD_MARGIN,
            expansion_margin: ViewportController::DEFAULT_EXPANSION_MARGIN,
            threshold_basis: ThresholdBasis::Current,
        }
    }
}

impl ExplorerConfig {
    /// Parses a (possibly partial) JSON configuration and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::config(format!("bad config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the numeric parameters describe a usable run.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.boundary_limit.is_finite() || self.boundary_limit <= 0.0 {
            return Err(CoreError::config(format!(
                "boundary_limit must be positive and finite, got {}",
                self.boundary_limit
            )));
        }
        if !self.step_bound.is_finite() || self.step_bound <= 0.0 {
            return Err(CoreError::config(format!(
                "step_bound must be positive and finite, got {}",
                self.step_bound
            )));
        }
        if !self.expansion_margin.is_finite() || self.expansion_margin <= 0.0 {
            return Err(CoreError::config(format!(
                "expansion_margin must be positive and finite, got {}",
                self.expansion_margin
            )));
        }
        if !self.threshold_margin.is_finite() || self.threshold_margin < 0.0 {
            return Err(CoreError::config(format!(
                "threshold_margin must be non-negative and finite, got {}",
                self.threshold_margin
            )));
        }
        if self.threshold_margin >= self.boundary_limit {
            return Err(CoreError::config(format!(
                "threshold_margin ({}) must be smaller than boundary_limit ({})",
                self.threshold_margin, self.boundary_limit
            )));
        }
        Ok(())
    }

    pub fn initial_boundary(&self) -> Boundary {
        Boundary::new(self.boundary_limit)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Builds the viewport controller described by this configuration.
    pub fn viewport_controller(&self) -> ViewportController {
        ViewportController::new(self.initial_boundary())
            .with_margins(self.threshold_margin, self.expansion_margin)
            .with_basis(self.threshold_basis)
    }

    /// Builds the path generator described by this configuration.
    pub fn path_generator(&self) -> Result<PathGenerator, CoreError> {
        PathGenerator::new(self.step_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.boundary_limit, 30.0);
        assert_eq!(config.landmark_count, 20);
        assert_eq!(config.frame_count, 100);
        assert_eq!(config.frame_interval(), Duration::from_millis(100));
        assert_eq!(config.threshold_basis, ThresholdBasis::Current);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = ExplorerConfig::from_json_str(
            r#"{ "seed": 7, "frame_count": 250, "threshold_basis": "initial" }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.frame_count, 250);
        assert_eq!(config.threshold_basis, ThresholdBasis::Initial);
        assert_eq!(config.boundary_limit, 30.0);
        assert_eq!(config.expansion_margin, 10.0);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = ExplorerConfig::from_json_str("{ seed: }").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad = [
            ExplorerConfig { boundary_limit: 0.0, ..Default::default() },
            ExplorerConfig { boundary_limit: f64::NAN, ..Default::default() },
            ExplorerConfig { step_bound: -1.0, ..Default::default() },
            ExplorerConfig { expansion_margin: 0.0, ..Default::default() },
            ExplorerConfig { threshold_margin: -0.5, ..Default::default() },
            ExplorerConfig { threshold_margin: 30.0, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }
    }

    #[test]
    fn test_builds_components() {
        let config = ExplorerConfig {
            boundary_limit: 50.0,
            threshold_margin: 8.0,
            expansion_margin: 12.0,
            step_bound: 2.0,
            ..Default::default()
        };
        let controller = config.viewport_controller();
        assert_eq!(controller.initial(), Boundary::new(50.0));
        assert_eq!(controller.threshold_margin(), 8.0);
        assert_eq!(controller.expansion_margin(), 12.0);
        assert_eq!(config.path_generator().unwrap().step_bound(), 2.0);
    }
}
