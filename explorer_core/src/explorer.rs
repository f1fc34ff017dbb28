//! Per-frame state update: grow the path, then check the viewport.
//!
//! State is owned by the caller and threaded through [`Explorer::step`], which
//! consumes the current [`ExplorerState`] and hands back the next one together
//! with a [`FrameUpdate`] for the renderer.

use crate::config::ExplorerConfig;
use crate::error::CoreError;
use crate::path::{CoordinateArrays, Path, PathGenerator, Position};
use crate::viewport::{Boundary, ViewportController};
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mutable run state: the path so far and the current boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerState {
    pub path: Path,
    pub boundary: Boundary,

    /// Frames applied so far
    pub frames: u64,
}

impl ExplorerState {
    /// Creates the starting state: a path at the origin inside `boundary`.
    pub fn new(boundary: Boundary) -> Self {
        Self {
            path: Path::new(),
            boundary,
            frames: 0,
        }
    }
}

/// Everything the renderer needs to redraw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameUpdate {
    /// Frame index supplied by the driver
    pub frame_index: u64,

    /// Whole path as parallel x/y/z arrays
    pub coordinates: CoordinateArrays,

    /// Position appended this frame
    pub newest: Position,

    /// Boundary after the viewport check
    pub boundary: Boundary,

    /// Boundary before the viewport check
    pub previous_boundary: Boundary,

    /// True if the viewport grew this frame
    pub expanded: bool,
}

/// Path generator plus viewport controller.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    generator: PathGenerator,
    controller: ViewportController,
}

impl Explorer {
    pub fn new(generator: PathGenerator, controller: ViewportController) -> Self {
        Self {
            generator,
            controller,
        }
    }

    /// Builds an explorer from a validated configuration.
    pub fn from_config(config: &ExplorerConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self::new(config.path_generator()?, config.viewport_controller()))
    }

    pub fn generator(&self) -> &PathGenerator {
        &self.generator
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    /// Starting state at the controller's initial boundary.
    pub fn initial_state(&self) -> ExplorerState {
        ExplorerState::new(self.controller.initial())
    }

    /// Runs one frame with a random displacement.
    ///
    /// `frame_index` is carried through to the update and plays no part in the
    /// state transition.
    pub fn step<R: Rng + ?Sized>(
        &self,
        mut state: ExplorerState,
        frame_index: u64,
        rng: &mut R,
    ) -> Result<(ExplorerState, FrameUpdate), CoreError> {
        let newest = self.generator.advance(&mut state.path, rng)?;
        Ok(self.finish_frame(state, frame_index, newest))
    }

    /// Runs one frame with a caller-supplied displacement.
    pub fn step_with(
        &self,
        mut state: ExplorerState,
        frame_index: u64,
        displacement: Vector3<f64>,
    ) -> Result<(ExplorerState, FrameUpdate), CoreError> {
        let newest = state.path.advance_by(displacement)?;
        Ok(self.finish_frame(state, frame_index, newest))
    }

    fn finish_frame(
        &self,
        mut state: ExplorerState,
        frame_index: u64,
        newest: Position,
    ) -> (ExplorerState, FrameUpdate) {
        let previous_boundary = state.boundary;
        state.boundary = self.controller.maybe_expand(&state.path, previous_boundary);
        state.frames += 1;

        let update = FrameUpdate {
            frame_index,
            coordinates: state.path.coordinates(),
            newest,
            boundary: state.boundary,
            previous_boundary,
            expanded: state.boundary != previous_boundary,
        };
        (state, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ThresholdBasis;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(explorer: &Explorer, seed: u64, frames: u64) -> (ExplorerState, Vec<FrameUpdate>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = explorer.initial_state();
        let mut updates = Vec::new();
        for frame in 0..frames {
            let (next, update) = explorer.step(state, frame, &mut rng).unwrap();
            state = next;
            updates.push(update);
        }
        (state, updates)
    }

    #[test]
    fn test_injected_step_near_origin() {
        let explorer = Explorer::default();
        let state = explorer.initial_state();

        let (state, update) = explorer
            .step_with(state, 0, Vector3::new(0.5, -0.3, 0.2))
            .unwrap();

        assert_eq!(state.path.len(), 2);
        assert_eq!(state.path.positions()[0], Position::zeros());
        assert_relative_eq!(state.path.positions()[1].x, 0.5);
        assert_relative_eq!(state.path.positions()[1].y, -0.3);
        assert_relative_eq!(state.path.positions()[1].z, 0.2);
        assert_eq!(state.boundary, Boundary::new(30.0));
        assert!(!update.expanded);
        assert_eq!(update.coordinates.len(), 2);
    }

    #[test]
    fn test_injected_step_expands() {
        let explorer = Explorer::default();
        let mut state = explorer.initial_state();
        state.path = Path::starting_at(Position::new(25.0, 1.0, 1.0));

        let (state, update) = explorer
            .step_with(state, 3, Vector3::new(1.0, 0.0, 0.0))
            .unwrap();

        assert_relative_eq!(state.boundary.half_width(), 36.0);
        assert!(update.expanded);
        assert_eq!(update.previous_boundary, Boundary::new(30.0));
        assert_eq!(update.frame_index, 3);
    }

    #[test]
    fn test_step_on_empty_path_fails() {
        let explorer = Explorer::default();
        let mut state = explorer.initial_state();
        state.path = Path::from_positions(Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(explorer.step(state, 0, &mut rng).unwrap_err(), CoreError::EmptyPath);
    }

    #[test]
    fn test_hundred_frames_deterministic() {
        let explorer = Explorer::default();
        let (a, updates) = run(&explorer, 42, 100);
        let (b, _) = run(&explorer, 42, 100);

        assert_eq!(a.path.len(), 101);
        assert_eq!(a.frames, 100);
        assert_eq!(a, b);
        for pair in updates.windows(2) {
            assert!(pair[1].boundary >= pair[0].boundary);
        }
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = ExplorerConfig {
            step_bound: 0.0,
            ..Default::default()
        };
        assert!(Explorer::from_config(&config).is_err());
    }

    proptest! {
        #[test]
        fn test_path_contained_after_each_frame(seed in any::<u64>(), step_bound in 1.0f64..8.0) {
            // Large steps make expansions frequent within a short run.
            let config = ExplorerConfig { step_bound, ..Default::default() };
            let explorer = Explorer::from_config(&config).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = explorer.initial_state();

            for frame in 0..150 {
                let (next, update) = explorer.step(state, frame, &mut rng).unwrap();
                state = next;
                for p in state.path.positions() {
                    prop_assert!(state.boundary.contains(p));
                }
                if update.expanded {
                    prop_assert_eq!(
                        update.boundary.half_width(),
                        state.path.max_abs_coordinate() + 10.0
                    );
                }
                prop_assert!(update.boundary >= update.previous_boundary);
            }
        }

        #[test]
        fn test_initial_basis_contained_and_monotonic(seed in any::<u64>()) {
            let config = ExplorerConfig {
                step_bound: 4.0,
                threshold_basis: ThresholdBasis::Initial,
                ..Default::default()
            };
            let explorer = Explorer::from_config(&config).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = explorer.initial_state();

            for frame in 0..150 {
                let (next, update) = explorer.step(state, frame, &mut rng).unwrap();
                state = next;
                for p in state.path.positions() {
                    prop_assert!(state.boundary.contains(p));
                }
                prop_assert!(update.boundary >= update.previous_boundary);
            }
        }
    }
}
