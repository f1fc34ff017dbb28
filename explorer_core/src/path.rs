//! Explorer path and the random-walk generator that grows it.
//!
//! The path is an append-only history of positions. It always starts from a
//! seed position (the origin by default) and gains exactly one position per
//! frame, produced by adding a bounded uniform displacement to the newest one.

use crate::error::CoreError;
use nalgebra::Vector3;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point in the exploration volume, in scene units.
pub type Position = Vector3<f64>;

/// Three parallel coordinate sequences, as consumed by line and scatter plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateArrays {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl CoordinateArrays {
    /// Splits a slice of positions into per-axis sequences.
    pub fn from_positions(positions: &[Position]) -> Self {
        let mut arrays = Self {
            x: Vec::with_capacity(positions.len()),
            y: Vec::with_capacity(positions.len()),
            z: Vec::with_capacity(positions.len()),
        };
        for p in positions {
            arrays.x.push(p.x);
            arrays.y.push(p.y);
            arrays.z.push(p.z);
        }
        arrays
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Ordered history of explorer positions, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    positions: Vec<Position>,
}

impl Path {
    /// Creates a path seeded with the origin.
    pub fn new() -> Self {
        Self::starting_at(Position::zeros())
    }

    /// Creates a path seeded with a single position.
    pub fn starting_at(origin: Position) -> Self {
        Self {
            positions: vec![origin],
        }
    }

    /// Wraps an existing position history.
    ///
    /// An empty history is accepted here; advancing it fails with
    /// [`CoreError::EmptyPath`].
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions in traversal order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The most recently appended position.
    pub fn newest(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// Largest absolute coordinate value over every position and axis.
    ///
    /// Returns 0 for an empty path.
    pub fn max_abs_coordinate(&self) -> f64 {
        self.positions
            .iter()
            .map(|p| p.amax())
            .fold(0.0, f64::max)
    }

    /// Per-axis coordinate sequences for line drawing.
    pub fn coordinates(&self) -> CoordinateArrays {
        CoordinateArrays::from_positions(&self.positions)
    }

    /// Appends `newest + displacement` and returns the new position.
    pub fn advance_by(&mut self, displacement: Vector3<f64>) -> Result<Position, CoreError> {
        let last = *self.newest().ok_or(CoreError::EmptyPath)?;
        let next = last + displacement;
        self.positions.push(next);
        Ok(next)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces bounded random displacements and applies them to a path.
///
/// Each displacement component is drawn independently and uniformly from the
/// closed interval `[-step_bound, step_bound]`.
#[derive(Debug, Clone)]
pub struct PathGenerator {
    step_bound: f64,
    step: Uniform<f64>,
}

impl PathGenerator {
    /// Default per-axis displacement bound.
    pub const DEFAULT_STEP_BOUND: f64 = 1.0;

    /// Creates a generator with the given per-axis displacement bound.
    pub fn new(step_bound: f64) -> Result<Self, CoreError> {
        if !step_bound.is_finite() || step_bound <= 0.0 {
            return Err(CoreError::config(format!(
                "step_bound must be positive and finite, got {}",
                step_bound
            )));
        }
        Ok(Self {
            step_bound,
            step: Uniform::new_inclusive(-step_bound, step_bound),
        })
    }

    pub fn step_bound(&self) -> f64 {
        self.step_bound
    }

    /// Draws one displacement vector.
    pub fn displacement<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        Vector3::new(
            self.step.sample(rng),
            self.step.sample(rng),
            self.step.sample(rng),
        )
    }

    /// Appends one randomly displaced position to `path`.
    ///
    /// The random source is only consumed when the path is non-empty.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        path: &mut Path,
        rng: &mut R,
    ) -> Result<Position, CoreError> {
        if path.is_empty() {
            return Err(CoreError::EmptyPath);
        }
        let displacement = self.displacement(rng);
        path.advance_by(displacement)
    }
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self {
            step_bound: Self::DEFAULT_STEP_BOUND,
            step: Uniform::new_inclusive(-Self::DEFAULT_STEP_BOUND, Self::DEFAULT_STEP_BOUND),
        }
    }
}
