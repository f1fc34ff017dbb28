//! Static landmark points scattered through the exploration volume.

use crate::error::CoreError;
use crate::path::{CoordinateArrays, Position};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Fixed set of reference points, generated once before the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    positions: Vec<Position>,
}

impl LandmarkSet {
    /// Default number of landmarks.
    pub const DEFAULT_COUNT: usize = 20;

    /// Places `count` landmarks uniformly in `[-limit, limit]` on every axis.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        limit: f64,
        rng: &mut R,
    ) -> Result<Self, CoreError> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(CoreError::config(format!(
                "landmark limit must be non-negative and finite, got {}",
                limit
            )));
        }

        let axis = Uniform::new_inclusive(-limit, limit);
        let positions = (0..count)
            .map(|_| Position::new(axis.sample(rng), axis.sample(rng), axis.sample(rng)))
            .collect();

        Ok(Self { positions })
    }

    /// Generates landmarks from a dedicated seeded RNG.
    pub fn seeded(count: usize, limit: f64, seed: u64) -> Result<Self, CoreError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(count, limit, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Per-axis coordinate sequences for scatter rendering.
    pub fn coordinates(&self) -> CoordinateArrays {
        CoordinateArrays::from_positions(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_landmarks_reproducible() {
        let a = LandmarkSet::seeded(20, 30.0, 42).unwrap();
        let b = LandmarkSet::seeded(20, 30.0, 42).unwrap();
        let c = LandmarkSet::seeded(20, 30.0, 43).unwrap();

        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_landmarks_within_limit() {
        let set = LandmarkSet::seeded(500, 30.0, 9).unwrap();
        for p in set.positions() {
            assert!(p.amax() <= 30.0, "landmark {:?} outside cube", p);
        }
    }

    #[test]
    fn test_zero_landmarks() {
        let set = LandmarkSet::seeded(0, 30.0, 1).unwrap();
        assert!(set.is_empty());
        assert!(set.coordinates().is_empty());
    }

    #[test]
    fn test_rejects_bad_limit() {
        assert!(LandmarkSet::seeded(5, -1.0, 1).is_err());
        assert!(LandmarkSet::seeded(5, f64::INFINITY, 1).is_err());
    }
}
