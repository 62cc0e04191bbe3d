//! Terrain control points
//!
//! Control points are spaced exactly 1.0 apart so the global index of a point
//! is also its x coordinate. Points behind the player can be evicted; the
//! sequence remembers how many were dropped so indices stay global.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SplineError;
use super::spline::SplineSampler;

/// Past 2^24 an f32 can no longer hold every integer, so `x == index` breaks
pub const MAX_COVERAGE_X: f32 = 16_777_216.0;

/// A fixed (x, y) anchor of the terrain spline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
}

impl ControlPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Ordered control points with global indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPointSequence {
    points: VecDeque<ControlPoint>,
    /// Global index of `points[0]`
    first: usize,
    /// Height scale applied to uniform(-1, 1) samples
    vertical_scale: f32,
}

impl ControlPointSequence {
    /// Empty sequence; call `ensure_coverage` or `extend` before sampling
    pub fn new(vertical_scale: f32) -> Self {
        Self {
            points: VecDeque::new(),
            first: 0,
            vertical_scale,
        }
    }

    /// Build from explicit heights (x = 0, 1, 2, ...)
    pub fn from_heights(heights: &[f32]) -> Self {
        let points = heights
            .iter()
            .enumerate()
            .map(|(i, &y)| ControlPoint::new(i as f32, y))
            .collect();
        Self {
            points,
            first: 0,
            vertical_scale: crate::consts::TERRAIN_VERTICAL_SCALE,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Global index of the oldest retained point
    pub fn first_index(&self) -> usize {
        self.first
    }

    /// Global index of the newest point (equal to its x coordinate)
    pub fn frontier_index(&self) -> Option<usize> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.first + self.points.len() - 1)
        }
    }

    /// x coordinate of the newest point, or -1 when nothing is generated yet
    pub fn frontier(&self) -> f32 {
        self.frontier_index().map_or(-1.0, |i| i as f32)
    }

    /// Point by global index
    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        index
            .checked_sub(self.first)
            .and_then(|local| self.points.get(local))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter()
    }

    /// Append one point at `frontier + 1` with a random height
    pub fn extend<R: Rng>(&mut self, rng: &mut R) -> ControlPoint {
        let x = self.first + self.points.len();
        let y = rng.random_range(-1.0f32..1.0) * self.vertical_scale;
        let point = ControlPoint::new(x as f32, y);
        self.points.push_back(point);
        point
    }

    /// Extend until `x` can be sampled (x < frontier - 1). Returns points added.
    ///
    /// Rejects non-finite `x` and anything past [`MAX_COVERAGE_X`].
    pub fn ensure_coverage<R: Rng>(&mut self, x: f32, rng: &mut R) -> Result<usize, SplineError> {
        if !x.is_finite() || x >= MAX_COVERAGE_X {
            let (min, max) = self.sample_range().unwrap_or((0.0, 0.0));
            return Err(SplineError::OutOfRange { x, min, max });
        }
        let mut added = 0;
        // Need at least four points before anything is sampleable
        while self.points.len() < 4 || self.frontier() - 2.0 < x.floor() {
            self.extend(rng);
            added += 1;
        }
        Ok(added)
    }

    /// Whether `point_at_x(x)` would succeed
    pub fn covers(&self, x: f32) -> bool {
        self.sampler().check_range(x).is_ok()
    }

    /// Drop points before global index `index`, always keeping four
    pub fn evict_before(&mut self, index: usize) -> usize {
        let mut evicted = 0;
        while self.first < index && self.points.len() > 4 {
            self.points.pop_front();
            self.first += 1;
            evicted += 1;
        }
        evicted
    }

    /// Pure sampler view over the current points
    pub fn sampler(&self) -> SplineSampler<'_> {
        SplineSampler::new(self)
    }

    /// Sampleable range of x as `[min, max)`
    pub(crate) fn sample_range(&self) -> Option<(f32, f32)> {
        let last = self.frontier_index()?;
        if self.points.len() < 4 {
            return None;
        }
        Some(((self.first + 1) as f32, (last - 1) as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_extend_appends_at_frontier() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seq = ControlPointSequence::new(0.7);
        assert_eq!(seq.frontier_index(), None);

        for expected in 0..5 {
            let p = seq.extend(&mut rng);
            assert_eq!(p.x, expected as f32);
            assert!(p.y.abs() <= 0.7);
        }
        assert_eq!(seq.frontier(), 4.0);
    }

    #[test]
    fn test_ensure_coverage_allows_sampling() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seq = ControlPointSequence::new(0.7);

        seq.ensure_coverage(2.5, &mut rng).unwrap();
        assert!(seq.covers(2.5));
        assert!(seq.sampler().point_at_x(2.5).is_ok());

        // Already covered: nothing added
        assert_eq!(seq.ensure_coverage(2.0, &mut rng), Ok(0));

        seq.ensure_coverage(10.0, &mut rng).unwrap();
        assert!(seq.covers(10.0));
        assert!(seq.frontier() >= 12.0);
    }

    #[test]
    fn test_ensure_coverage_rejects_unreachable_x() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seq = ControlPointSequence::new(0.7);

        for x in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, 1e30, MAX_COVERAGE_X] {
            assert!(matches!(
                seq.ensure_coverage(x, &mut rng),
                Err(SplineError::OutOfRange { .. })
            ));
        }
        assert!(seq.is_empty());
    }

    #[test]
    fn test_evict_keeps_global_indices() {
        let mut seq = ControlPointSequence::from_heights(&[0.0; 10]);
        assert_eq!(seq.evict_before(3), 3);
        assert_eq!(seq.first_index(), 3);
        assert_eq!(seq.get(3).map(|p| p.x), Some(3.0));
        assert!(seq.get(2).is_none());
        assert_eq!(seq.frontier(), 9.0);

        // Never drops below four points
        seq.evict_before(100);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.first_index(), 6);
    }

    proptest! {
        #[test]
        fn prop_frontier_invariant(seed in any::<u64>(), extends in 0usize..64, evict in 0usize..64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut seq = ControlPointSequence::new(0.7);
            for _ in 0..extends {
                seq.extend(&mut rng);
            }
            seq.evict_before(evict);
            for p in seq.iter() {
                prop_assert!(p.y.abs() <= 0.7);
            }
            for k in seq.first_index()..seq.first_index() + seq.len() {
                prop_assert_eq!(seq.get(k).map(|p| p.x), Some(k as f32));
            }
        }
    }
}
