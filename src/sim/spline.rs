//! Catmull-Rom spline evaluation over the terrain control points
//!
//! Segment `i` runs from control point `i` to `i + 1` and is shaped by the
//! window `i-1..=i+2`. Because points sit at x = 0, 1, 2, ... the local
//! parameter for a global x is simply its fractional part.

use glam::{Vec2, Vec4};

use super::error::SplineError;
use super::terrain::ControlPointSequence;
use crate::consts::SLOPE_EPSILON;

/// Catmull-Rom basis, one row per power of T (T³, T², T, 1)
const BASIS: [Vec4; 4] = [
    Vec4::new(-0.5, 1.5, -1.5, 0.5),
    Vec4::new(1.0, -2.5, 2.0, -0.5),
    Vec4::new(-0.5, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
];

/// Apply the basis to four control values, giving cubic coefficients
#[inline]
fn coefficients(p: Vec4) -> Vec4 {
    Vec4::new(
        BASIS[0].dot(p),
        BASIS[1].dot(p),
        BASIS[2].dot(p),
        BASIS[3].dot(p),
    )
}

/// Read-only sampler over a control point sequence
#[derive(Debug, Clone, Copy)]
pub struct SplineSampler<'a> {
    points: &'a ControlPointSequence,
}

impl<'a> SplineSampler<'a> {
    pub fn new(points: &'a ControlPointSequence) -> Self {
        Self { points }
    }

    /// Valid segment indices as an inclusive range
    pub fn segment_range(&self) -> Option<(usize, usize)> {
        let last = self.points.frontier_index()?;
        if self.points.len() < 4 {
            return None;
        }
        Some((self.points.first_index() + 1, last - 2))
    }

    /// Evaluate segment `i` at local parameter `t` in [0, 1]
    pub fn point_at(&self, i: usize, t: f32) -> Result<Vec2, SplineError> {
        let (first, last) = self.segment_range().unwrap_or((1, 0));
        if i < first || i > last {
            return Err(SplineError::InvalidSegment {
                index: i,
                first,
                last,
            });
        }

        let window = [i - 1, i, i + 1, i + 2].map(|k| {
            self.points
                .get(k)
                .map(|p| p.as_vec2())
                .unwrap_or(Vec2::NAN)
        });
        let bx = Vec4::new(window[0].x, window[1].x, window[2].x, window[3].x);
        let by = Vec4::new(window[0].y, window[1].y, window[2].y, window[3].y);
        let u = Vec4::new(t * t * t, t * t, t, 1.0);

        Ok(Vec2::new(coefficients(bx).dot(u), coefficients(by).dot(u)))
    }

    /// Map a global x to (segment index, local parameter), checking coverage
    pub fn locate(&self, x: f32) -> Result<(usize, f32), SplineError> {
        self.check_range(x)?;
        let i = x.floor();
        Ok((i as usize, x - i))
    }

    /// Sampleable x as `[min, max)`
    pub fn x_range(&self) -> Option<(f32, f32)> {
        self.points.sample_range()
    }

    pub(crate) fn check_range(&self, x: f32) -> Result<(), SplineError> {
        let (min, max) = self.x_range().unwrap_or((0.0, 0.0));
        if x.is_finite() && x >= min && x < max {
            Ok(())
        } else {
            Err(SplineError::OutOfRange { x, min, max })
        }
    }

    /// Spline point at global horizontal coordinate `x`
    pub fn point_at_x(&self, x: f32) -> Result<Vec2, SplineError> {
        let (i, t) = self.locate(x)?;
        self.point_at(i, t)
    }

    /// Terrain height under `x`
    #[inline]
    pub fn height_at(&self, x: f32) -> Result<f32, SplineError> {
        self.point_at_x(x).map(|p| p.y)
    }

    /// Central-difference slope dy/dx around `x`
    ///
    /// Offsets that leave the current segment borrow the neighbouring one.
    pub fn slope_at(&self, x: f32) -> Result<f32, SplineError> {
        let (i, t) = self.locate(x)?;

        let (i1, t1) = if t - SLOPE_EPSILON < 0.0 {
            (i - 1, t - SLOPE_EPSILON + 1.0)
        } else {
            (i, t - SLOPE_EPSILON)
        };
        let (i2, t2) = if t + SLOPE_EPSILON >= 1.0 {
            (i + 1, t + SLOPE_EPSILON - 1.0)
        } else {
            (i, t + SLOPE_EPSILON)
        };

        let p1 = self.point_at(i1, t1).map_err(|_| self.edge_error(x))?;
        let p2 = self.point_at(i2, t2).map_err(|_| self.edge_error(x))?;

        let dx = p2.x - p1.x;
        if dx.abs() <= f32::EPSILON {
            return Err(SplineError::DegenerateSlope { x });
        }
        Ok((p2.y - p1.y) / dx)
    }

    fn edge_error(&self, x: f32) -> SplineError {
        let (min, max) = self.x_range().unwrap_or((0.0, 0.0));
        SplineError::OutOfRange { x, min, max }
    }

    /// Dense polyline across every valid segment, for rendering
    pub fn curve(&self, segments_per_span: usize) -> Curve<'a> {
        let (next, end) = match self.segment_range() {
            Some((first, last)) if segments_per_span > 0 => (first, last + 1),
            _ => (0, 0),
        };
        Curve {
            sampler: *self,
            segments: segments_per_span,
            segment: next,
            end,
            step: 0,
        }
    }
}

/// Lazy polyline over the spline; clone it to restart
#[derive(Debug, Clone)]
pub struct Curve<'a> {
    sampler: SplineSampler<'a>,
    segments: usize,
    segment: usize,
    end: usize,
    step: usize,
}

impl Iterator for Curve<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.segment >= self.end {
            return None;
        }
        let t = self.step as f32 / self.segments as f32;
        let point = self.sampler.point_at(self.segment, t).ok();

        self.step += 1;
        if self.step == self.segments {
            self.step = 0;
            self.segment += 1;
        }
        point
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.segment >= self.end {
            0
        } else {
            (self.end - self.segment) * self.segments - self.step
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Curve<'_> {}
