//! Invariant violations raised by the terrain spline
//!
//! None of these are recoverable at runtime: the simulation is expected to keep
//! enough control points generated ahead of every query. Seeing one means a
//! caller skipped `ensure_coverage` or the spacing invariant broke.

use thiserror::Error;

use crate::tuning::TuningError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Query outside the span that has four surrounding control points
    #[error("x = {x} is outside the sampleable range [{min}, {max})")]
    OutOfRange { x: f32, min: f32, max: f32 },

    /// Segment index without valid i-1..i+2 neighbours
    #[error("segment index {index} is outside [{first}, {last}]")]
    InvalidSegment {
        index: usize,
        first: usize,
        last: usize,
    },

    /// Two slope samples landed on the same x
    #[error("degenerate slope at x = {x}: sampled points share an x coordinate")]
    DegenerateSlope { x: f32 },
}

/// Why a run could not be started
#[derive(Debug, Error)]
pub enum SimError {
    #[error("rejected tuning: {0}")]
    Tuning(#[from] TuningError),

    #[error(transparent)]
    Spline(#[from] SplineError),
}
