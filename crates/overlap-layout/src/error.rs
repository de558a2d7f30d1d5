//! Error types for overlap-layout operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The union of all clipped intervals has zero width, so there is no
    /// time axis to map onto the container.
    #[error("Degenerate layout: clipped events span [{min_ms}, {max_ms}] with zero width")]
    DegenerateLayout { min_ms: i64, max_ms: i64 },

    /// The sweep finished with columns still open. Only reachable with
    /// unbalanced input, e.g. an interval whose end precedes its start.
    #[error("Sweep invariant violated: {active} active columns and {open} open events left after sweep")]
    SweepInvariantViolation { active: i64, open: usize },

    #[error("Invalid event: start {start_ms} is after end {end_ms}")]
    InvalidEvent { start_ms: i64, end_ms: i64 },

    #[error("Invalid display window: min {min_ms} is after max {max_ms}")]
    InvalidWindow { min_ms: i64, max_ms: i64 },

    /// The clipped events span more milliseconds than an `i64` can hold.
    #[error("Span overflow: clipped events span [{min_ms}, {max_ms}], which is too wide to lay out")]
    SpanOverflow { min_ms: i64, max_ms: i64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
