//! Sweep-line column packing for overlapping intervals.
//!
//! Every clipped interval contributes an "opens" and a "closes" boundary. The
//! boundaries are swept in time order while tracking which events are open
//! and which columns they hold. An event takes the lowest free column when it
//! opens, and every event open at that instant has its column count raised to
//! the current number of active columns, so concurrently open events always
//! agree on the peak they have seen.
//!
//! Adjacent events (one ends exactly when the next starts) do NOT overlap:
//! at equal instants, closes are processed before opens. Zero-width intervals
//! open and close between the two, so they only share columns with events
//! that are open across their instant.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::event::{ClippedInterval, DisplayWindow, Event, TimeSpan};

/// Column placement of one event within a [`Packing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnAssignment {
    /// Index of the event in the slice passed to [`pack`].
    pub event_index: usize,
    /// The event's range after clipping to the display window.
    pub interval: ClippedInterval,
    /// 0-based column, never reassigned while the event is open.
    pub column_index: u32,
    /// Peak number of simultaneously active columns during the event.
    pub column_count: u32,
}

/// Column placement of one raw interval, as produced by [`pack_intervals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalColumns {
    /// Index of the interval in the input slice.
    pub source: usize,
    pub column_index: u32,
    pub column_count: u32,
}

/// Result of packing a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packing {
    /// Assignments in the order their events opened during the sweep.
    pub assignments: Vec<ColumnAssignment>,
    /// Union of all clipped intervals; `None` when there were no events.
    pub span: Option<TimeSpan>,
    /// Largest `column_count` across all assignments.
    pub max_columns: u32,
}

impl Packing {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// The assignment for the event at `event_index` in the packed slice.
    pub fn assignment_for(&self, event_index: usize) -> Option<&ColumnAssignment> {
        self.assignments
            .iter()
            .find(|a| a.event_index == event_index)
    }
}

/// Kind of sweep boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Close,
    /// Open of a zero-width interval.
    InstantOpen,
    /// Close of a zero-width interval.
    InstantClose,
    Open,
}

impl Boundary {
    /// Tie-break rank at a single instant. Both boundaries of a zero-width
    /// interval share a rank so the stable sort keeps them adjacent.
    fn rank(self) -> u8 {
        match self {
            Boundary::Close => 0,
            Boundary::InstantOpen | Boundary::InstantClose => 1,
            Boundary::Open => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    time_ms: i64,
    boundary: Boundary,
    source: usize,
}

/// An event that is currently open, with the arena slot holding its record.
#[derive(Debug, Clone, Copy)]
struct OpenSlot {
    source: usize,
    slot: usize,
}

/// Pack `events` into columns after clipping them to `window`.
///
/// Events are placed in chronological order (start, then end); events with
/// identical ranges keep their order from `events`.
///
/// # Errors
/// Returns [`LayoutError::DegenerateLayout`] when the clipped events span zero
/// time and [`LayoutError::SpanOverflow`] when they span more milliseconds
/// than an `i64` holds. Returns [`LayoutError::SweepInvariantViolation`] if the sweep ends
/// unbalanced.
pub fn pack(events: &[Event], window: &DisplayWindow) -> Result<Packing> {
    if events.is_empty() {
        return Ok(Packing::default());
    }

    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| events[a].cmp_chronological(&events[b]));

    let intervals: Vec<ClippedInterval> = order.iter().map(|&i| events[i].clip(window)).collect();

    let span = union_span(&intervals);
    if let Some(span) = span {
        if span.max_ms <= span.min_ms {
            return Err(LayoutError::DegenerateLayout {
                min_ms: span.min_ms,
                max_ms: span.max_ms,
            });
        }
        if span.checked_duration_ms().is_none() {
            return Err(LayoutError::SpanOverflow {
                min_ms: span.min_ms,
                max_ms: span.max_ms,
            });
        }
    }

    let columns = pack_intervals(&intervals)?;

    let assignments: Vec<ColumnAssignment> = columns
        .into_iter()
        .map(|c| ColumnAssignment {
            event_index: order[c.source],
            interval: intervals[c.source],
            column_index: c.column_index,
            column_count: c.column_count,
        })
        .collect();
    let max_columns = assignments
        .iter()
        .map(|a| a.column_count)
        .max()
        .unwrap_or(0);

    tracing::debug!(
        events = events.len(),
        max_columns,
        window_min_ms = window.min_ms(),
        window_max_ms = window.max_ms(),
        "packed events into columns"
    );

    Ok(Packing {
        assignments,
        span,
        max_columns,
    })
}

/// Run the column sweep over raw intervals.
///
/// Intervals are taken as given: no clipping, no validation. Input order
/// decides placement among intervals that open at the same instant. Results
/// are returned in the order intervals opened.
///
/// # Errors
/// Returns [`LayoutError::SweepInvariantViolation`] when opens and closes do
/// not balance, which happens for intervals whose end precedes their start.
pub fn pack_intervals(intervals: &[ClippedInterval]) -> Result<Vec<IntervalColumns>> {
    let mut markers = Vec::with_capacity(intervals.len() * 2);
    for (source, interval) in intervals.iter().enumerate() {
        let (open, close) = if interval.end_ms == interval.start_ms {
            (Boundary::InstantOpen, Boundary::InstantClose)
        } else {
            (Boundary::Open, Boundary::Close)
        };
        markers.push(Marker {
            time_ms: interval.start_ms,
            boundary: open,
            source,
        });
        markers.push(Marker {
            time_ms: interval.end_ms,
            boundary: close,
            source,
        });
    }
    // Stable: opens at one instant keep input order.
    markers.sort_by_key(|m| (m.time_ms, m.boundary.rank()));

    let mut arena: Vec<IntervalColumns> = Vec::with_capacity(intervals.len());
    let mut open: Vec<OpenSlot> = Vec::new();
    let mut occupied: Vec<bool> = Vec::new();
    let mut active: i64 = 0;

    for marker in &markers {
        match marker.boundary {
            Boundary::Open | Boundary::InstantOpen => {
                let column = claim_lowest_free(&mut occupied);
                active += 1;

                let slot = arena.len();
                arena.push(IntervalColumns {
                    source: marker.source,
                    column_index: column,
                    column_count: 1,
                });
                open.push(OpenSlot {
                    source: marker.source,
                    slot,
                });

                let peak = u32::try_from(active).unwrap_or(0);
                for held in &open {
                    let record = &mut arena[held.slot];
                    record.column_count = record.column_count.max(peak);
                }
                tracing::trace!(
                    source = marker.source,
                    time_ms = marker.time_ms,
                    column,
                    active,
                    "interval opened"
                );
            }
            Boundary::Close | Boundary::InstantClose => {
                if let Some(pos) = open.iter().position(|o| o.source == marker.source) {
                    let closed = open.swap_remove(pos);
                    if let Some(cell) = occupied.get_mut(arena[closed.slot].column_index as usize) {
                        *cell = false;
                    }
                }
                active -= 1;
            }
        }
    }

    if active != 0 || !open.is_empty() {
        return Err(LayoutError::SweepInvariantViolation {
            active,
            open: open.len(),
        });
    }

    Ok(arena)
}

/// Mark the lowest unoccupied column as taken and return its index.
fn claim_lowest_free(occupied: &mut Vec<bool>) -> u32 {
    let column = match occupied.iter().position(|taken| !taken) {
        Some(free) => {
            occupied[free] = true;
            free
        }
        None => {
            occupied.push(true);
            occupied.len() - 1
        }
    };
    u32::try_from(column).unwrap_or(u32::MAX)
}

/// Smallest start and largest end over `intervals`.
fn union_span(intervals: &[ClippedInterval]) -> Option<TimeSpan> {
    let first = intervals.first()?;
    let span = intervals.iter().fold(
        TimeSpan {
            min_ms: first.start_ms,
            max_ms: first.end_ms,
        },
        |span, interval| TimeSpan {
            min_ms: span.min_ms.min(interval.start_ms),
            max_ms: span.max_ms.max(interval.end_ms),
        },
    );
    Some(span)
}
