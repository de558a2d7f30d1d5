//! Map packed columns onto pixel rectangles inside a container.
//!
//! Time runs top to bottom at a constant pixels-per-millisecond scale derived
//! from the packing's union span, not the requested display window. Each
//! event's width depends only on its own `column_count`, so events in a busy
//! stretch of the day get narrower rectangles than events elsewhere.

use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::{DisplayWindow, Event, TimeSpan};
use crate::packer::{self, Packing};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Upper bound on the dividers [`hour_boundaries`] produces (about ten years).
pub const MAX_HOUR_BOUNDARIES: i64 = 24 * 366 * 10;

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Knobs for the geometry pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Gap in pixels around the container edge and between columns.
    pub padding: f64,
    /// Zone whose wall-clock hours the divider lines are aligned to.
    pub divider_zone: Tz,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 0.0,
            divider_zone: Tz::UTC,
        }
    }
}

/// One event's final rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawableRect {
    pub rect: Rect,
    pub event: Event,
    pub column_index: u32,
    pub column_count: u32,
}

/// Output of a full layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Rectangles in the order their events opened.
    pub rects: Vec<DrawableRect>,
    /// y-positions of the hour divider lines, top to bottom.
    pub dividers: Vec<f64>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.dividers.is_empty()
    }
}

/// Width of one column when `column_count` columns share `available_width`,
/// with `padding` around the outside and between neighbouring columns.
pub fn column_width(available_width: f64, padding: f64, column_count: u32) -> f64 {
    let count = f64::from(column_count.max(1));
    (available_width - 2.0 * padding - (count - 1.0) * padding) / count
}

/// Convert a packing of `events` into rectangles and hour dividers.
///
/// `events` must be the slice that was passed to [`packer::pack`]; assignments
/// pointing outside it are skipped. An empty packing yields an empty layout.
pub fn layout(
    packing: &Packing,
    events: &[Event],
    container: &Rect,
    options: &LayoutOptions,
) -> Layout {
    let Some(span) = packing.span else {
        return Layout::default();
    };
    let Some(duration_ms) = span.checked_duration_ms().filter(|&d| d > 0) else {
        return Layout::default();
    };

    let padding = options.padding;
    let px_per_ms = (container.height() - 2.0 * padding) / duration_ms as f64;
    let origin_y = container.top + padding;

    let rects: Vec<DrawableRect> = packing
        .assignments
        .iter()
        .filter_map(|assignment| {
            let Some(event) = events.get(assignment.event_index) else {
                tracing::warn!(
                    event_index = assignment.event_index,
                    events = events.len(),
                    "assignment refers to a missing event, skipping"
                );
                return None;
            };
            let width = column_width(container.width(), padding, assignment.column_count);
            let left =
                container.left + padding + f64::from(assignment.column_index) * (width + padding);
            let top = origin_y + px_per_ms * offset_ms(assignment.interval.start_ms, &span);
            let bottom = top + px_per_ms * assignment.interval.duration_ms() as f64;
            Some(DrawableRect {
                rect: Rect::new(left, top, left + width, bottom),
                event: event.clone(),
                column_index: assignment.column_index,
                column_count: assignment.column_count,
            })
        })
        .collect();

    let dividers: Vec<f64> = hour_boundaries(&span, options.divider_zone)
        .into_iter()
        .map(|instant_ms| origin_y + px_per_ms * offset_ms(instant_ms, &span))
        .collect();

    tracing::debug!(
        rects = rects.len(),
        dividers = dividers.len(),
        px_per_ms,
        "mapped packing onto container"
    );

    Layout { rects, dividers }
}

/// Milliseconds from the start of `span` to `instant_ms`.
fn offset_ms(instant_ms: i64, span: &TimeSpan) -> f64 {
    (i128::from(instant_ms) - i128::from(span.min_ms)) as f64
}

/// Pack `events` within `window` and map the result onto `container`.
///
/// Either the whole pass succeeds or no geometry is returned.
pub fn compute_layout(
    events: &[Event],
    window: &DisplayWindow,
    container: &Rect,
    options: &LayoutOptions,
) -> Result<Layout> {
    let packing = packer::pack(events, window)?;
    Ok(layout(&packing, events, container, options))
}

/// Whole-hour instants after `span.min_ms` and before the last whole hour at
/// or before `span.max_ms`, aligned to `zone`'s wall clock.
///
/// The zone's UTC offset at `span.min_ms` fixes the alignment; boundaries are
/// then spaced exactly one hour apart. Spans longer than
/// [`MAX_HOUR_BOUNDARIES`] hours, or too close to the `i64` limits to align,
/// yield no boundaries.
pub fn hour_boundaries(span: &TimeSpan, zone: Tz) -> Vec<i64> {
    let offset_ms = DateTime::from_timestamp_millis(span.min_ms)
        .map(|utc| {
            i64::from(
                zone.offset_from_utc_datetime(&utc.naive_utc())
                    .fix()
                    .local_minus_utc(),
            ) * 1000
        })
        .unwrap_or(0);

    let (Some(first), Some(last)) = (
        floor_hour(span.min_ms, offset_ms).and_then(|h| h.checked_add(MILLIS_PER_HOUR)),
        floor_hour(span.max_ms, offset_ms),
    ) else {
        return Vec::new();
    };
    if first >= last {
        return Vec::new();
    }

    let count = (i128::from(last) - i128::from(first)) / i128::from(MILLIS_PER_HOUR);
    if count > i128::from(MAX_HOUR_BOUNDARIES) {
        tracing::warn!(
            min_ms = span.min_ms,
            max_ms = span.max_ms,
            hours = %count,
            "span too long for hour dividers, omitting them"
        );
        return Vec::new();
    }

    (0..count as i64)
        .map(|hour| first + hour * MILLIS_PER_HOUR)
        .collect()
}

/// Start of the wall-clock hour containing `instant_ms`, for a zone
/// `offset_ms` ahead of UTC.
fn floor_hour(instant_ms: i64, offset_ms: i64) -> Option<i64> {
    let local = instant_ms.checked_add(offset_ms)?;
    local
        .div_euclid(MILLIS_PER_HOUR)
        .checked_mul(MILLIS_PER_HOUR)?
        .checked_sub(offset_ms)
}

/// Phase offset that centres a dashed divider pattern across `width`.
pub fn dash_phase(width: f64, dash_on: f64, dash_off: f64) -> f64 {
    let period = dash_on + dash_off;
    if period <= 0.0 {
        return 0.0;
    }
    (width % period) / 2.0
}
