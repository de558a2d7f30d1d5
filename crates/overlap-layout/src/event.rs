//! Event and time-window types consumed by the packer.
//!
//! All instants are epoch milliseconds that the caller has already resolved;
//! nothing in this module converts between timezones except when deriving a
//! day window for a given zone.

use std::cmp::Ordering;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// A titled time range to be laid out.
///
/// Immutable once constructed. `start_ms <= end_ms` is checked by
/// [`Event::new`] and by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    start_ms: i64,
    end_ms: i64,
    title: String,
}

/// Unvalidated wire form of [`Event`].
#[derive(Deserialize)]
struct EventRecord {
    start_ms: i64,
    end_ms: i64,
    #[serde(default)]
    title: String,
}

impl TryFrom<EventRecord> for Event {
    type Error = LayoutError;

    fn try_from(record: EventRecord) -> Result<Self> {
        Event::new(record.start_ms, record.end_ms, record.title)
    }
}

impl Event {
    /// Create an event, rejecting ranges whose start is after their end.
    ///
    /// Zero-duration events (`start_ms == end_ms`) are allowed.
    pub fn new(start_ms: i64, end_ms: i64, title: impl Into<String>) -> Result<Self> {
        if start_ms > end_ms {
            return Err(LayoutError::InvalidEvent { start_ms, end_ms });
        }
        Ok(Self {
            start_ms,
            end_ms,
            title: title.into(),
        })
    }

    /// Create an event from UTC datetimes.
    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        title: impl Into<String>,
    ) -> Result<Self> {
        Self::new(start.timestamp_millis(), end.timestamp_millis(), title)
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Length of the event, saturating at `i64::MAX` for ranges wider than
    /// an `i64` can hold.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Display ordering: by start, then by end. Titles are ignored, so events
    /// with identical ranges compare equal and keep their relative order under
    /// a stable sort.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        (self.start_ms, self.end_ms).cmp(&(other.start_ms, other.end_ms))
    }

    /// Intersect this event's range with `window`.
    pub fn clip(&self, window: &DisplayWindow) -> ClippedInterval {
        window.clip(self.start_ms, self.end_ms)
    }
}

/// Stable in-place sort of events into display order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by(Event::cmp_chronological);
}

/// The visible time range for one layout pass.
///
/// `min_ms <= max_ms` is checked by [`DisplayWindow::new`] and by
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRecord")]
pub struct DisplayWindow {
    min_ms: i64,
    max_ms: i64,
}

/// Unvalidated wire form of [`DisplayWindow`].
#[derive(Deserialize)]
struct WindowRecord {
    min_ms: i64,
    max_ms: i64,
}

impl TryFrom<WindowRecord> for DisplayWindow {
    type Error = LayoutError;

    fn try_from(record: WindowRecord) -> Result<Self> {
        DisplayWindow::new(record.min_ms, record.max_ms)
    }
}

impl DisplayWindow {
    pub fn new(min_ms: i64, max_ms: i64) -> Result<Self> {
        if min_ms > max_ms {
            return Err(LayoutError::InvalidWindow { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// First visible instant.
    pub fn min_ms(&self) -> i64 {
        self.min_ms
    }

    /// Last visible instant, inclusive.
    pub fn max_ms(&self) -> i64 {
        self.max_ms
    }

    /// The window covering one calendar day in `tz`: local midnight through
    /// one millisecond before the next local midnight.
    ///
    /// When midnight falls inside a DST gap the day starts at the first
    /// valid local instant after it.
    pub fn for_day(date: NaiveDate, tz: Tz) -> Self {
        let start = start_of_day(date, tz);
        let next = date
            .checked_add_days(Days::new(1))
            .map(|next| start_of_day(next, tz))
            .unwrap_or_else(|| start.saturating_add(Duration::days(1).num_milliseconds()));
        Self {
            min_ms: start,
            max_ms: next.saturating_sub(1).max(start),
        }
    }

    /// Clamp `[start_ms, end_ms]` into the window.
    ///
    /// Ranges entirely outside the window collapse to a zero-width interval
    /// on the nearest boundary rather than being dropped.
    pub fn clip(&self, start_ms: i64, end_ms: i64) -> ClippedInterval {
        ClippedInterval {
            start_ms: start_ms.clamp(self.min_ms, self.max_ms),
            end_ms: end_ms.clamp(self.min_ms, self.max_ms),
        }
    }

    pub fn contains(&self, instant_ms: i64) -> bool {
        self.min_ms <= instant_ms && instant_ms <= self.max_ms
    }
}

/// Epoch milliseconds of the first valid local instant on `date` in `tz`.
fn start_of_day(date: NaiveDate, tz: Tz) -> i64 {
    for hour in 0..24 {
        let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
            continue;
        };
        if let Some(local) = tz.from_local_datetime(&date.and_time(time)).earliest() {
            return local.timestamp_millis();
        }
    }
    tz.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .timestamp_millis()
}

/// An event range after clipping to the display window.
///
/// Fields are public so raw intervals can be fed to
/// [`crate::packer::pack_intervals`]; nothing here enforces `start_ms <= end_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClippedInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl ClippedInterval {
    /// Signed length; saturates instead of overflowing.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, instant_ms: i64) -> bool {
        self.start_ms <= instant_ms && instant_ms < self.end_ms
    }
}

/// The tightest range covered by a set of clipped intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub min_ms: i64,
    pub max_ms: i64,
}

impl TimeSpan {
    /// Length of the span, or `None` when it does not fit in an `i64`.
    pub fn checked_duration_ms(&self) -> Option<i64> {
        self.max_ms.checked_sub(self.min_ms)
    }

    /// Length of the span, saturating at the `i64` bounds.
    pub fn duration_ms(&self) -> i64 {
        self.max_ms.saturating_sub(self.min_ms)
    }
}
