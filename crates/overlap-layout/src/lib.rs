//! # overlap-layout
//!
//! Deterministic day-view layout for overlapping calendar events.
//!
//! Given events with absolute start/end instants and a visible time window,
//! the engine decides how many side-by-side columns each event needs and
//! which one it occupies, then maps the result onto a pixel container. Events
//! that overlap share the width; events that do not overlap can reuse a
//! column. Painting is left to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use overlap_layout::{compute_layout, DisplayWindow, Event, LayoutOptions, Rect};
//!
//! const HOUR: i64 = 60 * 60 * 1000;
//! let events = vec![
//!     Event::new(10 * HOUR, 12 * HOUR, "Planning").unwrap(),
//!     Event::new(11 * HOUR, 13 * HOUR, "Review").unwrap(),
//! ];
//! let window = DisplayWindow::new(0, 24 * HOUR - 1).unwrap();
//! let options = LayoutOptions { padding: 10.0, ..LayoutOptions::default() };
//!
//! let layout = compute_layout(&events, &window, &Rect::from_size(220.0, 320.0), &options).unwrap();
//! assert_eq!(layout.rects.len(), 2);
//! assert_eq!(layout.rects[0].column_count, 2);
//! assert_eq!(layout.dividers.len(), 2); // 11:00 and 12:00
//! ```
//!
//! ## Modules
//!
//! - [`event`] — `Event`, `DisplayWindow` and clipped intervals
//! - [`packer`] — sweep-line column assignment
//! - [`geometry`] — rectangles and hour dividers in pixel space
//! - [`text`] — greedy title wrapping inside a rectangle
//! - [`session`] — caller-owned state that recomputes on every change
//! - [`error`] — Error types

pub mod error;
pub mod event;
pub mod geometry;
pub mod packer;
pub mod session;
pub mod text;

pub use error::LayoutError;
pub use event::{sort_chronologically, ClippedInterval, DisplayWindow, Event, TimeSpan};
pub use geometry::{
    column_width, compute_layout, dash_phase, layout, DrawableRect, Layout, LayoutOptions, Rect,
};
pub use packer::{pack, pack_intervals, ColumnAssignment, IntervalColumns, Packing};
pub use session::LayoutSession;
pub use text::{wrap_text, FontMetrics, MonospaceMetrics, TextLine, TextLines};
