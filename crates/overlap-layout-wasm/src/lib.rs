//! WASM bindings for overlap-layout.
//!
//! Exposes column packing, the full layout pass and title wrapping to
//! JavaScript via `wasm-bindgen`. Complex types cross the boundary as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-layout-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/overlap-layout-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_layout_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use overlap_layout::{DisplayWindow, Event, LayoutOptions, MonospaceMetrics, Rect};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AssignmentDto {
    title: String,
    start: String,
    end: String,
    column_index: u32,
    column_count: u32,
}

#[derive(Serialize)]
struct RectDto {
    title: String,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    column_index: u32,
    column_count: u32,
}

#[derive(Serialize)]
struct LayoutDto {
    rects: Vec<RectDto>,
    dividers: Vec<f64>,
}

#[derive(Serialize)]
struct TextLineDto {
    text: String,
    x: f64,
    y: f64,
}

/// Input format for events passed from JavaScript.
#[derive(Deserialize)]
struct EventInput {
    start: String,
    end: String,
    #[serde(default)]
    title: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-02-17T14:00:00+00:00")
/// and naive local time (e.g., "2026-02-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn millis_to_rfc3339(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Convert a JSON array of `{start, end, title}` objects into `Vec<Event>`.
fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    let inputs: Vec<EventInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            Event::from_datetimes(start, end, input.title)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .collect()
}

fn parse_window(window_start: &str, window_end: &str) -> Result<DisplayWindow, JsValue> {
    let ws = parse_datetime(window_start)?;
    let we = parse_datetime(window_end)?;
    DisplayWindow::new(ws.timestamp_millis(), we.timestamp_millis())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Assign every event a column index and column count.
///
/// `events_json` must be a JSON array of `{start, end, title}` objects with
/// ISO 8601 datetimes. Returns a JSON array of assignments in the order the
/// events opened, with clipped `start`/`end` as RFC 3339 strings.
#[wasm_bindgen(js_name = "packColumns")]
pub fn pack_columns(
    events_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let window = parse_window(window_start, window_end)?;

    let packing =
        overlap_layout::pack(&events, &window).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dtos: Vec<AssignmentDto> = packing
        .assignments
        .iter()
        .map(|a| AssignmentDto {
            title: events[a.event_index].title().to_string(),
            start: millis_to_rfc3339(a.interval.start_ms),
            end: millis_to_rfc3339(a.interval.end_ms),
            column_index: a.column_index,
            column_count: a.column_count,
        })
        .collect();

    to_json(&dtos)
}

/// Run the full layout pass into a `width` x `height` container at
/// (`left`, `top`).
///
/// Returns `{rects, dividers}` as JSON. `timezone` (IANA, default UTC) only
/// affects which hours the dividers align to.
#[wasm_bindgen(js_name = "computeLayout")]
#[allow(clippy::too_many_arguments)]
pub fn compute_layout(
    events_json: &str,
    window_start: &str,
    window_end: &str,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    padding: f64,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let window = parse_window(window_start, window_end)?;
    let divider_zone = match timezone.as_deref() {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|e| JsValue::from_str(&format!("Invalid timezone '{}': {}", name, e)))?,
        None => Tz::UTC,
    };
    let container = Rect::new(left, top, left + width, top + height);
    let options = LayoutOptions {
        padding,
        divider_zone,
    };

    let layout = overlap_layout::compute_layout(&events, &window, &container, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dto = LayoutDto {
        rects: layout
            .rects
            .iter()
            .map(|r| RectDto {
                title: r.event.title().to_string(),
                left: r.rect.left,
                top: r.rect.top,
                right: r.rect.right,
                bottom: r.rect.bottom,
                column_index: r.column_index,
                column_count: r.column_count,
            })
            .collect(),
        dividers: layout.dividers,
    };

    to_json(&dto)
}

/// Wrap `text` inside a rectangle using fixed-width font metrics.
///
/// Returns a JSON array of `{text, x, y}` baselines; text that does not fit
/// is dropped.
#[wasm_bindgen(js_name = "wrapText")]
#[allow(clippy::too_many_arguments)]
pub fn wrap_text(
    text: &str,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    padding: f64,
    text_size: f64,
    char_width: f64,
) -> Result<String, JsValue> {
    let rect = Rect::new(left, top, right, bottom);
    let metrics = MonospaceMetrics::new(text_size, char_width);

    let dtos: Vec<TextLineDto> = overlap_layout::wrap_text(text, &rect, &metrics, padding)
        .map(|line| TextLineDto {
            text: line.text.to_string(),
            x: line.x,
            y: line.y,
        })
        .collect();

    to_json(&dtos)
}
