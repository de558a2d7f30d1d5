//! JSON event input for the CLI.
//!
//! Accepts an array of `{start, end, title}` objects where `start` and `end`
//! are either epoch milliseconds or ISO 8601 strings.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use overlap_layout::Event;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
pub enum InstantInput {
    Millis(i64),
    Text(String),
}

#[derive(Deserialize)]
struct EventInput {
    start: InstantInput,
    end: InstantInput,
    #[serde(default)]
    title: String,
}

/// Parse an ISO 8601 datetime string into epoch milliseconds.
///
/// Accepts RFC 3339 (with offset) and naive `%Y-%m-%dT%H:%M:%S`, which is
/// interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).timestamp_millis());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc().timestamp_millis())
        .map_err(|e| anyhow!("Invalid datetime '{}': {}", s, e))
}

pub fn resolve_instant(instant: &InstantInput) -> Result<i64> {
    match instant {
        InstantInput::Millis(ms) => Ok(*ms),
        InstantInput::Text(s) => parse_datetime(s),
    }
}

/// Convert a JSON array of event objects into validated [`Event`]s.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let inputs: Vec<EventInput> =
        serde_json::from_str(json).context("Invalid events JSON")?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(idx, input)| {
            let start = resolve_instant(&input.start)?;
            let end = resolve_instant(&input.end)?;
            Event::new(start, end, input.title)
                .with_context(|| format!("Invalid event at index {}", idx))
        })
        .collect()
}
