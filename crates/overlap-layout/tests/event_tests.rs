//! Tests for events, display windows and clipping.

use std::cmp::Ordering;

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use overlap_layout::{sort_chronologically, DisplayWindow, Event, LayoutError};

const HOUR: i64 = 60 * 60 * 1000;

#[test]
fn inverted_event_is_rejected() {
    let err = Event::new(2 * HOUR, HOUR, "Backwards").unwrap_err();

    assert_eq!(
        err,
        LayoutError::InvalidEvent {
            start_ms: 2 * HOUR,
            end_ms: HOUR
        }
    );
}

#[test]
fn zero_duration_event_is_allowed() {
    let event = Event::new(HOUR, HOUR, "Reminder").unwrap();

    assert_eq!(event.duration_ms(), 0);
    assert_eq!(event.title(), "Reminder");
}

#[test]
fn deserialization_validates_range() {
    let ok: Event = serde_json::from_str(r#"{"start_ms":0,"end_ms":10,"title":"x"}"#).unwrap();
    assert_eq!((ok.start_ms(), ok.end_ms()), (0, 10));

    let bad = serde_json::from_str::<Event>(r#"{"start_ms":10,"end_ms":0,"title":"x"}"#);
    assert!(bad.is_err(), "inverted events must not deserialize");
}

#[test]
fn deserialization_defaults_missing_title() {
    let event: Event = serde_json::from_str(r#"{"start_ms":0,"end_ms":10}"#).unwrap();

    assert_eq!(event.title(), "");
}

#[test]
fn chronological_order_is_start_then_end() {
    let a = Event::new(0, 10, "a").unwrap();
    let b = Event::new(0, 20, "b").unwrap();
    let c = Event::new(5, 6, "c").unwrap();
    let a_again = Event::new(0, 10, "different title").unwrap();

    assert_eq!(a.cmp_chronological(&b), Ordering::Less);
    assert_eq!(b.cmp_chronological(&c), Ordering::Less);
    assert_eq!(a.cmp_chronological(&a_again), Ordering::Equal);
}

#[test]
fn sort_is_stable_for_equal_ranges() {
    let mut events = vec![
        Event::new(5, 6, "late").unwrap(),
        Event::new(0, 10, "first").unwrap(),
        Event::new(0, 10, "second").unwrap(),
    ];

    sort_chronologically(&mut events);
    let titles: Vec<&str> = events.iter().map(Event::title).collect();

    assert_eq!(titles, vec!["first", "second", "late"]);
}

#[test]
fn inverted_window_is_rejected() {
    assert!(matches!(
        DisplayWindow::new(10, 0),
        Err(LayoutError::InvalidWindow { .. })
    ));
}

#[test]
fn utc_day_window_spans_midnight_to_midnight_minus_one_ms() {
    let window = DisplayWindow::for_day(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), Tz::UTC);

    assert_eq!(
        window.min_ms(),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    );
    assert_eq!(
        window.max_ms(),
        Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
            - 1
    );
}

#[test]
fn spring_forward_day_is_23_hours() {
    // 2026-03-08 is the US DST start.
    let window = DisplayWindow::for_day(
        NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
        Tz::America__New_York,
    );

    assert_eq!(window.max_ms() - window.min_ms() + 1, 23 * HOUR);
    assert_eq!(
        window.min_ms(),
        Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0)
            .unwrap()
            .timestamp_millis()
    );
}

#[test]
fn clip_intersects_with_window() {
    let window = DisplayWindow::new(10 * HOUR, 20 * HOUR).unwrap();

    let inside = Event::new(12 * HOUR, 13 * HOUR, "").unwrap().clip(&window);
    assert_eq!((inside.start_ms, inside.end_ms), (12 * HOUR, 13 * HOUR));

    let straddling = Event::new(8 * HOUR, 22 * HOUR, "").unwrap().clip(&window);
    assert_eq!((straddling.start_ms, straddling.end_ms), (10 * HOUR, 20 * HOUR));
}

#[test]
fn clip_collapses_outside_events_onto_boundary() {
    let window = DisplayWindow::new(10 * HOUR, 20 * HOUR).unwrap();

    let before = Event::new(HOUR, 2 * HOUR, "").unwrap().clip(&window);
    let after = Event::new(21 * HOUR, 22 * HOUR, "").unwrap().clip(&window);

    assert_eq!((before.start_ms, before.end_ms), (10 * HOUR, 10 * HOUR));
    assert_eq!((after.start_ms, after.end_ms), (20 * HOUR, 20 * HOUR));
}

#[test]
fn clipped_interval_is_half_open() {
    let window = DisplayWindow::new(0, 100).unwrap();
    let interval = Event::new(10, 20, "").unwrap().clip(&window);

    assert!(interval.contains(10));
    assert!(interval.contains(19));
    assert!(!interval.contains(20));
    assert!(window.contains(100));
}

#[test]
fn window_deserialization_validates_bounds() {
    let ok: DisplayWindow = serde_json::from_str(r#"{"min_ms":0,"max_ms":10}"#).unwrap();
    assert_eq!((ok.min_ms(), ok.max_ms()), (0, 10));

    let bad = serde_json::from_str::<DisplayWindow>(r#"{"min_ms":10,"max_ms":0}"#);
    assert!(bad.is_err());
}

#[test]
fn window_serializes_its_bounds() {
    let window = DisplayWindow::new(5, 50).unwrap();

    assert_eq!(
        serde_json::to_value(window).unwrap(),
        serde_json::json!({"min_ms": 5, "max_ms": 50})
    );
}

#[test]
fn durations_saturate_at_i64_limits() {
    let forever = Event::new(i64::MIN, i64::MAX, "Forever").unwrap();
    let window = DisplayWindow::new(i64::MIN, i64::MAX).unwrap();

    assert_eq!(forever.duration_ms(), i64::MAX);
    assert_eq!(forever.clip(&window).duration_ms(), i64::MAX);
}
