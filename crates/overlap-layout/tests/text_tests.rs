//! Tests for greedy title wrapping.

use overlap_layout::{
    compute_layout, wrap_text, DisplayWindow, Event, FontMetrics, LayoutOptions, MonospaceMetrics,
    Rect, TextLine,
};

fn lines<'t>(text: &'t str, rect: &Rect, metrics: &'t MonospaceMetrics, padding: f64) -> Vec<TextLine<'t>> {
    wrap_text(text, rect, metrics, padding).collect()
}

#[test]
fn short_title_fits_on_one_line() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    let rect = Rect::from_size(60.0, 40.0);

    let out = lines("Hi", &rect, &metrics, 5.0);

    assert_eq!(
        out,
        vec![TextLine {
            text: "Hi",
            x: 5.0,
            y: 15.0
        }]
    );
}

#[test]
fn long_title_breaks_and_truncates() {
    // 50 px of usable width at 5 px per char: 10 chars per line.
    // Baselines at 15 and 25; 35 is not above bottom - padding.
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    let rect = Rect::from_size(60.0, 40.0);

    let out = lines("abcdefghijklmnopqrstuvwxyz", &rect, &metrics, 5.0);
    let texts: Vec<&str> = out.iter().map(|l| l.text).collect();
    let ys: Vec<f64> = out.iter().map(|l| l.y).collect();

    assert_eq!(texts, vec!["abcdefghij", "klmnopqrst"]);
    assert_eq!(ys, vec![15.0, 25.0]);
}

#[test]
fn text_is_positioned_relative_to_rect() {
    let metrics = MonospaceMetrics::new(12.0, 6.0);
    let rect = Rect::new(100.0, 200.0, 200.0, 300.0);

    let out = lines("Lunch", &rect, &metrics, 4.0);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].x, 104.0);
    assert_eq!(out[0].y, 216.0);
}

#[test]
fn empty_title_yields_no_lines() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);

    assert!(lines("", &Rect::from_size(100.0, 100.0), &metrics, 2.0).is_empty());
}

#[test]
fn rect_too_short_yields_no_lines() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    // First baseline would be at 12, limit is 10.
    let rect = Rect::from_size(100.0, 12.0);

    assert!(lines("Standup", &rect, &metrics, 2.0).is_empty());
}

#[test]
fn narrow_rect_still_advances_one_char_per_line() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    // 4 px of usable width, narrower than any glyph.
    let rect = Rect::from_size(8.0, 100.0);

    let out = lines("abc", &rect, &metrics, 2.0);
    let texts: Vec<&str> = out.iter().map(|l| l.text).collect();

    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    let rect = Rect::from_size(20.0, 100.0);

    let out = lines("日本語の会議", &rect, &metrics, 0.0);
    let texts: Vec<&str> = out.iter().map(|l| l.text).collect();

    assert_eq!(texts, vec!["日本語の", "会議"]);
}

/// Wide capitals, narrow everything else.
struct ProportionalMetrics;

impl FontMetrics for ProportionalMetrics {
    fn text_size(&self) -> f64 {
        10.0
    }

    fn advance(&self, ch: char) -> f64 {
        if ch.is_uppercase() {
            8.0
        } else {
            4.0
        }
    }
}

#[test]
fn proportional_metrics_drive_breaks() {
    let rect = Rect::from_size(20.0, 100.0);

    let out: Vec<TextLine<'_>> = wrap_text("ABcdef", &rect, &ProportionalMetrics, 0.0).collect();
    let texts: Vec<&str> = out.iter().map(|l| l.text).collect();

    // "AB" = 16, + "c" = 20 fits exactly; "def" = 12.
    assert_eq!(texts, vec!["ABc", "def"]);
}

#[test]
fn sequence_is_single_pass() {
    let metrics = MonospaceMetrics::new(10.0, 5.0);
    let rect = Rect::from_size(30.0, 100.0);
    let mut iter = wrap_text("abcdefghij", &rect, &metrics, 0.0);

    assert_eq!(iter.next().map(|l| l.text), Some("abcdef"));
    assert_eq!(iter.next().map(|l| l.text), Some("ghij"));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn drawable_rect_wraps_its_own_title() {
    const HOUR: i64 = 60 * 60 * 1000;
    let events = vec![Event::new(9 * HOUR, 11 * HOUR, "Quarterly planning").unwrap()];
    let window = DisplayWindow::new(0, 24 * HOUR - 1).unwrap();
    let options = LayoutOptions {
        padding: 4.0,
        ..LayoutOptions::default()
    };
    let layout = compute_layout(&events, &window, &Rect::from_size(58.0, 208.0), &options).unwrap();
    let metrics = MonospaceMetrics::new(10.0, 5.0);

    // Rect is 50 px wide; 42 px of text width fits 8 chars.
    let texts: Vec<&str> = layout.rects[0]
        .title_lines(&metrics, 4.0)
        .map(|l| l.text)
        .collect();

    assert_eq!(texts, vec!["Quarterl", "y planni", "ng"]);
}
