//! Greedy multi-line fitting of a title inside a rectangle.
//!
//! Lines are filled top to bottom, each taking as many characters as fit in
//! the padded width. When the rectangle runs out of vertical room the rest of
//! the text is dropped; truncation is not an error.

use crate::geometry::{DrawableRect, Rect};

/// Font measurements needed to break text into lines.
pub trait FontMetrics {
    /// Line advance in pixels; also the offset of the first baseline.
    fn text_size(&self) -> f64;

    /// Horizontal advance of a single character.
    fn advance(&self, ch: char) -> f64;

    /// Byte length of the longest prefix of `text` whose width does not
    /// exceed `max_width`. Always a char boundary.
    fn break_text(&self, text: &str, max_width: f64) -> usize {
        let mut width = 0.0;
        for (idx, ch) in text.char_indices() {
            width += self.advance(ch);
            if width > max_width {
                return idx;
            }
        }
        text.len()
    }
}

/// Fixed-width font: every character advances by `char_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub text_size: f64,
    pub char_width: f64,
}

impl MonospaceMetrics {
    pub fn new(text_size: f64, char_width: f64) -> Self {
        Self {
            text_size,
            char_width,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_size(&self) -> f64 {
        self.text_size
    }

    fn advance(&self, _ch: char) -> f64 {
        self.char_width
    }
}

/// One line of fitted text, positioned at its left baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLine<'t> {
    pub text: &'t str,
    pub x: f64,
    pub y: f64,
}

/// Lazy, single-pass sequence of [`TextLine`]s. See [`wrap_text`].
///
/// Consumed lines cannot be replayed; the sequence is not `Clone`:
///
/// ```compile_fail
/// use overlap_layout::{wrap_text, MonospaceMetrics, Rect};
///
/// let metrics = MonospaceMetrics::new(10.0, 5.0);
/// let rect = Rect::from_size(30.0, 100.0);
/// let lines = wrap_text("abcdefghij", &rect, &metrics, 0.0);
/// let _again = lines.clone();
/// ```
#[derive(Debug)]
pub struct TextLines<'t, M: ?Sized> {
    remaining: &'t str,
    metrics: &'t M,
    x: f64,
    y: f64,
    max_width: f64,
    limit_y: f64,
}

impl<'t, M: FontMetrics + ?Sized> Iterator for TextLines<'t, M> {
    type Item = TextLine<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() || self.y >= self.limit_y {
            return None;
        }

        let mut split = self.metrics.break_text(self.remaining, self.max_width);
        if split == 0 {
            // Take one character even if it overflows so every line advances.
            split = self
                .remaining
                .chars()
                .next()
                .map_or(self.remaining.len(), char::len_utf8);
        }

        let (line, rest) = self.remaining.split_at(split);
        let item = TextLine {
            text: line,
            x: self.x,
            y: self.y,
        };
        self.remaining = rest;
        self.y += self.metrics.text_size();
        if self.metrics.text_size() <= 0.0 {
            // Without a positive line advance the loop bound never moves.
            self.limit_y = self.y;
        }
        Some(item)
    }
}

impl<'t, M: FontMetrics + ?Sized> std::iter::FusedIterator for TextLines<'t, M> {}

/// Break `text` into lines that fit inside `rect` with `padding` on every side.
///
/// The first baseline sits at `rect.top + padding + text_size`. Lines keep
/// coming while text remains and the baseline is above
/// `rect.bottom - padding`.
pub fn wrap_text<'t, M: FontMetrics + ?Sized>(
    text: &'t str,
    rect: &Rect,
    metrics: &'t M,
    padding: f64,
) -> TextLines<'t, M> {
    TextLines {
        remaining: text,
        metrics,
        x: rect.left + padding,
        y: rect.top + padding + metrics.text_size(),
        max_width: rect.width() - 2.0 * padding,
        limit_y: rect.bottom - padding,
    }
}

impl DrawableRect {
    /// Fit this rectangle's event title inside it.
    pub fn title_lines<'t, M: FontMetrics + ?Sized>(
        &'t self,
        metrics: &'t M,
        padding: f64,
    ) -> TextLines<'t, M> {
        wrap_text(self.event.title(), &self.rect, metrics, padding)
    }
}
