//! Pixel geometry for drawing a document with a monospace font.
//!
//! Measuring a font is the host's job; it hands the results over as
//! [`FontMetrics`]. [`TextLayout`] turns document positions into pixel
//! rectangles for the caret and selection highlight, and pointer
//! coordinates back into positions.

use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};
use crate::text::buffer::TextBuffer;
use crate::text::selection::{LineRange, Position, RangeEnd};

/// Measured metrics of the editor font.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Font family, as a CSS-style family list.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Advance of one single-width glyph in pixels.
    pub char_width: f32,
    /// Line height in pixels.
    pub line_height: f32,
    /// Distance from the top of a line to its baseline in pixels.
    pub baseline: f32,
}

impl Default for FontMetrics {
    /// Typical measurements of 14px Courier New.
    fn default() -> Self {
        Self {
            family: "\"Courier New\", Courier, monospace".to_owned(),
            size: 14.0,
            char_width: 8.4,
            line_height: 17.0,
            baseline: 13.0,
        }
    }
}

impl FontMetrics {
    /// Create metrics from host measurements, rejecting unusable values.
    pub fn new(
        family: impl Into<String>,
        size: f32,
        char_width: f32,
        line_height: f32,
        baseline: f32,
    ) -> Result<Self> {
        let metrics = Self {
            family: family.into(),
            size,
            char_width,
            line_height,
            baseline,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check that every metric is a finite number, and all but the baseline
    /// are positive.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("size", self.size),
            ("char_width", self.char_width),
            ("line_height", self.line_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidMetrics { field, value });
            }
        }
        if !self.baseline.is_finite() || self.baseline < 0.0 {
            return Err(Error::InvalidMetrics {
                field: "baseline",
                value: self.baseline,
            });
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl PixelRect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Number of monospace cells a char occupies.
///
/// ASCII printable chars take one cell, East Asian wide chars two,
/// combining marks none. Control chars still get a cell so the caret never
/// stacks on top of them.
#[must_use]
pub fn cell_width(c: char) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Maps document positions to pixels for a given font.
#[derive(Clone, Copy, Debug)]
pub struct TextLayout<'a> {
    metrics: &'a FontMetrics,
}

impl<'a> TextLayout<'a> {
    /// Create a layout over measured metrics.
    #[must_use]
    pub fn new(metrics: &'a FontMetrics) -> Self {
        Self { metrics }
    }

    /// Y coordinate of the top of a row.
    #[must_use]
    pub fn line_top(&self, row: usize) -> f32 {
        self.metrics.line_height * row as f32
    }

    /// Y coordinate at which a row's text is drawn.
    #[must_use]
    pub fn line_baseline(&self, row: usize) -> f32 {
        self.line_top(row) + self.metrics.baseline
    }

    /// X coordinate of a column within a line's content.
    #[must_use]
    pub fn column_x(&self, line: &str, column: usize) -> f32 {
        let cells: usize = line
            .chars()
            .take_while(|&c| c != '\n')
            .take(column)
            .map(cell_width)
            .sum();
        self.metrics.char_width * cells as f32
    }

    /// Rectangle of a 1px caret at `position`.
    #[must_use]
    pub fn caret_rect(&self, doc: &TextBuffer, position: Position) -> PixelRect {
        let line = doc.line(position.line).unwrap_or_default();
        PixelRect::new(
            self.column_x(line, position.character),
            self.line_top(position.line),
            1.0,
            self.metrics.line_height,
        )
    }

    /// Highlight rectangles for per-line selection ranges.
    ///
    /// Ranges running to the end of the line extend to `viewport_width`.
    /// Lines missing from `doc` are skipped.
    pub fn selection_rects<'r>(
        &self,
        doc: &TextBuffer,
        ranges: impl IntoIterator<Item = (&'r usize, &'r LineRange)>,
        viewport_width: f32,
    ) -> Vec<PixelRect> {
        ranges
            .into_iter()
            .filter_map(|(&row, range)| {
                let line = doc.line(row)?;
                let x = self.column_x(line, range.start);
                let right = match range.end {
                    RangeEnd::Column(column) => self.column_x(line, column),
                    RangeEnd::EndOfLine => viewport_width.max(x),
                };
                Some(PixelRect::new(
                    x,
                    self.line_top(row),
                    (right - x).max(0.0),
                    self.metrics.line_height,
                ))
            })
            .collect()
    }

    /// Number of rows that fit in a viewport, capped at the line count.
    #[must_use]
    pub fn visible_rows(&self, viewport_height: f32, line_count: usize) -> usize {
        let rows = (viewport_height / self.metrics.line_height).ceil();
        if rows <= 0.0 {
            return 0;
        }
        (rows as usize).min(line_count)
    }

    /// Document position under a pointer.
    ///
    /// Points above or left of the text map to the first row/column; points
    /// past a line's end map to its end. Clicks land on the nearest glyph
    /// boundary.
    #[must_use]
    pub fn hit_test(&self, doc: &TextBuffer, x: f32, y: f32) -> Position {
        let row = if y <= 0.0 {
            0
        } else {
            ((y / self.metrics.line_height) as usize).min(doc.line_count() - 1)
        };
        let content = doc.line_content(row).unwrap_or_default();

        let mut left = 0.0;
        for (column, c) in content.chars().enumerate() {
            let advance = self.metrics.char_width * cell_width(c) as f32;
            if x < left + advance / 2.0 {
                return Position::new(row, column);
            }
            left += advance;
        }
        Position::new(row, content.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn metrics() -> FontMetrics {
        FontMetrics::new("monospace", 10.0, 6.0, 12.0, 9.0).unwrap()
    }

    #[test]
    fn test_metrics_validation() {
        assert!(FontMetrics::default().validate().is_ok());
        assert_eq!(
            FontMetrics::new("mono", 10.0, 0.0, 12.0, 9.0),
            Err(Error::InvalidMetrics {
                field: "char_width",
                value: 0.0
            })
        );
        assert!(FontMetrics::new("mono", f32::NAN, 6.0, 12.0, 9.0).is_err());
        assert!(FontMetrics::new("mono", 10.0, 6.0, 12.0, -1.0).is_err());
    }

    #[test]
    fn test_line_geometry() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        assert_eq!(layout.line_top(0), 0.0);
        assert_eq!(layout.line_top(3), 36.0);
        assert_eq!(layout.line_baseline(2), 33.0);
    }

    #[test]
    fn test_column_x_uses_cell_widths() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        assert_eq!(layout.column_x("abc\n", 2), 12.0);
        assert_eq!(layout.column_x("abc\n", 10), 18.0);
        assert_eq!(layout.column_x("日本", 1), 12.0);
        assert_eq!(layout.column_x("e\u{301}x", 2), 6.0);
    }

    #[test]
    fn test_caret_rect() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        let doc = TextBuffer::with_text("Line1\nLine2");
        let rect = layout.caret_rect(&doc, Position::new(1, 3));
        assert_eq!(rect, PixelRect::new(18.0, 12.0, 1.0, 12.0));
    }

    #[test]
    fn test_selection_rects() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        let doc = TextBuffer::with_text("Line1\nLine2");
        let mut ranges = BTreeMap::new();
        ranges.insert(
            0,
            LineRange {
                start: 1,
                end: RangeEnd::EndOfLine,
            },
        );
        ranges.insert(
            1,
            LineRange {
                start: 0,
                end: RangeEnd::Column(3),
            },
        );

        let rects = layout.selection_rects(&doc, &ranges, 100.0);
        assert_eq!(
            rects,
            vec![
                PixelRect::new(6.0, 0.0, 94.0, 12.0),
                PixelRect::new(0.0, 12.0, 18.0, 12.0),
            ]
        );
    }

    #[test]
    fn test_visible_rows() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        assert_eq!(layout.visible_rows(480.0, 100), 40);
        assert_eq!(layout.visible_rows(481.0, 100), 41);
        assert_eq!(layout.visible_rows(480.0, 5), 5);
        assert_eq!(layout.visible_rows(0.0, 5), 0);
    }

    #[test]
    fn test_hit_test() {
        let metrics = metrics();
        let layout = TextLayout::new(&metrics);
        let doc = TextBuffer::with_text("Line1\nLine2");

        assert_eq!(layout.hit_test(&doc, 0.0, 0.0), Position::new(0, 0));
        assert_eq!(layout.hit_test(&doc, 7.0, 5.0), Position::new(0, 1));
        assert_eq!(layout.hit_test(&doc, 10.0, 13.0), Position::new(1, 2));
        assert_eq!(layout.hit_test(&doc, 500.0, 500.0), Position::new(1, 5));
        assert_eq!(layout.hit_test(&doc, -5.0, -5.0), Position::new(0, 0));
    }
}
