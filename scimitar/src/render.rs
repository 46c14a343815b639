//! # Render Module - A Deterministic Line Model
//!
//! Wraps a reference text into visual lines on a fixed-width grid. Front ends that draw onto a
//! character grid (such as a terminal) can render straight from a [`Layout`], map pointer
//! positions back to indices, and hand the same geometry to the vertical locator. Tests use it
//! as a synthetic stand-in for a real layout engine.
//!
//! ## Wrapping rules
//!
//! - An explicit `'\n'` ends its line (when `break_at_newlines` is set) and stays on that line
//! - Whitespace hangs at the end of the line before it, by at most one cell past `line_length`.
//!   Only a whitespace run longer than a line spills onto the next one.
//! - Unless `wrap_words` is set, a word that would overflow moves to the next line as a whole
//! - A word longer than a whole line is broken where the line is full
//!
//! ## Visual order
//!
//! Terminals draw cells strictly left to right, so right-to-left lines are mirrored here and
//! drawn against the right edge. Inside a line, a run of characters written in the opposite
//! direction (a Latin word in Hebrew text, or the reverse) keeps its own order. Whitespace and
//! punctuation between two characters of such a run belong to it.
//!
//! ```text
//! logical: ש ל ו ם _ a b c
//! visual:  a b c _ ם ו ל ש
//! ```
//!
//! ```text
//! "hello world this is a test", line_length = 10
//!
//! row 0: [hello ]
//! row 1: [world this ]
//! row 2: [is a test]
//! ```

use std::ops::Range;

use crate::locator::{GeometryLocator, GlyphBox};
use crate::text::{Direction, ReferenceText};
use crate::Float;

/// Configuration for line rendering behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRenderConfig {
    /// Maximum number of characters per line
    pub line_length: usize,
    /// Whether to allow breaking words in the middle
    pub wrap_words: bool,
    /// Whether to break at newline characters (\n)
    pub break_at_newlines: bool,
}

impl LineRenderConfig {
    pub const fn new(line_length: usize) -> Self {
        Self {
            line_length,
            wrap_words: false,
            break_at_newlines: true,
        }
    }

    pub const fn with_word_wrapping(mut self, wrap_words: bool) -> Self {
        self.wrap_words = wrap_words;
        self
    }

    pub const fn with_newline_breaking(mut self, break_at_newlines: bool) -> Self {
        self.break_at_newlines = break_at_newlines;
        self
    }
}

/// The direction a character forces on its surroundings, if any
fn strong_direction(character: char) -> Option<Direction> {
    match u32::from(character) {
        // Hebrew, Arabic, Syriac, Thaana, NKo and their presentation forms
        0x0590..=0x08FF | 0xFB1D..=0xFDFF | 0xFE70..=0xFEFF => Some(Direction::Rtl),
        _ if character.is_alphanumeric() => Some(Direction::Ltr),
        _ => None,
    }
}

/// A reference text broken into visual lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    lines: Vec<Range<usize>>,
    strong: Vec<Option<Direction>>,
    text_len: usize,
    ends_with_break: bool,
}

impl Layout {
    /// Break `text` into lines according to `config`
    ///
    /// # Performance
    ///
    /// - Time complexity: O(n) where n is text length, with O(w) lookahead for word wrapping
    /// - Space complexity: O(l) where l is the number of lines
    pub fn new(text: &ReferenceText, config: &LineRenderConfig) -> Self {
        let chars = text.chars();
        let line_length = config.line_length.max(1);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut current_line_length = 0;
        let mut ends_with_break = false;

        for (index, char) in chars.iter().enumerate() {
            ends_with_break = false;

            if config.break_at_newlines && *char == '\n' {
                lines.push(line_start..index + 1);
                line_start = index + 1;
                current_line_length = 0;
                ends_with_break = true;
                continue;
            }

            if char.is_whitespace() {
                current_line_length += 1;

                // A full line ends here, even inside a run of whitespace
                let should_break = if current_line_length >= line_length {
                    true
                } else if config.wrap_words {
                    false
                } else {
                    // Look ahead to see if the next word would fit
                    let next_word_length = chars[index + 1..]
                        .iter()
                        .take_while(|c| !c.is_whitespace())
                        .count();
                    next_word_length > 0 && current_line_length + next_word_length > line_length
                };

                if should_break {
                    lines.push(line_start..index + 1);
                    line_start = index + 1;
                    current_line_length = 0;
                }
                continue;
            }

            // Check if adding this character would exceed line length
            if current_line_length >= line_length {
                lines.push(line_start..index);
                line_start = index;
                current_line_length = 0;
            }

            current_line_length += 1;
        }

        // Add the final line if it has content
        if line_start < chars.len() {
            lines.push(line_start..chars.len());
        }

        Self {
            lines,
            strong: chars.iter().copied().map(strong_direction).collect(),
            text_len: chars.len(),
            ends_with_break,
        }
    }

    /// Index ranges of every visual line, top to bottom
    pub fn lines(&self) -> &[Range<usize>] {
        &self.lines
    }

    /// Number of rows needed to show the text and a cursor past its end
    pub fn row_count(&self) -> usize {
        self.cursor_position(self.text_len).0 + 1
    }

    /// Row containing the character at `index`
    pub fn line_of(&self, index: usize) -> Option<usize> {
        if index >= self.text_len {
            return None;
        }
        Some(self.lines.partition_point(|line| line.end <= index))
    }

    /// Row and column of the character at `index`
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        let row = self.line_of(index)?;
        Some((row, index - self.lines[row].start))
    }

    /// Row and column at which to draw the cursor
    ///
    /// A cursor past the end sits right after the last character, or at the start of a fresh
    /// row when the text ends with a line break.
    pub fn cursor_position(&self, cursor: usize) -> (usize, usize) {
        if let Some(position) = self.position_of(cursor) {
            return position;
        }

        match self.lines.last() {
            Some(_) if self.ends_with_break => (self.lines.len(), 0),
            Some(line) => (self.lines.len() - 1, line.len()),
            None => (0, 0),
        }
    }

    /// Index of the character drawn at `row`/`col`, if any
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        let line = self.lines.get(row)?;
        let index = line.start + col;
        line.contains(&index).then_some(index)
    }

    /// Row to show at the top of a viewport of `height` rows, keeping the cursor centered
    pub fn scroll_offset(&self, cursor: usize, height: usize) -> usize {
        let (row, _) = self.cursor_position(cursor);
        let max_offset = self.row_count().saturating_sub(height);
        row.saturating_sub(height / 2).min(max_offset)
    }

    /// Runs inside `line` written against `direction`
    fn embedded_runs(&self, line: Range<usize>, direction: Direction) -> Vec<Range<usize>> {
        let opposite = Some(direction.toggled());
        let mut runs = Vec::new();
        let mut index = line.start;

        while index < line.end {
            if self.strong[index] != opposite {
                index += 1;
                continue;
            }

            let start = index;
            let mut end = index + 1;
            let mut next = index + 1;
            while next < line.end && self.strong[next] != Some(direction) {
                if self.strong[next] == opposite {
                    end = next + 1;
                }
                next += 1;
            }

            runs.push(start..end);
            index = end;
        }

        runs
    }

    /// Indices of row `row` in the order they appear on screen, left to right
    pub fn visual_order(&self, row: usize, direction: Direction) -> Vec<usize> {
        let Some(line) = self.lines.get(row) else {
            return Vec::new();
        };

        let mut order: Vec<usize> = line.clone().collect();
        for run in self.embedded_runs(line.clone(), direction) {
            order[run.start - line.start..run.end - line.start].reverse();
        }
        if direction.is_rtl() {
            order.reverse();
        }
        order
    }

    /// Screen column where row `row` starts on a `width` columns wide grid
    ///
    /// Right-to-left rows are drawn against the right edge.
    pub fn row_start(&self, row: usize, direction: Direction, width: usize) -> usize {
        match (direction, self.lines.get(row)) {
            (Direction::Rtl, Some(line)) => width.saturating_sub(line.len()),
            (Direction::Rtl, None) => width,
            (Direction::Ltr, _) => 0,
        }
    }

    /// Index of the character drawn at screen column `x` of row `row`, if any
    pub fn index_at_visual(
        &self,
        row: usize,
        x: usize,
        direction: Direction,
        width: usize,
    ) -> Option<usize> {
        let offset = x.checked_sub(self.row_start(row, direction, width))?;
        self.visual_order(row, direction).get(offset).copied()
    }

    /// Geometry of every character on a `width` columns wide grid
    pub fn glyph_boxes(&self, direction: Direction, width: usize) -> Vec<GlyphBox> {
        (0..self.lines.len())
            .flat_map(|row| {
                let start = self.row_start(row, direction, width);
                self.visual_order(row, direction)
                    .into_iter()
                    .enumerate()
                    .map(move |(offset, index)| GlyphBox {
                        index,
                        top: row as Float,
                        left: (start + offset) as Float,
                    })
            })
            .collect()
    }

    /// A vertical locator over this layout, with one unit between rows
    pub fn locator(&self, direction: Direction, width: usize) -> GeometryLocator {
        GeometryLocator::new(self.glyph_boxes(direction, width)).with_probe_offset(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{Vertical, VerticalLocator};

    fn rows(text: &str, config: LineRenderConfig) -> Vec<String> {
        let text = ReferenceText::new(text);
        Layout::new(&text, &config)
            .lines()
            .iter()
            .map(|line| text.chars()[line.clone()].iter().collect())
            .collect()
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(
            rows("hello world this is a test", LineRenderConfig::new(10)),
            vec!["hello ", "world this ", "is a test"]
        );
    }

    #[test]
    fn test_render_lines_with_word_wrapping() {
        assert_eq!(
            rows(
                "hello world",
                LineRenderConfig::new(4).with_word_wrapping(true)
            ),
            vec!["hell", "o wo", "rld"]
        );
    }

    #[test]
    fn test_whitespace_run_is_broken() {
        let config = LineRenderConfig::new(5);
        assert_eq!(
            rows("ab        cd", config),
            vec!["ab   ", "     ", "cd"]
        );
        assert_eq!(
            rows("abcde   f", config),
            vec!["abcde ", "  f"]
        );

        let text = ReferenceText::new("ab        cd");
        let layout = Layout::new(&text, &config);
        assert!(layout.lines().iter().all(|line| line.len() <= 6));
        assert_eq!(layout.cursor_position(8), (1, 3));
    }

    #[test]
    fn test_render_lines_with_newlines() {
        assert_eq!(
            rows("ab\ncd\n", LineRenderConfig::new(80)),
            vec!["ab\n", "cd\n"]
        );
        assert_eq!(
            rows(
                "ab\ncd",
                LineRenderConfig::new(80).with_newline_breaking(false)
            ),
            vec!["ab\ncd"]
        );
    }

    #[test]
    fn test_long_word_is_broken() {
        assert_eq!(
            rows("abcdefgh ij", LineRenderConfig::new(3)),
            vec!["abc", "def", "gh ", "ij"]
        );
    }

    #[test]
    fn test_positions() {
        let text = ReferenceText::new("hello world this is a test");
        let layout = Layout::new(&text, &LineRenderConfig::new(10));

        assert_eq!(layout.position_of(0), Some((0, 0)));
        assert_eq!(layout.position_of(6), Some((1, 0)));
        assert_eq!(layout.position_of(17), Some((2, 0)));
        assert_eq!(layout.position_of(26), None);
        assert_eq!(layout.cursor_position(26), (2, 9));
        assert_eq!(layout.index_at(1, 2), Some(8));
        assert_eq!(layout.index_at(0, 9), None);
        assert_eq!(layout.index_at(7, 0), None);
    }

    #[test]
    fn test_cursor_after_trailing_newline() {
        let text = ReferenceText::new("ab\n");
        let layout = Layout::new(&text, &LineRenderConfig::new(10));
        assert_eq!(layout.cursor_position(3), (1, 0));
        assert_eq!(layout.row_count(), 2);

        let empty = Layout::new(&ReferenceText::new(""), &LineRenderConfig::new(10));
        assert_eq!(empty.cursor_position(0), (0, 0));
        assert_eq!(empty.row_count(), 1);
    }

    #[test]
    fn test_scroll_offset() {
        let text = ReferenceText::new("a\nb\nc\nd\ne\nf\ng");
        let layout = Layout::new(&text, &LineRenderConfig::new(10));

        assert_eq!(layout.scroll_offset(0, 3), 0);
        // Cursor on row 3 of 7 with a 3 row viewport: rows 2..5 are visible
        assert_eq!(layout.scroll_offset(6, 3), 2);
        // Never scroll past the last row
        assert_eq!(layout.scroll_offset(12, 3), 4);
        assert_eq!(layout.scroll_offset(12, 100), 0);
    }

    fn left_of(boxes: &[GlyphBox], index: usize) -> Option<Float> {
        boxes
            .iter()
            .find(|glyph| glyph.index == index)
            .map(|glyph| glyph.left)
    }

    #[test]
    fn test_glyph_boxes_mirror_rtl() {
        let text = ReferenceText::new("אבג");
        let layout = Layout::new(&text, &LineRenderConfig::new(10));

        let ltr = layout.glyph_boxes(Direction::Ltr, 10);
        let rtl = layout.glyph_boxes(Direction::Rtl, 10);
        // A Hebrew word inside a left-to-right paragraph is still drawn right to left
        assert_eq!(left_of(&ltr, 0), Some(2.0));
        assert_eq!(left_of(&rtl, 0), Some(9.0));
        assert_eq!(left_of(&rtl, 2), Some(7.0));
    }

    #[test]
    fn test_visual_order_keeps_embedded_runs() {
        let text = ReferenceText::new("שלום abc, דף");
        let layout = Layout::new(&text, &LineRenderConfig::new(80));

        // "abc" keeps its order, the comma after it stays with the Hebrew
        assert_eq!(
            layout.visual_order(0, Direction::Rtl),
            vec![11, 10, 9, 8, 5, 6, 7, 4, 3, 2, 1, 0]
        );
        assert_eq!(
            layout.visual_order(0, Direction::Ltr),
            vec![3, 2, 1, 0, 4, 5, 6, 7, 8, 9, 11, 10]
        );
    }

    #[test]
    fn test_embedded_run_spans_inner_punctuation() {
        let text = ReferenceText::new("א Ctrl/Cmd+X ב");
        let layout = Layout::new(&text, &LineRenderConfig::new(80));

        let order = layout.visual_order(0, Direction::Rtl);
        let visual: String = order.iter().map(|&index| text.chars()[index]).collect();
        assert_eq!(visual, "ב Ctrl/Cmd+X א");
    }

    #[test]
    fn test_index_at_visual() {
        let text = ReferenceText::new("אבג\nab");
        let layout = Layout::new(&text, &LineRenderConfig::new(10));

        // Row 0 is "אבג" plus the newline, drawn against the right edge of 10 columns
        assert_eq!(layout.row_start(0, Direction::Rtl, 10), 6);
        assert_eq!(layout.index_at_visual(0, 9, Direction::Rtl, 10), Some(0));
        assert_eq!(layout.index_at_visual(0, 6, Direction::Rtl, 10), Some(3));
        assert_eq!(layout.index_at_visual(0, 5, Direction::Rtl, 10), None);
        assert_eq!(layout.index_at_visual(1, 9, Direction::Rtl, 10), Some(5));
        assert_eq!(layout.index_at_visual(1, 8, Direction::Rtl, 10), Some(4));
        assert_eq!(layout.index_at_visual(1, 0, Direction::Ltr, 10), Some(4));
        assert_eq!(layout.index_at_visual(5, 0, Direction::Ltr, 10), None);
    }

    #[test]
    fn test_layout_locator() {
        let text = ReferenceText::new("abcd efgh ijkl");
        let layout = Layout::new(&text, &LineRenderConfig::new(5));
        // rows: "abcd ", "efgh ", "ijkl"
        for direction in [Direction::Ltr, Direction::Rtl] {
            let locator = layout.locator(direction, 5);
            assert_eq!(locator.locate(1, Vertical::Down), 6);
            assert_eq!(locator.locate(11, Vertical::Up), 6);
            assert_eq!(locator.locate(11, Vertical::Down), 11);
        }
    }
}
