//! # Locator Module - Vertical Movement Across Rendered Lines
//!
//! Moving the cursor up or down depends on where characters end up on screen, which only the
//! rendering layer knows. The session therefore asks a [`VerticalLocator`] for the target index
//! instead of computing it itself.
//!
//! [`GeometryLocator`] implements the lookup over a set of glyph boxes, and works for any layout
//! that can report a top/left coordinate per character: pixel positions from a GUI toolkit or
//! cell positions from a terminal grid (see [`Layout::locator`](crate::render::Layout::locator)).
//!
//! ## Algorithm
//!
//! ```text
//! reference = box of the cursor, or of the last character when the cursor is past the end
//! target    = reference.top - probe (up) / reference.top + probe (down)
//! candidates = boxes strictly above (up) / below (down) the reference
//! best      = min |top - target|, then min |left - reference.left|
//! ```

use crate::Float;

/// Default distance from the current line at which the adjacent line is expected
pub const DEFAULT_PROBE_OFFSET: Float = 10.0;

/// Requested vertical direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

impl Vertical {
    /// `-1` for up, `+1` for down
    pub const fn sign(self) -> i8 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// The on-screen position of one rendered character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    /// Index of the character in the reference text
    pub index: usize,
    pub top: Float,
    pub left: Float,
}

/// Finds the best character on the visual line above or below the cursor
pub trait VerticalLocator {
    /// Returns the index of the nearest character on the adjacent line in `direction`, or
    /// `cursor` unchanged when there is no such line.
    fn locate(&self, cursor: usize, direction: Vertical) -> usize;
}

/// A locator for when no geometry is available (yet). Never moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeometry;

impl VerticalLocator for NoGeometry {
    fn locate(&self, cursor: usize, _direction: Vertical) -> usize {
        cursor
    }
}

/// Vertical locator over a snapshot of glyph boxes
#[derive(Debug, Clone)]
pub struct GeometryLocator {
    boxes: Vec<GlyphBox>,
    probe_offset: Float,
}

impl Default for GeometryLocator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GeometryLocator {
    pub fn new(boxes: Vec<GlyphBox>) -> Self {
        Self {
            boxes,
            probe_offset: DEFAULT_PROBE_OFFSET,
        }
    }

    /// Set the distance from the current line's top at which the adjacent line is expected
    pub const fn with_probe_offset(mut self, probe_offset: Float) -> Self {
        self.probe_offset = probe_offset;
        self
    }

    pub fn boxes(&self) -> &[GlyphBox] {
        &self.boxes
    }

    fn reference_box(&self, cursor: usize) -> Option<&GlyphBox> {
        self.boxes
            .iter()
            .find(|glyph| glyph.index == cursor)
            .or_else(|| self.boxes.iter().max_by_key(|glyph| glyph.index))
    }
}

impl FromIterator<GlyphBox> for GeometryLocator {
    fn from_iter<T: IntoIterator<Item = GlyphBox>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl VerticalLocator for GeometryLocator {
    fn locate(&self, cursor: usize, direction: Vertical) -> usize {
        let Some(reference) = self.reference_box(cursor) else {
            return cursor;
        };

        let target_top = match direction {
            Vertical::Up => reference.top - self.probe_offset,
            Vertical::Down => reference.top + self.probe_offset,
        };

        let mut best: Option<(Float, Float, usize)> = None;
        for glyph in &self.boxes {
            let on_adjacent_side = match direction {
                Vertical::Up => glyph.top < reference.top,
                Vertical::Down => glyph.top > reference.top,
            };
            if !on_adjacent_side {
                continue;
            }

            let diff_y = (glyph.top - target_top).abs();
            let diff_x = (glyph.left - reference.left).abs();
            let is_better = best.is_none_or(|(best_y, best_x, _)| {
                diff_y < best_y || (diff_y == best_y && diff_x < best_x)
            });
            if is_better {
                best = Some((diff_y, diff_x, glyph.index));
            }
        }

        best.map_or(cursor, |(_, _, index)| index)
    }
}
