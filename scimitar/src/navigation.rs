//! # Navigation Module - Cursor Movement and Deletion Ranges
//!
//! Pure functions that decide where the cursor goes. Nothing in here touches the typed
//! buffer, the timer or the screen.
//!
//! ## Direction handling
//!
//! Horizontal requests are *visual*: [`Horizontal::Left`] means "towards the left edge of the
//! screen". In right-to-left text the logical index grows towards the left, so every visual
//! request is inverted before it is applied. Deletions are logical and never inverted, and
//! vertical movement is left to the [`VerticalLocator`], which works on geometry.
//!
//! ## Word boundaries
//!
//! Words are runs of non-whitespace (Unicode whitespace class). A jump skips whitespace first
//! and then the word, so consecutive whitespace behaves as a single boundary:
//!
//! ```text
//! text:        a b c _ _ d e f
//! jump left:   from 5 (inside the spaces) -> 0 (start of "abc")
//! jump right:  from 1 (inside "abc")      -> 5 (start of "def")
//! ```

use std::ops::Range;

use crate::locator::{Vertical, VerticalLocator};
use crate::text::{Direction, ReferenceText};

/// A visual horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    /// Whether this visual direction increases the logical index in `direction`
    pub const fn is_forward(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Self::Right, Direction::Ltr) | (Self::Left, Direction::Rtl)
        )
    }
}

/// A cursor-only movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// One character
    Step(Horizontal),
    /// One word
    Word(Horizontal),
    /// One visual line
    Line(Vertical),
}

/// Clamp a cursor into `[0, len]`
///
/// A cursor outside that range is a bug. Debug builds panic, release builds clamp.
pub fn clamp(cursor: usize, len: usize) -> usize {
    debug_assert!(cursor <= len, "cursor {cursor} outside text of {len}");
    cursor.min(len)
}

/// Move one character visually left or right
///
/// Stays put at either end of the text.
///
/// ```rust
/// use scimitar::{Direction, Horizontal};
/// use scimitar::navigation::step;
///
/// assert_eq!(step(5, 2, Direction::Ltr, Horizontal::Left), 1);
/// assert_eq!(step(5, 2, Direction::Rtl, Horizontal::Left), 3);
/// assert_eq!(step(5, 0, Direction::Ltr, Horizontal::Left), 0);
/// ```
pub fn step(len: usize, cursor: usize, direction: Direction, horizontal: Horizontal) -> usize {
    let cursor = clamp(cursor, len);
    if horizontal.is_forward(direction) {
        (cursor + 1).min(len)
    } else {
        cursor.saturating_sub(1)
    }
}

/// The logical "jump left" target: back over whitespace, then back over the word before it
pub fn word_start_before(text: &ReferenceText, cursor: usize) -> usize {
    let mut index = clamp(cursor, text.len());
    while index > 0 && text.is_whitespace_at(index - 1) {
        index -= 1;
    }
    while index > 0 && !text.is_whitespace_at(index - 1) {
        index -= 1;
    }
    index
}

/// The logical "jump right" target: forward over the current word, then over the whitespace
/// after it
pub fn word_end_after(text: &ReferenceText, cursor: usize) -> usize {
    let len = text.len();
    let mut index = clamp(cursor, len);
    while index < len && !text.is_whitespace_at(index) {
        index += 1;
    }
    while index < len && text.is_whitespace_at(index) {
        index += 1;
    }
    index
}

/// Jump one word visually left or right
pub fn word_jump(
    text: &ReferenceText,
    cursor: usize,
    direction: Direction,
    horizontal: Horizontal,
) -> usize {
    if horizontal.is_forward(direction) {
        word_end_after(text, cursor)
    } else {
        word_start_before(text, cursor)
    }
}

/// The range cleared by a word deletion at `cursor`
///
/// Always the logical "jump left" target up to the cursor, whatever the text direction.
/// Empty when there is nothing to delete.
///
/// ```rust
/// use scimitar::ReferenceText;
/// use scimitar::navigation::word_delete_range;
///
/// let text = ReferenceText::new("ab cd");
/// assert_eq!(word_delete_range(&text, 5), 3..5);
/// assert_eq!(word_delete_range(&text, 3), 0..3);
/// assert!(word_delete_range(&text, 0).is_empty());
/// ```
pub fn word_delete_range(text: &ReferenceText, cursor: usize) -> Range<usize> {
    let cursor = clamp(cursor, text.len());
    word_start_before(text, cursor)..cursor
}

/// Move one visual line up or down
///
/// When moving down finds no line below and the cursor is not at the end yet, the cursor
/// fast-forwards to the end of the text.
pub fn vertical<L: VerticalLocator + ?Sized>(
    locator: &L,
    cursor: usize,
    len: usize,
    direction: Vertical,
) -> usize {
    let cursor = clamp(cursor, len);
    let candidate = clamp(locator.locate(cursor, direction).min(len), len);
    match direction {
        Vertical::Down if candidate == cursor && cursor < len => len,
        _ => candidate,
    }
}

/// Resolve a [`Movement`] to the new cursor position
pub fn resolve<L: VerticalLocator + ?Sized>(
    text: &ReferenceText,
    cursor: usize,
    direction: Direction,
    movement: Movement,
    locator: &L,
) -> usize {
    match movement {
        Movement::Step(horizontal) => step(text.len(), cursor, direction, horizontal),
        Movement::Word(horizontal) => word_jump(text, cursor, direction, horizontal),
        Movement::Line(vertical_direction) => {
            vertical(locator, cursor, text.len(), vertical_direction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::NoGeometry;

    const DIRECTIONS: [Direction; 2] = [Direction::Ltr, Direction::Rtl];

    #[test]
    fn test_step_is_inverted_in_rtl() {
        assert_eq!(step(3, 1, Direction::Ltr, Horizontal::Right), 2);
        assert_eq!(step(3, 1, Direction::Rtl, Horizontal::Right), 0);
        assert_eq!(step(3, 3, Direction::Ltr, Horizontal::Right), 3);
        assert_eq!(step(3, 3, Direction::Rtl, Horizontal::Left), 3);
        assert_eq!(step(3, 0, Direction::Rtl, Horizontal::Right), 0);
    }

    #[test]
    fn test_step_pairs_return_to_start() {
        let len = 6;
        for direction in DIRECTIONS {
            for cursor in 1..len {
                let left = step(len, cursor, direction, Horizontal::Left);
                assert_eq!(step(len, left, direction, Horizontal::Right), cursor);

                let right = step(len, cursor, direction, Horizontal::Right);
                assert_eq!(step(len, right, direction, Horizontal::Left), cursor);
            }
        }
    }

    #[test]
    fn test_word_start_before() {
        let text = ReferenceText::new("abc  def");
        assert_eq!(word_start_before(&text, 8), 5);
        assert_eq!(word_start_before(&text, 5), 0);
        // From inside the whitespace run, land on the previous word's start
        assert_eq!(word_start_before(&text, 4), 0);
        assert_eq!(word_start_before(&text, 2), 0);
        assert_eq!(word_start_before(&text, 0), 0);
    }

    #[test]
    fn test_word_end_after() {
        let text = ReferenceText::new("abc  def");
        assert_eq!(word_end_after(&text, 0), 5);
        assert_eq!(word_end_after(&text, 1), 5);
        assert_eq!(word_end_after(&text, 3), 5);
        assert_eq!(word_end_after(&text, 5), 8);
        assert_eq!(word_end_after(&text, 8), 8);
    }

    #[test]
    fn test_word_jump_with_unicode_whitespace() {
        // Newline and no-break space are both whitespace
        let text = ReferenceText::new("שלום\nעולם\u{a0}טוב");
        assert_eq!(word_end_after(&text, 0), 5);
        assert_eq!(word_end_after(&text, 5), 10);
        assert_eq!(word_start_before(&text, 10), 5);
    }

    #[test]
    fn test_word_jump_direction() {
        let text = ReferenceText::new("one two");
        assert_eq!(word_jump(&text, 0, Direction::Ltr, Horizontal::Right), 4);
        assert_eq!(word_jump(&text, 0, Direction::Rtl, Horizontal::Left), 4);
        assert_eq!(word_jump(&text, 7, Direction::Ltr, Horizontal::Left), 4);
        assert_eq!(word_jump(&text, 7, Direction::Rtl, Horizontal::Right), 4);
    }

    #[test]
    fn test_jump_right_then_left_never_skips_a_word() {
        let text = ReferenceText::new("the  quick brown\nfox");
        for cursor in 0..=text.len() {
            let right = word_end_after(&text, cursor);
            let back = word_start_before(&text, right);
            assert!(back <= right);
            // Landing back must not be before the start of the word the cursor was in
            assert!(back >= word_start_before(&text, cursor));
        }
    }

    #[test]
    fn test_word_delete_range() {
        let text = ReferenceText::new("ab cd");
        assert_eq!(word_delete_range(&text, 5), 3..5);
        assert_eq!(word_delete_range(&text, 4), 3..4);
        assert_eq!(word_delete_range(&text, 3), 0..3);
        assert_eq!(word_delete_range(&text, 0), 0..0);
    }

    struct Fixed(usize);

    impl VerticalLocator for Fixed {
        fn locate(&self, _cursor: usize, _direction: Vertical) -> usize {
            self.0
        }
    }

    #[test]
    fn test_vertical_down_fast_forwards() {
        assert_eq!(vertical(&NoGeometry, 2, 10, Vertical::Down), 10);
        assert_eq!(vertical(&NoGeometry, 10, 10, Vertical::Down), 10);
        assert_eq!(vertical(&NoGeometry, 2, 10, Vertical::Up), 2);
        assert_eq!(vertical(&Fixed(7), 2, 10, Vertical::Down), 7);
        assert_eq!(vertical(&Fixed(0), 2, 10, Vertical::Up), 0);
    }

    #[test]
    fn test_vertical_ignores_direction_mode() {
        let text = ReferenceText::new("abc");
        for direction in DIRECTIONS {
            let moved = resolve(&text, 1, direction, Movement::Line(Vertical::Down), &Fixed(2));
            assert_eq!(moved, 2);
        }
    }
}
