//! # Buffer Module - Sparse Storage of Typed Characters
//!
//! The typed buffer shares its index space with the [`ReferenceText`](crate::ReferenceText).
//! Every slot is either unset or holds the single character the user typed at that position.
//! Because the cursor can be moved freely, slots are written and cleared out of order, so the
//! buffer is sparse rather than a simple stack of inputs.
//!
//! ## Data layout
//!
//! Data layout example: reference `"cat"`, typed `c`, `x`, then cursor moved back to 1
//! ```text
//! Reference: [c][a][t]
//! Typed:     [c][x][∅]
//! Cursor:        ^
//! ```
//!
//! ## Invariants
//!
//! - The buffer never grows beyond the reference text's length
//! - Touching an index outside `[0, len)` is a bug in the caller: it panics in debug builds
//!   and is ignored in release builds

use std::ops::Range;

/// Sparse buffer of typed characters, aligned index-for-index with the reference text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedBuffer {
    slots: Vec<Option<char>>,
}

impl TypedBuffer {
    /// Create an empty buffer for a reference text of `len` characters
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Clears every slot and resizes the buffer to `len`
    pub fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(len, None);
    }

    /// Number of slots, equal to the length of the reference text
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the character typed at `index`, or `None` if unset or out of range
    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Write a typed character into the slot at `index`
    pub fn set(&mut self, index: usize, char: char) {
        debug_assert!(
            index < self.slots.len(),
            "write at {index} outside buffer of {}",
            self.slots.len()
        );
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(char);
        }
    }

    /// Unset the slot at `index`
    pub fn clear(&mut self, index: usize) {
        debug_assert!(
            index < self.slots.len(),
            "clear at {index} outside buffer of {}",
            self.slots.len()
        );
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Unset every slot in the half-open `range`
    ///
    /// The range is clamped to the buffer length.
    pub fn clear_range(&mut self, range: Range<usize>) {
        debug_assert!(
            range.end <= self.slots.len(),
            "clear of {range:?} outside buffer of {}",
            self.slots.len()
        );
        let end = range.end.min(self.slots.len());
        let start = range.start.min(end);
        self.slots[start..end].fill(None);
    }

    /// Number of slots holding a typed character
    pub fn typed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterate over all slots in index order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<char>> + '_ {
        self.slots.iter().copied()
    }
}
