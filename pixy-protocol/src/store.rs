//! Fixed-capacity frame of decoded blocks
//!
//! The slot array is an arena that the decoder overwrites in place. Only
//! the first `count` slots belong to the most recent decode pass; anything
//! past that may be left over from earlier passes and is never exposed.

use core::fmt;

use crate::block::Block;

/// Maximum blocks per frame
pub const FRAME_CAPACITY: usize = 30;

/// Errors from direct slot access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Slot index is not below [`FRAME_CAPACITY`]
    OutOfRange,
}

/// Block slots plus the number of valid entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStore {
    slots: [Block; FRAME_CAPACITY],
    count: usize,
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore {
    /// Create an empty frame
    pub const fn new() -> Self {
        Self {
            slots: [Block::EMPTY; FRAME_CAPACITY],
            count: 0,
        }
    }

    /// Overwrite a slot
    ///
    /// Does not change the count; the slot only becomes visible once a
    /// decode pass finalizes a count that covers it.
    pub fn write(&mut self, index: usize, block: Block) -> Result<(), StoreError> {
        let slot = self.slots.get_mut(index).ok_or(StoreError::OutOfRange)?;
        *slot = block;
        Ok(())
    }

    /// Slot write for indices the decoder has already bounds-checked
    pub(crate) fn put(&mut self, index: usize, block: Block) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = block;
        }
    }

    /// Publish the first `count` slots, clamped to capacity
    pub(crate) fn finalize(&mut self, count: usize) {
        self.count = count.min(FRAME_CAPACITY);
    }

    /// Number of valid blocks
    pub fn count(&self) -> usize {
        self.count
    }

    /// True if the last pass produced no blocks
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Valid blocks of the last pass
    pub fn blocks(&self) -> &[Block] {
        &self.slots[..self.count]
    }

    /// Block at `index`, if it is valid
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks().get(index)
    }

    /// Iterate over the valid blocks
    pub fn iter(&self) -> core::slice::Iter<'_, Block> {
        self.blocks().iter()
    }

    /// Drop all blocks (slots keep their contents)
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

impl<'a> IntoIterator for &'a FrameStore {
    type Item = &'a Block;
    type IntoIter = core::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detected {}:", self.count)?;
        for (i, block) in self.iter().enumerate() {
            writeln!(f, "  block {}: {}", i, block)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameStore {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Detected {=usize}:", self.count);
        for (i, block) in self.iter().enumerate() {
            defmt::write!(f, "\n  block {=usize}: {}", i, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_new_frame_is_empty() {
        let frame = FrameStore::new();
        assert_eq!(frame.count(), 0);
        assert!(frame.is_empty());
        assert!(frame.blocks().is_empty());
    }

    #[test]
    fn test_write_is_hidden_until_finalized() {
        let mut frame = FrameStore::new();
        frame.write(0, Block::new(1, 10, 10, 5, 5)).unwrap();
        assert!(frame.get(0).is_none());

        frame.finalize(1);
        assert_eq!(frame.get(0), Some(&Block::new(1, 10, 10, 5, 5)));
    }

    #[test]
    fn test_write_out_of_range() {
        let mut frame = FrameStore::new();
        assert_eq!(
            frame.write(FRAME_CAPACITY, Block::EMPTY),
            Err(StoreError::OutOfRange)
        );
    }

    #[test]
    fn test_finalize_clamps_to_capacity() {
        let mut frame = FrameStore::new();
        frame.finalize(FRAME_CAPACITY + 5);
        assert_eq!(frame.count(), FRAME_CAPACITY);
    }

    #[test]
    fn test_clear_hides_stale_slots() {
        let mut frame = FrameStore::new();
        frame.write(0, Block::new(2, 1, 1, 1, 1)).unwrap();
        frame.finalize(1);
        frame.clear();

        assert!(frame.is_empty());
        assert_eq!(frame.iter().count(), 0);
    }

    #[test]
    fn test_display_dump() {
        let mut frame = FrameStore::new();
        frame.write(0, Block::new(1, 2, 3, 4, 5)).unwrap();
        frame.finalize(1);

        let mut out = String::<128>::new();
        write!(out, "{}", frame).unwrap();
        assert_eq!(
            out.as_str(),
            "Detected 1:\n  block 0: sig: 1 x: 2 y: 3 width: 4 height: 5\n"
        );
    }
}
