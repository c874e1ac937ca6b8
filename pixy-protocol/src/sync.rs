//! Frame synchronization
//!
//! Scans the word stream for a start word received twice in a row. A
//! byte-swapped start word means the reader is one byte out of phase with
//! the camera; dropping one byte puts it back in step.

use crate::block::BlockType;
use crate::word::{WordSource, NO_DATA_WORD, START_WORD_SWAPPED};

/// Result of a synchronization attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncResult {
    /// Two idle words: the camera has nothing to report right now
    NoFrame,
    /// Aligned at the start of a frame of the given type
    Sync(BlockType),
}

/// Start-word scanner
#[derive(Debug, Clone, Default)]
pub struct FrameSynchronizer {
    realignments: u16,
}

impl FrameSynchronizer {
    /// Create a scanner with no recorded realignments
    pub fn new() -> Self {
        Self { realignments: 0 }
    }

    /// Number of single-byte discards performed so far
    pub fn realignments(&self) -> u16 {
        self.realignments
    }

    /// Read words until a frame start or an idle line is found
    ///
    /// There is no timeout: this returns only on a match, on two idle
    /// words, or when the transport fails.
    pub fn find<W: WordSource>(&mut self, words: &mut W) -> Result<SyncResult, W::Error> {
        // Anything that is neither idle nor a start word
        let mut last = 0xFFFF;

        loop {
            let word = words.next_word()?;

            if word == last {
                if word == NO_DATA_WORD {
                    return Ok(SyncResult::NoFrame);
                }
                if let Some(block_type) = BlockType::from_start_word(word) {
                    return Ok(SyncResult::Sync(block_type));
                }
            }

            if word == START_WORD_SWAPPED {
                #[cfg(feature = "defmt")]
                defmt::debug!("Pixy stream out of phase, dropping one byte");
                words.skip_byte()?;
                self.realignments = self.realignments.saturating_add(1);
            }

            last = word;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::{WordReader, START_WORD, START_WORD_CC};
    use crate::wire::{WireBuilder, WireError};

    fn reader(builder: &WireBuilder<64>) -> WordReader<crate::wire::WireStream<64>> {
        WordReader::new(builder.to_stream().unwrap())
    }

    #[test]
    fn test_plain_sync() {
        let mut wire = WireBuilder::<64>::new();
        wire.words(&[0x1234, START_WORD, START_WORD]);

        let mut sync = FrameSynchronizer::new();
        let result = sync.find(&mut reader(&wire)).unwrap();
        assert_eq!(result, SyncResult::Sync(BlockType::Normal));
        assert_eq!(sync.realignments(), 0);
    }

    #[test]
    fn test_color_code_sync() {
        let mut wire = WireBuilder::<64>::new();
        wire.words(&[START_WORD_CC, START_WORD_CC]);

        let result = FrameSynchronizer::new().find(&mut reader(&wire)).unwrap();
        assert_eq!(result, SyncResult::Sync(BlockType::ColorCoded));
    }

    #[test]
    fn test_mixed_start_words_do_not_sync() {
        let mut wire = WireBuilder::<64>::new();
        wire.words(&[START_WORD, START_WORD_CC, START_WORD_CC]);

        let mut words = reader(&wire);
        let result = FrameSynchronizer::new().find(&mut words).unwrap();
        assert_eq!(result, SyncResult::Sync(BlockType::ColorCoded));
        assert_eq!(words.inner().remaining(), 0);
    }

    #[test]
    fn test_two_idle_words_mean_no_frame() {
        let mut wire = WireBuilder::<64>::new();
        wire.words(&[0x0042, 0, 0, START_WORD, START_WORD]);

        let mut words = reader(&wire);
        let result = FrameSynchronizer::new().find(&mut words).unwrap();
        assert_eq!(result, SyncResult::NoFrame);
        // The following frame is left for the next attempt
        assert_eq!(words.inner().remaining(), 4);
    }

    #[test]
    fn test_swapped_start_drops_one_byte() {
        let mut wire = WireBuilder::<64>::new();
        wire.word(START_WORD_SWAPPED)
            .byte(0xEE)
            .words(&[START_WORD, START_WORD]);

        let mut sync = FrameSynchronizer::new();
        let result = sync.find(&mut reader(&wire)).unwrap();
        assert_eq!(result, SyncResult::Sync(BlockType::Normal));
        assert_eq!(sync.realignments(), 1);
    }

    #[test]
    fn test_odd_byte_offset_recovers() {
        // One stray byte ahead of the camera's start words
        let mut wire = WireBuilder::<64>::new();
        wire.byte(0x12).words(&[START_WORD, START_WORD, START_WORD, START_WORD]);

        let mut sync = FrameSynchronizer::new();
        let result = sync.find(&mut reader(&wire)).unwrap();
        assert_eq!(result, SyncResult::Sync(BlockType::Normal));
        assert_eq!(sync.realignments(), 1);
    }

    #[test]
    fn test_transport_error_propagates() {
        let mut wire = WireBuilder::<64>::new();
        wire.words(&[0x1111, 0x2222]);

        let result = FrameSynchronizer::new().find(&mut reader(&wire));
        assert_eq!(result, Err(WireError::Exhausted));
    }
}
