//! Camera-side stream encoding
//!
//! [`WireBuilder`] writes the byte stream a Pixy would send for a set of
//! blocks, and [`WireStream`] replays it through the UART receive trait.
//! Used for host testing and for simulating a camera without hardware.

use heapless::Vec;
use pixy_hal::UartRx;

use crate::block::{Block, BlockType};
use crate::word::NO_DATA_WORD;

/// Errors from building or replaying a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// Builder ran out of capacity
    Overflow,
    /// Replay reached the end of the recorded bytes
    Exhausted,
}

/// Builds a camera byte stream
#[derive(Debug, Clone, Default)]
pub struct WireBuilder<const N: usize> {
    bytes: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> WireBuilder<N> {
    /// Create an empty stream
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    /// Append a raw byte
    pub fn byte(&mut self, byte: u8) -> &mut Self {
        if self.bytes.push(byte).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Append a little-endian word
    pub fn word(&mut self, word: u16) -> &mut Self {
        let [lo, hi] = word.to_le_bytes();
        self.byte(lo).byte(hi)
    }

    /// Append several words
    pub fn words(&mut self, words: &[u16]) -> &mut Self {
        for &word in words {
            self.word(word);
        }
        self
    }

    /// Append idle words
    pub fn idle(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.word(NO_DATA_WORD);
        }
        self
    }

    /// Append the doubled start word of a frame
    pub fn sync(&mut self, block_type: BlockType) -> &mut Self {
        let start = block_type.start_word();
        self.word(start).word(start)
    }

    /// Append a record with a correct checksum
    ///
    /// Plain records carry no angle on the wire, so the block's angle is
    /// neither sent nor counted.
    pub fn record(&mut self, block: &Block, block_type: BlockType) -> &mut Self {
        let block = Self::on_wire(block, block_type);
        self.record_with_checksum(&block, block_type, block.checksum())
    }

    /// Append a record with an arbitrary checksum word
    pub fn record_with_checksum(
        &mut self,
        block: &Block,
        block_type: BlockType,
        checksum: u16,
    ) -> &mut Self {
        self.word(checksum)
            .word(block.signature)
            .word(block.x)
            .word(block.y)
            .word(block.width)
            .word(block.height);
        if block_type == BlockType::ColorCoded {
            self.word(block.angle);
        }
        self
    }

    /// Append a full frame: doubled start word, then each block preceded
    /// by a single start word of its own type
    ///
    /// The record layout of each block follows its signature. No trailing
    /// terminator is written; follow with [`idle`](Self::idle) or another
    /// frame.
    pub fn frame(&mut self, blocks: &[Block]) -> &mut Self {
        let first = blocks
            .first()
            .map(Block::block_type)
            .unwrap_or(BlockType::Normal);
        self.sync(first);

        for (i, block) in blocks.iter().enumerate() {
            let block_type = block.block_type();
            if i > 0 {
                self.word(block_type.start_word());
            }
            self.record(block, block_type);
        }
        self
    }

    /// Recorded bytes
    pub fn bytes(&self) -> Result<&[u8], WireError> {
        if self.overflowed {
            return Err(WireError::Overflow);
        }
        Ok(self.bytes.as_slice())
    }

    /// Replayable copy of the recorded bytes
    pub fn to_stream(&self) -> Result<WireStream<N>, WireError> {
        WireStream::from_bytes(self.bytes()?)
    }

    /// Block as the decoder will see it
    fn on_wire(block: &Block, block_type: BlockType) -> Block {
        match block_type {
            BlockType::Normal => Block {
                angle: 0,
                ..*block
            },
            BlockType::ColorCoded => *block,
        }
    }
}

/// Replays recorded bytes as a UART receiver
#[derive(Debug, Clone)]
pub struct WireStream<const N: usize> {
    bytes: Vec<u8, N>,
    pos: usize,
}

impl<const N: usize> WireStream<N> {
    /// Copy `bytes` into a new stream
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let bytes = Vec::from_slice(bytes).map_err(|_| WireError::Overflow)?;
        Ok(Self { bytes, pos: 0 })
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Bytes read so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl<const N: usize> UartRx for WireStream<N> {
    type Error = WireError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.len() > self.remaining() {
            return Err(WireError::Exhausted);
        }
        buf.copy_from_slice(&self.bytes[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::{START_WORD, START_WORD_CC};

    #[test]
    fn test_word_is_little_endian() {
        let mut wire = WireBuilder::<4>::new();
        wire.word(START_WORD);
        assert_eq!(wire.bytes().unwrap(), &[0x55, 0xAA]);
    }

    #[test]
    fn test_plain_record_has_no_angle() {
        let mut wire = WireBuilder::<32>::new();
        wire.record(&Block::with_angle(1, 2, 3, 4, 5, 99), BlockType::Normal);

        let bytes = wire.bytes().unwrap();
        assert_eq!(bytes.len(), 12);
        // Checksum excludes the dropped angle
        assert_eq!(&bytes[..2], &15u16.to_le_bytes());
    }

    #[test]
    fn test_color_code_record_has_angle() {
        let mut wire = WireBuilder::<32>::new();
        wire.record(&Block::with_angle(10, 2, 3, 4, 5, 90), BlockType::ColorCoded);

        let bytes = wire.bytes().unwrap();
        assert_eq!(bytes.len(), 14);
        assert_eq!(&bytes[..2], &114u16.to_le_bytes());
        assert_eq!(&bytes[12..], &90u16.to_le_bytes());
    }

    #[test]
    fn test_frame_separates_blocks() {
        let mut wire = WireBuilder::<64>::new();
        wire.frame(&[Block::new(1, 1, 1, 1, 1), Block::with_angle(9, 1, 1, 1, 1, 1)]);

        let bytes = wire.bytes().unwrap();
        // sync (4) + plain record (12) + separator (2) + cc record (14)
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[16..18], &START_WORD_CC.to_le_bytes());
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut wire = WireBuilder::<3>::new();
        wire.word(1).word(2);
        assert_eq!(wire.bytes(), Err(WireError::Overflow));
        assert!(wire.to_stream().is_err());
    }

    #[test]
    fn test_stream_replays_and_exhausts() {
        let mut stream = WireStream::<4>::from_bytes(&[1, 2, 3]).unwrap();
        let mut buf = [0u8; 2];

        assert_eq!(stream.read_blocking(&mut buf), Ok(2));
        assert_eq!(buf, [1, 2]);
        assert_eq!(stream.consumed(), 2);
        assert_eq!(stream.read_blocking(&mut buf), Err(WireError::Exhausted));
        assert_eq!(stream.read_byte(), Ok(3));
        assert_eq!(stream.remaining(), 0);
    }
}
