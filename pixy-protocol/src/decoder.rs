//! Frame-level block decoder
//!
//! One call to [`decode`] fills a [`FrameStore`] with the blocks of one
//! camera frame. The camera does not announce where a frame ends; the
//! decoder only learns it by reading the first words of the next one. When
//! that happens the boundary is parked in [`DecoderState`] so the next call
//! starts from it instead of hunting for another sync pair.
//!
//! ```text
//!  AwaitingSync ──sync──▶ Decoding(t) ──start word──▶ BoundaryPending(t)
//!       ▲                    │                               │
//!       └─ idle / desync / ──┘          next call            │
//!          capacity               Decoding(t) ◀──────────────┘
//! ```

use crate::block::{Block, BlockType};
use crate::store::{FrameStore, FRAME_CAPACITY};
use crate::sync::{FrameSynchronizer, SyncResult};
use crate::word::{WordSource, NO_DATA_WORD};

/// State carried from one decode call to the next
///
/// Lives as long as the link it belongs to; create a fresh one whenever
/// the transport is reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// The next call must scan for a doubled start word
    #[default]
    AwaitingSync,
    /// The previous call already consumed the start of the next frame
    BoundaryPending(BlockType),
}

impl DecoderState {
    /// Create the initial state
    pub fn new() -> Self {
        Self::AwaitingSync
    }

    /// True if the next call skips synchronization
    pub fn is_boundary_pending(&self) -> bool {
        matches!(self, DecoderState::BoundaryPending(_))
    }

    /// Block type the next call will start decoding with, if already known
    pub fn next_block_type(&self) -> Option<BlockType> {
        match self {
            DecoderState::AwaitingSync => None,
            DecoderState::BoundaryPending(block_type) => Some(*block_type),
        }
    }

    /// Consume a pending boundary
    fn take_pending(&mut self) -> Option<BlockType> {
        let pending = self.next_block_type();
        *self = DecoderState::AwaitingSync;
        pending
    }
}

/// Why a decode pass stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEnd {
    /// Start word in checksum position; the next frame is already underway
    Boundary(BlockType),
    /// Idle word in checksum position
    Terminator,
    /// Word after a record was not a start word
    Desync,
    /// Frame store is full
    Capacity,
}

/// Summary of a pass that found a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Blocks committed to the frame store
    pub count: usize,
    /// What ended the pass
    pub end: FrameEnd,
    /// Records dropped for a bad checksum
    pub checksum_errors: u8,
    /// Single-byte discards during synchronization
    pub realignments: u16,
}

/// Result of a decode pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeOutcome {
    /// The camera is idle; the frame store was emptied
    NoFrame,
    /// A frame was decoded
    Frame(FrameReport),
}

impl DecodeOutcome {
    /// Number of blocks now in the frame store
    pub fn count(&self) -> usize {
        match self {
            DecodeOutcome::NoFrame => 0,
            DecodeOutcome::Frame(report) => report.count,
        }
    }
}

/// Decode the next frame into `frame`
///
/// Protocol anomalies (idle line, bad checksums, unexpected words) never
/// fail the call; they shorten or empty the frame. Only transport errors
/// are returned, in which case `frame` is left empty.
///
/// The count is written once, after every slot of the pass, so a copy of
/// `frame` taken after this returns is always consistent.
///
/// A color-coded record whose signature is a plain one has its angle
/// checked against the checksum, then stored as 0.
pub fn decode<W: WordSource>(
    words: &mut W,
    frame: &mut FrameStore,
    state: &mut DecoderState,
) -> Result<DecodeOutcome, W::Error> {
    let mut sync = FrameSynchronizer::new();

    // Slots are rewritten from 0; a stale count must not cover them
    frame.clear();

    let mut block_type = match state.take_pending() {
        Some(block_type) => block_type,
        None => match sync.find(words)? {
            SyncResult::NoFrame => return Ok(DecodeOutcome::NoFrame),
            SyncResult::Sync(block_type) => block_type,
        },
    };

    let mut index = 0;
    let mut checksum_errors: u8 = 0;

    let end = loop {
        if index >= FRAME_CAPACITY {
            break FrameEnd::Capacity;
        }

        let checksum = words.next_word()?;
        if let Some(next) = BlockType::from_start_word(checksum) {
            *state = DecoderState::BoundaryPending(next);
            break FrameEnd::Boundary(next);
        }
        if checksum == NO_DATA_WORD {
            break FrameEnd::Terminator;
        }

        let mut block = read_record(words, block_type)?;
        if block.checksum() == checksum {
            if !block.is_color_coded() {
                block.angle = 0;
            }
            frame.put(index, block);
            index += 1;
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Pixy checksum error: expected {=u16:#x}, got {=u16:#x}",
                checksum,
                block.checksum()
            );
            checksum_errors = checksum_errors.saturating_add(1);
        }

        match BlockType::from_start_word(words.next_word()?) {
            Some(next) => block_type = next,
            None => break FrameEnd::Desync,
        }
    };

    frame.finalize(index);

    Ok(DecodeOutcome::Frame(FrameReport {
        count: index,
        end,
        checksum_errors,
        realignments: sync.realignments(),
    }))
}

/// Read the field words of one record
fn read_record<W: WordSource>(words: &mut W, block_type: BlockType) -> Result<Block, W::Error> {
    let signature = words.next_word()?;
    let x = words.next_word()?;
    let y = words.next_word()?;
    let width = words.next_word()?;
    let height = words.next_word()?;
    let angle = match block_type {
        BlockType::Normal => 0,
        BlockType::ColorCoded => words.next_word()?,
    };

    Ok(Block::with_angle(signature, x, y, width, height, angle))
}
