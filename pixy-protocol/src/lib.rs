//! Pixy UART Block Protocol
//!
//! This crate decodes the object-detection stream a Pixy (CMUcam5) camera
//! emits over its UART port, and encodes the few commands the camera
//! accepts on the same link.
//!
//! # Protocol Overview
//!
//! The camera sends little-endian 16-bit words. A frame starts with a
//! start word repeated twice, followed by one record per detected block:
//! ```text
//! ┌────────┬────────┬──────────┬─────┬─────┬───────┬────────┬─────────┐
//! │ START  │ START  │ CHECKSUM │ SIG │  X  │   Y   │ WIDTH  │ HEIGHT  │ [ANGLE]
//! │ 2B     │ 2B     │ 2B       │ 2B  │ 2B  │  2B   │ 2B     │ 2B      │  2B
//! └────────┴────────┴──────────┴─────┴─────┴───────┴────────┴─────────┘
//! ```
//!
//! `0xAA55` starts a plain frame, `0xAA56` a color-coded frame whose records
//! carry an extra angle word. Records inside a frame are separated by a
//! single start word; a checksum-position `0x0000` ends the frame.
//!
//! Decoding is a pull model: [`decode`] reads words from a [`WordSource`]
//! until the frame ends, writes verified blocks into a [`FrameStore`], and
//! leaves any frame boundary it ran into in the caller's [`DecoderState`].

#![no_std]
#![deny(unsafe_code)]

pub mod block;
pub mod command;
pub mod decoder;
pub mod store;
pub mod sync;
pub mod wire;
pub mod word;

pub use block::{Block, BlockType, MAX_SIGNATURE};
pub use command::{Command, CommandError, MAX_COMMAND_SIZE};
pub use decoder::{decode, DecodeOutcome, DecoderState, FrameEnd, FrameReport};
pub use store::{FrameStore, StoreError, FRAME_CAPACITY};
pub use sync::{FrameSynchronizer, SyncResult};
pub use wire::{WireBuilder, WireError, WireStream};
pub use word::{WordReader, WordSource, START_WORD, START_WORD_CC, START_WORD_SWAPPED};
