//! Board-agnostic Pixy camera driver
//!
//! This crate ties the protocol decoder to a transport and to the rest of
//! the firmware:
//!
//! - [`Pixy`]: one camera link (UART, decoder state, latest frame, stats)
//! - [`SharedFrame`]: frame snapshot published for other tasks
//! - [`task`]: async polling loop
//! - [`config`]: link configuration and its flash encoding

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod driver;
pub mod shared;
pub mod task;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, LedColor, PixyConfig, ServoPosition};
pub use driver::{LinkStats, Pixy, PixyError};
pub use shared::SharedFrame;
