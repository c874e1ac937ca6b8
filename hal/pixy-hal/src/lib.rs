//! Pixy Link Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits the Pixy camera link is
//! built on. Chip-specific HALs implement them for their UART peripherals;
//! anything that already speaks `embedded-io` can be wrapped in [`IoUart`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixy-core (driver, polling task)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixy-protocol (word stream, decoder)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixy-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip UART    │       │ IoUart over   │
//! │  driver       │       │ embedded-io   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::ConfigurableUart`] - Runtime baud rate changes

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::IoUart;
pub use uart::{ConfigurableUart, Uart, UartConfig, UartError, UartRx, UartTx};
