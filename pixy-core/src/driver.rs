//! Pixy camera link driver
//!
//! Owns the UART, the decoder state that carries frame boundaries between
//! passes, and the frame the last pass produced. One `Pixy` per camera;
//! the `&mut self` receivers keep decode passes from interleaving.

use pixy_hal::{ConfigurableUart, Uart, UartError};
use pixy_protocol::{
    decode, Block, Command, CommandError, DecodeOutcome, DecoderState, FrameEnd, FrameStore,
    WordReader,
};

use crate::config::{ConfigError, PixyConfig};

/// Errors from the camera link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixyError<E> {
    /// Transport failure
    Uart(E),
    /// Command could not be encoded
    Command(CommandError),
    /// Link configuration rejected
    Config(ConfigError),
}

/// Counters accumulated over the life of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Passes that found a frame
    pub frames: u32,
    /// Passes that found the camera idle
    pub idle_polls: u32,
    /// Frames cut off at store capacity
    pub full_frames: u32,
    /// Records dropped for a bad checksum
    pub checksum_errors: u32,
    /// Single-byte resyncs
    pub realignments: u32,
}

impl LinkStats {
    fn record(&mut self, outcome: &DecodeOutcome) {
        match outcome {
            DecodeOutcome::NoFrame => self.idle_polls = self.idle_polls.wrapping_add(1),
            DecodeOutcome::Frame(report) => {
                self.frames = self.frames.wrapping_add(1);
                if report.end == FrameEnd::Capacity {
                    self.full_frames = self.full_frames.wrapping_add(1);
                }
                self.checksum_errors = self
                    .checksum_errors
                    .wrapping_add(u32::from(report.checksum_errors));
                self.realignments = self
                    .realignments
                    .wrapping_add(u32::from(report.realignments));
            }
        }
    }
}

/// A Pixy camera on a UART
pub struct Pixy<U> {
    words: WordReader<U>,
    state: DecoderState,
    frame: FrameStore,
    stats: LinkStats,
}

impl<U: Uart> Pixy<U> {
    /// Attach to a UART that is already configured
    pub fn new(uart: U) -> Self {
        Self {
            words: WordReader::new(uart),
            state: DecoderState::new(),
            frame: FrameStore::new(),
            stats: LinkStats::default(),
        }
    }

    /// Decode the next frame
    ///
    /// Blocks on the UART until the frame ends or the camera is found idle.
    /// On a transport error the frame is left empty.
    pub fn poll(&mut self) -> Result<DecodeOutcome, PixyError<UartError<U>>> {
        let outcome =
            decode(&mut self.words, &mut self.frame, &mut self.state).map_err(PixyError::Uart)?;
        self.stats.record(&outcome);

        #[cfg(feature = "defmt")]
        match &outcome {
            DecodeOutcome::NoFrame => defmt::trace!("Pixy idle"),
            DecodeOutcome::Frame(report) => {
                defmt::trace!("Pixy frame: {}", self.frame);
                if report.checksum_errors > 0 {
                    defmt::debug!("Pixy dropped {} records", report.checksum_errors);
                }
            }
        }

        Ok(outcome)
    }

    /// Decode the next frame and return its block count
    pub fn update(&mut self) -> Result<usize, PixyError<UartError<U>>> {
        self.poll().map(|outcome| outcome.count())
    }

    /// Frame produced by the last pass
    pub fn frame(&self) -> &FrameStore {
        &self.frame
    }

    /// Blocks of the last pass
    pub fn blocks(&self) -> &[Block] {
        self.frame.blocks()
    }

    /// Number of blocks of the last pass
    pub fn block_count(&self) -> usize {
        self.frame.count()
    }

    /// Decoder state carried into the next pass
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Link counters
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Forget any pending frame boundary and the current frame
    ///
    /// Call after the transport was interrupted; the next pass resyncs.
    pub fn reset(&mut self) {
        self.state = DecoderState::new();
        self.frame.clear();
    }

    /// Send a command, returning the number of bytes handed to the UART
    pub fn send(&mut self, command: Command) -> Result<usize, PixyError<UartError<U>>> {
        let bytes = command.encode_to_vec().map_err(PixyError::Command)?;

        let uart = self.words.inner_mut();
        uart.write_blocking(&bytes).map_err(PixyError::Uart)?;
        uart.flush().map_err(PixyError::Uart)?;

        Ok(bytes.len())
    }

    /// Set camera brightness
    pub fn set_brightness(&mut self, brightness: u8) -> Result<usize, PixyError<UartError<U>>> {
        self.send(Command::Brightness(brightness))
    }

    /// Set LED color
    pub fn set_led(&mut self, r: u8, g: u8, b: u8) -> Result<usize, PixyError<UartError<U>>> {
        self.send(Command::Led { r, g, b })
    }

    /// Set pan/tilt servo positions (0-1000)
    pub fn set_servos(&mut self, pan: u16, tilt: u16) -> Result<usize, PixyError<UartError<U>>> {
        self.send(Command::Servos { pan, tilt })
    }

    /// Give the UART back
    pub fn release(self) -> U {
        self.words.into_inner()
    }
}

impl<U: Uart + ConfigurableUart> Pixy<U> {
    /// Apply the configured baud rate, then send the startup commands
    ///
    /// The UART is left untouched if `config` does not validate.
    pub fn with_config(
        mut uart: U,
        config: &PixyConfig,
    ) -> Result<Self, PixyError<UartError<U>>> {
        config.validate().map_err(PixyError::Config)?;

        uart.set_config(&config.uart_config())
            .map_err(PixyError::Uart)?;

        let mut pixy = Self::new(uart);
        for command in config.initial_commands() {
            pixy.send(command)?;
        }
        Ok(pixy)
    }
}
