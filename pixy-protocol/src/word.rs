//! Word-level view of the camera's byte stream
//!
//! The camera transmits little-endian 16-bit words, low byte first.

use pixy_hal::UartRx;

/// Start of a plain frame (sent twice)
pub const START_WORD: u16 = 0xAA55;

/// Start of a color-coded frame (sent twice)
pub const START_WORD_CC: u16 = 0xAA56;

/// [`START_WORD`] read one byte out of phase
pub const START_WORD_SWAPPED: u16 = 0x55AA;

/// Idle line / end of frame
pub const NO_DATA_WORD: u16 = 0x0000;

/// Source of protocol words
pub trait WordSource {
    /// Error reported by the underlying transport
    type Error;

    /// Read the next 16-bit word, blocking until both bytes arrive
    fn next_word(&mut self) -> Result<u16, Self::Error>;

    /// Drop a single byte to shift the word phase by one
    fn skip_byte(&mut self) -> Result<(), Self::Error>;
}

impl<W: WordSource + ?Sized> WordSource for &mut W {
    type Error = W::Error;

    fn next_word(&mut self) -> Result<u16, Self::Error> {
        (**self).next_word()
    }

    fn skip_byte(&mut self) -> Result<(), Self::Error> {
        (**self).skip_byte()
    }
}

/// Assembles words from a UART receiver
#[derive(Debug)]
pub struct WordReader<R> {
    rx: R,
}

impl<R> WordReader<R> {
    /// Read words from `rx`
    pub fn new(rx: R) -> Self {
        Self { rx }
    }

    /// Borrow the receiver, e.g. to send commands on a shared UART
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.rx
    }

    /// Borrow the receiver immutably
    pub fn inner(&self) -> &R {
        &self.rx
    }

    /// Give the receiver back
    pub fn into_inner(self) -> R {
        self.rx
    }
}

impl<R: UartRx> WordSource for WordReader<R> {
    type Error = R::Error;

    fn next_word(&mut self) -> Result<u16, Self::Error> {
        let lo = self.rx.read_byte()?;
        let hi = self.rx.read_byte()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn skip_byte(&mut self) -> Result<(), Self::Error> {
        self.rx.read_byte().map(|_| ())
    }
}
