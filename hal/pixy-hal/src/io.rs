//! Adapter from `embedded-io` streams to the UART traits
//!
//! Most chip HALs expose their serial ports through `embedded-io`. The
//! Pixy link wants a byte read that waits for data instead of returning
//! short, so [`IoUart`] polls `read_ready` and sleeps between attempts.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::uart::{UartRx, UartTx};

/// Delay between polls while no byte is available
pub const RX_RETRY_DELAY_MS: u32 = 3;

/// UART built from an `embedded-io` stream and a blocking delay
pub struct IoUart<T, D> {
    io: T,
    delay: D,
}

impl<T, D> IoUart<T, D> {
    /// Wrap a stream and the delay used while polling for input
    pub fn new(io: T, delay: D) -> Self {
        Self { io, delay }
    }

    /// Borrow the underlying stream
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.io
    }

    /// Release the stream and delay
    pub fn release(self) -> (T, D) {
        (self.io, self.delay)
    }
}

impl<T, D> UartRx for IoUart<T, D>
where
    T: Read + ReadReady,
    D: DelayNs,
{
    type Error = T::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(buf.len())
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        loop {
            if self.io.read_ready()? && self.io.read(&mut byte)? == 1 {
                return Ok(byte[0]);
            }
            self.delay.delay_ms(RX_RETRY_DELAY_MS);
        }
    }
}

impl<T, D> UartTx for IoUart<T, D>
where
    T: Write,
{
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.io.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.io.flush()
    }
}
