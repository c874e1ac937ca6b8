//! UART serial communication abstractions
//!
//! Provides traits for blocking serial communication that can be
//! implemented by chip-specific HALs.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been handed to the transmitter or an
    /// error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or an error occurs. Implementations
    /// keep retrying while no byte is available; there is no timeout at
    /// this level.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral with a
/// single error type.
pub trait Uart: UartTx + UartRx<Error = <Self as UartTx>::Error> {}

// Blanket implementation
impl<T> Uart for T where T: UartTx + UartRx<Error = <T as UartTx>::Error> {}

/// Error type shared by both halves of a [`Uart`]
pub type UartError<U> = <U as UartTx>::Error;

/// UART whose line settings can be changed after construction
pub trait ConfigurableUart: UartTx {
    /// Apply new line settings
    fn set_config(&mut self, config: &UartConfig) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Pixy's factory UART setting
    pub const PIXY_DEFAULT_BAUDRATE: u32 = 19_200;

    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(Self::PIXY_DEFAULT_BAUDRATE)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Loopback {
        data: [u8; 4],
        pos: usize,
    }

    impl UartRx for Loopback {
        type Error = ();

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            for byte in buf.iter_mut() {
                *byte = *self.data.get(self.pos).ok_or(())?;
                self.pos += 1;
            }
            Ok(buf.len())
        }
    }

    #[test]
    fn test_read_byte_default() {
        let mut rx = Loopback {
            data: [0x55, 0xAA, 0x01, 0x02],
            pos: 0,
        };
        assert_eq!(rx.read_byte(), Ok(0x55));
        assert_eq!(rx.read_byte(), Ok(0xAA));
        assert_eq!(rx.pos, 2);
    }

    #[test]
    fn test_read_byte_propagates_error() {
        let mut rx = Loopback {
            data: [0; 4],
            pos: 4,
        };
        assert_eq!(rx.read_byte(), Err(()));
    }

    #[test]
    fn test_default_config_is_pixy_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 19_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
