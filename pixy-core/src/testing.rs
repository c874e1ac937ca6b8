//! Test doubles shared by the unit tests

use heapless::Vec;
use pixy_hal::{ConfigurableUart, UartConfig, UartRx, UartTx};
use pixy_protocol::{WireBuilder, WireError, WireStream};

/// Camera replay on RX, capture on TX
pub struct MockUart {
    pub rx: WireStream<1024>,
    pub tx: Vec<u8, 64>,
    pub flushes: usize,
    pub config: Option<UartConfig>,
}

impl MockUart {
    pub fn new(wire: &WireBuilder<1024>) -> Self {
        Self {
            rx: wire.to_stream().unwrap(),
            tx: Vec::new(),
            flushes: 0,
            config: None,
        }
    }
}

impl UartRx for MockUart {
    type Error = WireError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.rx.read_blocking(buf)
    }
}

impl UartTx for MockUart {
    type Error = WireError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx
            .extend_from_slice(data)
            .map_err(|_| WireError::Overflow)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

impl ConfigurableUart for MockUart {
    fn set_config(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.config = Some(*config);
        Ok(())
    }
}
