//! Camera link configuration
//!
//! Stored in flash as postcard-serialized binary data; boards that ship a
//! `pixy.toml` deserialize it with serde on the host side.

use heapless::Vec;
use pixy_hal::UartConfig;
use pixy_protocol::command::{Command, SERVO_MAX_POS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound of the postcard encoding of [`PixyConfig`]
pub const MAX_CONFIG_SIZE: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate of zero
    InvalidBaudrate,
    /// Servo position above the camera's range
    ServoOutOfRange,
    /// Stored blob could not be encoded or decoded
    Serialization,
}

/// LED color applied at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pan/tilt positions applied at startup (0-1000)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoPosition {
    pub pan: u16,
    pub tilt: u16,
}

/// Camera link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PixyConfig {
    /// UART baud rate; must match the camera's setting
    pub baudrate: u32,
    /// Delay between decode passes in the polling task
    pub poll_interval_ms: u32,
    /// Extra wait after a pass that found the camera idle
    pub no_frame_backoff_ms: u32,
    /// Brightness sent on startup
    pub brightness: Option<u8>,
    /// LED color sent on startup
    pub led: Option<LedColor>,
    /// Servo positions sent on startup
    pub servos: Option<ServoPosition>,
}

impl Default for PixyConfig {
    fn default() -> Self {
        Self {
            baudrate: UartConfig::PIXY_DEFAULT_BAUDRATE,
            poll_interval_ms: 20,
            no_frame_backoff_ms: 10,
            brightness: None,
            led: None,
            servos: None,
        }
    }
}

impl PixyConfig {
    /// Check values the camera or UART would reject
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        if let Some(servos) = self.servos {
            if servos.pan > SERVO_MAX_POS || servos.tilt > SERVO_MAX_POS {
                return Err(ConfigError::ServoOutOfRange);
            }
        }
        Ok(())
    }

    /// UART line settings (8N1 at the configured baud rate)
    pub fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }

    /// Commands to send once the link is up
    pub fn initial_commands(&self) -> Vec<Command, 3> {
        let mut commands = Vec::new();
        // Capacity matches the three optional fields
        if let Some(brightness) = self.brightness {
            let _ = commands.push(Command::Brightness(brightness));
        }
        if let Some(LedColor { r, g, b }) = self.led {
            let _ = commands.push(Command::Led { r, g, b });
        }
        if let Some(ServoPosition { pan, tilt }) = self.servos {
            let _ = commands.push(Command::Servos { pan, tilt });
        }
        commands
    }
}

#[cfg(feature = "serde")]
impl PixyConfig {
    /// Encode for flash storage
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialization)
    }

    /// Decode a blob written by [`to_slice`](Self::to_slice)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Serialization)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PixyConfig::default();
        assert_eq!(config.baudrate, 19_200);
        assert_eq!(config.no_frame_backoff_ms, 10);
        assert!(config.validate().is_ok());
        assert!(config.initial_commands().is_empty());
    }

    #[test]
    fn test_initial_commands_order() {
        let config = PixyConfig {
            brightness: Some(90),
            led: Some(LedColor { r: 1, g: 2, b: 3 }),
            servos: Some(ServoPosition {
                pan: 500,
                tilt: 200,
            }),
            ..PixyConfig::default()
        };

        let commands = config.initial_commands();
        assert_eq!(
            commands.as_slice(),
            &[
                Command::Brightness(90),
                Command::Led { r: 1, g: 2, b: 3 },
                Command::Servos {
                    pan: 500,
                    tilt: 200
                },
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = PixyConfig {
            baudrate: 0,
            ..PixyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBaudrate));

        let config = PixyConfig {
            servos: Some(ServoPosition {
                pan: 1001,
                tilt: 0,
            }),
            ..PixyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ServoOutOfRange));
    }

    #[test]
    fn test_uart_config_uses_baudrate() {
        let config = PixyConfig {
            baudrate: 115_200,
            ..PixyConfig::default()
        };
        assert_eq!(config.uart_config(), UartConfig::with_baudrate(115_200));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_flash_blob_roundtrip() {
        let config = PixyConfig {
            brightness: Some(120),
            servos: Some(ServoPosition {
                pan: 1000,
                tilt: 0,
            }),
            ..PixyConfig::default()
        };

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let len = config.to_slice(&mut buf).unwrap().len();
        assert!(len <= MAX_CONFIG_SIZE);

        let decoded = PixyConfig::from_bytes(&buf[..len]).unwrap();
        assert_eq!(decoded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_corrupt_blob_is_rejected() {
        assert_eq!(
            PixyConfig::from_bytes(&[0xFF, 0xFF]),
            Err(ConfigError::Serialization)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sample_toml() {
        let config: PixyConfig = toml::from_str(include_str!("../pixy.toml")).unwrap();

        assert_eq!(config.baudrate, 19_200);
        assert_eq!(config.brightness, Some(80));
        assert_eq!(config.led, Some(LedColor { r: 0, g: 32, b: 0 }));
        assert_eq!(
            config.servos,
            Some(ServoPosition {
                pan: 500,
                tilt: 650
            })
        );
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PixyConfig = toml::from_str("baudrate = 38400\n").unwrap();
        assert_eq!(config.baudrate, 38_400);
        assert_eq!(config.poll_interval_ms, 20);
        assert_eq!(config.led, None);
    }
}
