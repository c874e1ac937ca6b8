//! Commands sent to the camera
//!
//! Every command is a zero byte, a type byte and a fixed payload. The
//! camera does not reply.

use heapless::Vec;

// Command type IDs
pub const CMD_SERVOS: u8 = 0xFF;
pub const CMD_BRIGHTNESS: u8 = 0xFE;
pub const CMD_LED: u8 = 0xFD;

/// Leading byte of every command
pub const CMD_PREFIX: u8 = 0x00;

/// Largest encoded command (servos)
pub const MAX_COMMAND_SIZE: usize = 6;

/// RC-servo position range
pub const SERVO_MIN_POS: u16 = 0;
pub const SERVO_MAX_POS: u16 = 1000;
pub const SERVO_CENTER_POS: u16 = (SERVO_MAX_POS - SERVO_MIN_POS) / 2;

/// Errors from command encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Servo position above [`SERVO_MAX_POS`]
    ServoOutOfRange,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Commands understood by the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Camera exposure brightness
    Brightness(u8),
    /// RGB LED color
    Led { r: u8, g: u8, b: u8 },
    /// Pan/tilt servo positions (0-1000)
    Servos { pan: u16, tilt: u16 },
}

impl Command {
    /// Servo command with both axes centered
    pub const fn center_servos() -> Self {
        Command::Servos {
            pan: SERVO_CENTER_POS,
            tilt: SERVO_CENTER_POS,
        }
    }

    /// Command type byte
    pub fn type_byte(&self) -> u8 {
        match self {
            Command::Brightness(_) => CMD_BRIGHTNESS,
            Command::Led { .. } => CMD_LED,
            Command::Servos { .. } => CMD_SERVOS,
        }
    }

    /// Encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        match self {
            Command::Brightness(_) => 3,
            Command::Led { .. } => 5,
            Command::Servos { .. } => 6,
        }
    }

    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CommandError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(CommandError::BufferTooSmall);
        }

        buffer[0] = CMD_PREFIX;
        buffer[1] = self.type_byte();
        match *self {
            Command::Brightness(brightness) => buffer[2] = brightness,
            Command::Led { r, g, b } => buffer[2..5].copy_from_slice(&[r, g, b]),
            Command::Servos { pan, tilt } => {
                if pan > SERVO_MAX_POS || tilt > SERVO_MAX_POS {
                    return Err(CommandError::ServoOutOfRange);
                }
                buffer[2..4].copy_from_slice(&pan.to_le_bytes());
                buffer[4..6].copy_from_slice(&tilt.to_le_bytes());
            }
        }

        Ok(len)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, CommandError> {
        let mut buffer = [0u8; MAX_COMMAND_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| CommandError::BufferTooSmall)
    }
}
