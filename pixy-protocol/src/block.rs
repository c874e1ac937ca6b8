//! Detected object records

use core::fmt;

use crate::word::{START_WORD, START_WORD_CC};

/// Highest signature of a plain (single color) detection
///
/// Larger signatures are color codes, whose records include an angle.
pub const MAX_SIGNATURE: u16 = 7;

/// Leftmost centroid column
pub const MIN_X: u16 = 0;
/// Rightmost centroid column
pub const MAX_X: u16 = 319;

/// Top centroid row
pub const MIN_Y: u16 = 0;
/// Bottom centroid row
pub const MAX_Y: u16 = 199;

/// Layout of the records that follow a start word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockType {
    /// Five field words per record
    #[default]
    Normal,
    /// Five field words plus an angle
    ColorCoded,
}

impl BlockType {
    /// Parse a start word
    pub fn from_start_word(word: u16) -> Option<Self> {
        match word {
            START_WORD => Some(BlockType::Normal),
            START_WORD_CC => Some(BlockType::ColorCoded),
            _ => None,
        }
    }

    /// Start word announcing this block type
    pub fn start_word(self) -> u16 {
        match self {
            BlockType::Normal => START_WORD,
            BlockType::ColorCoded => START_WORD_CC,
        }
    }
}

/// One detected object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    /// Color signature, or color code when above [`MAX_SIGNATURE`]
    pub signature: u16,
    /// Centroid x
    pub x: u16,
    /// Centroid y
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Orientation; always 0 for plain detections
    pub angle: u16,
}

impl Block {
    /// An all-zero block
    pub const EMPTY: Block = Block {
        signature: 0,
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        angle: 0,
    };

    /// Plain detection (angle is zero)
    pub const fn new(signature: u16, x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            signature,
            x,
            y,
            width,
            height,
            angle: 0,
        }
    }

    /// Detection carrying an angle
    pub const fn with_angle(
        signature: u16,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        angle: u16,
    ) -> Self {
        Self {
            signature,
            x,
            y,
            width,
            height,
            angle,
        }
    }

    /// True if the signature is a color code
    pub fn is_color_coded(&self) -> bool {
        self.signature > MAX_SIGNATURE
    }

    /// Record layout implied by the signature
    pub fn block_type(&self) -> BlockType {
        if self.is_color_coded() {
            BlockType::ColorCoded
        } else {
            BlockType::Normal
        }
    }

    /// True if the centroid lies inside the camera's image
    pub fn in_view(&self) -> bool {
        (MIN_X..=MAX_X).contains(&self.x) && (MIN_Y..=MAX_Y).contains(&self.y)
    }

    /// Wire checksum: 16-bit wrapping sum of every field word
    pub fn checksum(&self) -> u16 {
        self.signature
            .wrapping_add(self.x)
            .wrapping_add(self.y)
            .wrapping_add(self.width)
            .wrapping_add(self.height)
            .wrapping_add(self.angle)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_color_coded() {
            write!(
                f,
                "CC block! sig: {:o} ({} decimal) x: {} y: {} width: {} height: {} angle: {}",
                self.signature, self.signature, self.x, self.y, self.width, self.height, self.angle
            )
        } else {
            // Angle is always zero here
            write!(
                f,
                "sig: {} x: {} y: {} width: {} height: {}",
                self.signature, self.x, self.y, self.width, self.height
            )
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Block {
    fn format(&self, f: defmt::Formatter) {
        if self.is_color_coded() {
            defmt::write!(
                f,
                "CC block! sig: {=u16:o} ({=u16} decimal) x: {=u16} y: {=u16} width: {=u16} height: {=u16} angle: {=u16}",
                self.signature,
                self.signature,
                self.x,
                self.y,
                self.width,
                self.height,
                self.angle
            );
        } else {
            defmt::write!(
                f,
                "sig: {=u16} x: {=u16} y: {=u16} width: {=u16} height: {=u16}",
                self.signature,
                self.x,
                self.y,
                self.width,
                self.height
            );
        }
    }
}
