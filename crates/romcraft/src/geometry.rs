//! Address and data widths of the target memory.

use std::fmt;

use crate::errors::CompileError;

/// Widest address bus accepted. 2^24 words is far beyond any parallel ROM.
pub const MAX_INPUT_BITS: u32 = 24;

/// Shape of a ROM image: number of address lines, data lines, and the value
/// driven on data lines no field assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RomGeometry {
    pub input_bits: u32,
    pub output_bits: u32,
    pub default_output: u32,
}

impl RomGeometry {
    /// Builds and validates a geometry.
    pub fn new(
        input_bits: u32,
        output_bits: u32,
        default_output: u32,
    ) -> Result<Self, CompileError> {
        let geometry = RomGeometry {
            input_bits,
            output_bits,
            default_output,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        if self.input_bits == 0 || self.input_bits > MAX_INPUT_BITS {
            return Err(CompileError::InvalidInputBits(self.input_bits));
        }

        if self.output_bits != 8 && self.output_bits != 16 {
            return Err(CompileError::InvalidOutputBits(self.output_bits));
        }

        if self.default_output & !self.word_mask() != 0 {
            return Err(CompileError::DefaultOutputTooWide {
                value: self.default_output,
                bits: self.output_bits,
            });
        }

        Ok(())
    }

    /// Number of addresses, `2^input_bits`.
    pub fn address_count(&self) -> u32 {
        1 << self.input_bits
    }

    pub fn address_mask(&self) -> u32 {
        self.address_count() - 1
    }

    /// Bytes written per address.
    pub fn word_bytes(&self) -> usize {
        (self.output_bits >> 3) as usize
    }

    pub fn word_mask(&self) -> u32 {
        (1 << self.output_bits) - 1
    }

    /// Total size of the image in bytes.
    pub fn image_len(&self) -> usize {
        self.address_count() as usize * self.word_bytes()
    }

    /// Device class that fits this many address lines.
    pub fn part(&self) -> RomPart {
        RomPart::for_input_bits(self.input_bits)
    }
}

/// Device classes by address width, with capacity for 8-bit parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomPart {
    /// Capacity in kbit of an 8-bit wide device.
    pub kbits: u32,
    pub family: PartFamily,
    /// Common part number, if there is one.
    pub part_number: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartFamily {
    /// Below 11 lines nothing parallel is sold.
    Unavailable,
    Eeprom,
    Eprom,
    Flash,
}

impl RomPart {
    pub fn for_input_bits(input_bits: u32) -> Self {
        let family = match input_bits {
            0..=10 => PartFamily::Unavailable,
            11..=12 => PartFamily::Eeprom,
            13..=20 => PartFamily::Eprom,
            _ => PartFamily::Flash,
        };

        let part_number = match input_bits {
            11 => Some("28C16"),
            12 => Some("28C32"),
            13 => Some("2764"),
            14 => Some("27128"),
            17 => Some("27010"),
            _ => None,
        };

        RomPart {
            kbits: (1u32 << input_bits.min(MAX_INPUT_BITS)) * 8 / 1024,
            family,
            part_number,
        }
    }
}

impl fmt::Display for RomPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kbits >= 1024 {
            write!(f, "{}M", self.kbits / 1024)?;
        } else {
            write!(f, "{}k", self.kbits)?;
        }

        match (self.family, self.part_number) {
            (_, Some(number)) => write!(f, " ({number})"),
            (PartFamily::Unavailable, None) => write!(f, " (no parallel part)"),
            (PartFamily::Flash, None) => write!(f, " (flash)"),
            _ => Ok(()),
        }
    }
}
