//! The HH:MM clock program.
//!
//! # Wiring
//!
//! ```text
//! A0..A2    bit counter for the serializer
//! A3..A12   10-bit minute counter, A3 least significant
//!
//! D0        next counter, low byte    -> 595 feeding the counter latch
//! D1        next counter, high byte   -> 595 feeding the counter latch
//! D2        minutes, BCD tens:units   -> 595 -> BCD to 7-segment decoders
//! D3        hours, BCD tens:units     -> 595 -> BCD to 7-segment decoders
//! D4..D7    unused, driven to the default output
//! ```
//!
//! Every data line carries one bit of a byte per bit-counter step, most
//! significant bit first. The feedback lines load the minute counter with its
//! successor, so the ROM both displays and advances the time.

use romcraft::{
    errors::{ArgumentError, CompileError},
    field::Field,
    generate::RomProgram,
    geometry::RomGeometry,
    layout::Layout,
    serial::shift_out_bit,
};
use tracing::trace;

use crate::time::{MINUTES_PER_CYCLE, TimeDigits, display_index};

/// Address lines.
pub const INPUT_BITS: u32 = 13;
/// Data lines, 8 or 16.
pub const OUTPUT_BITS: u32 = 8;
/// Level of data lines no field drives.
pub const DEFAULT_OUTPUT: u32 = 0x00;
/// Minutes added to the counter before display; counter 0 shows 9:00.
pub const PHASE_OFFSET: u32 = 480;
/// Added to every address before decoding. Non-zero values rotate the bit
/// counter relative to the latch clock.
pub const ADDRESS_SKEW: u32 = 0;
/// Where the binary writes the image.
pub const OUTPUT_PATH: &str = "clock.rom";

pub const SERIAL_POSITION_FIELD: &str = "serial_position";
pub const MINUTE_COUNTER_FIELD: &str = "minute_counter";
pub const FEEDBACK_LOW_FIELD: &str = "feedback_low";
pub const FEEDBACK_HIGH_FIELD: &str = "feedback_high";
pub const MINUTE_FIELD: &str = "minute";
pub const HOUR_FIELD: &str = "hour";

/// Address bits of the serializer bit counter, least significant first.
pub const SERIAL_POSITION_BITS: [u32; 3] = [0, 1, 2];
/// Address bits of the minute counter, least significant first.
pub const MINUTE_COUNTER_BITS: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

pub const FEEDBACK_LOW_LINE: u32 = 0;
pub const FEEDBACK_HIGH_LINE: u32 = 1;
pub const MINUTE_LINE: u32 = 2;
pub const HOUR_LINE: u32 = 3;

/// Compile-time knobs of the clock program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    pub geometry: RomGeometry,
    pub phase_offset: u32,
    pub address_skew: u32,
}

impl ClockSettings {
    pub const DEFAULT: ClockSettings = ClockSettings {
        geometry: RomGeometry {
            input_bits: INPUT_BITS,
            output_bits: OUTPUT_BITS,
            default_output: DEFAULT_OUTPUT,
        },
        phase_offset: PHASE_OFFSET,
        address_skew: ADDRESS_SKEW,
    };
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Values decoded from one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockInputs {
    /// Bit slot being shifted out, 0..=7.
    pub serial_position: u32,
    /// Minute counter as latched, 0..=1023 (0..=719 in normal operation).
    pub counter: u32,
}

/// Levels of the four driven data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockOutputs {
    pub feedback_low: u8,
    pub feedback_high: u8,
    pub minute: u8,
    pub hour: u8,
}

/// Everything computed for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub address: u32,
    pub inputs: ClockInputs,
    pub time: TimeDigits,
    pub hour_byte: u8,
    pub minute_byte: u8,
    /// Counter value loaded back into the latch.
    pub next_counter: u32,
    pub outputs: ClockOutputs,
    pub word: u32,
}

/// Successor of a latched counter value, wrapping past the end of the cycle.
pub fn next_counter(counter: u32) -> u32 {
    let next = counter + 1;
    if next >= MINUTES_PER_CYCLE { 0 } else { next }
}

pub struct ClockRom {
    settings: ClockSettings,
    inputs: Layout,
    outputs: Layout,
}

impl ClockRom {
    pub fn new() -> Result<Self, CompileError> {
        Self::with_settings(ClockSettings::DEFAULT)
    }

    pub fn with_settings(settings: ClockSettings) -> Result<Self, CompileError> {
        settings.geometry.validate()?;

        let inputs = Layout::compile(
            &[
                Field::new(SERIAL_POSITION_FIELD, &SERIAL_POSITION_BITS),
                Field::new(MINUTE_COUNTER_FIELD, &MINUTE_COUNTER_BITS),
            ],
            settings.geometry.input_bits,
        )?;

        let outputs = Layout::compile(
            &[
                Field::bit(FEEDBACK_LOW_FIELD, FEEDBACK_LOW_LINE),
                Field::bit(FEEDBACK_HIGH_FIELD, FEEDBACK_HIGH_LINE),
                Field::bit(MINUTE_FIELD, MINUTE_LINE),
                Field::bit(HOUR_FIELD, HOUR_LINE),
            ],
            settings.geometry.output_bits,
        )?;

        Ok(ClockRom {
            settings,
            inputs,
            outputs,
        })
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    /// Splits an address into the bit counter and the minute counter.
    pub fn decode(&self, address: u32) -> Result<ClockInputs, ArgumentError> {
        let address = address.wrapping_add(self.settings.address_skew)
            & self.settings.geometry.address_mask();

        Ok(ClockInputs {
            serial_position: self.inputs.get(address, SERIAL_POSITION_FIELD)?,
            counter: self.inputs.get(address, MINUTE_COUNTER_FIELD)?,
        })
    }

    /// Runs the whole pipeline for one address.
    pub fn evaluate(&self, address: u32) -> Result<Evaluation, ArgumentError> {
        let inputs = self.decode(address)?;

        let time = TimeDigits::from_minute_index(display_index(
            inputs.counter,
            self.settings.phase_offset,
        ))?;
        let hour_byte = time.hour_bcd();
        let minute_byte = time.minute_bcd();

        trace!("address {address:#06x} outputs: {hour_byte:02X}, {minute_byte:02X}");

        let next_counter = next_counter(inputs.counter);
        let position = inputs.serial_position;
        let outputs = ClockOutputs {
            feedback_low: shift_out_bit((next_counter & 0xFF) as u8, position)?,
            feedback_high: shift_out_bit((next_counter >> 8) as u8, position)?,
            minute: shift_out_bit(minute_byte, position)?,
            hour: shift_out_bit(hour_byte, position)?,
        };

        let word = self.outputs.encode(
            self.settings.geometry.default_output,
            [
                (FEEDBACK_LOW_FIELD, u32::from(outputs.feedback_low)),
                (FEEDBACK_HIGH_FIELD, u32::from(outputs.feedback_high)),
                (MINUTE_FIELD, u32::from(outputs.minute)),
                (HOUR_FIELD, u32::from(outputs.hour)),
            ],
        )?;

        Ok(Evaluation {
            address,
            inputs,
            time,
            hour_byte,
            minute_byte,
            next_counter,
            outputs,
            word,
        })
    }
}

impl RomProgram for ClockRom {
    fn geometry(&self) -> RomGeometry {
        self.settings.geometry
    }

    fn word(&self, address: u32) -> Result<u32, ArgumentError> {
        Ok(self.evaluate(address)?.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(counter: u32, serial_position: u32) -> u32 {
        (counter << 3) | serial_position
    }

    #[test]
    fn test_decode_fields() {
        let rom = ClockRom::new().unwrap();
        assert_eq!(
            rom.decode(address(719, 6)).unwrap(),
            ClockInputs {
                serial_position: 6,
                counter: 719
            }
        );
    }

    #[test]
    fn test_first_address_shows_nine_oclock() {
        let rom = ClockRom::new().unwrap();
        let eval = rom.evaluate(0).unwrap();
        assert_eq!(eval.time.to_string(), "9:00");
        assert_eq!(eval.hour_byte, 0x09);
        assert_eq!(eval.minute_byte, 0x00);
        assert_eq!(eval.next_counter, 1);
        assert_eq!(eval.word, 0x00);
    }

    #[test]
    fn test_last_serial_slot_carries_lsb() {
        let rom = ClockRom::new().unwrap();
        // 9:00, next counter 1: hour LSB and feedback-low LSB are set
        assert_eq!(rom.evaluate(address(0, 7)).unwrap().word, 0b1001);
        // 9:01, next counter 2: hour and minute LSBs set, feedback LSB clear
        assert_eq!(rom.evaluate(address(1, 7)).unwrap().word, 0b1100);
    }

    #[test]
    fn test_serial_slots_spell_out_hour_byte() {
        let rom = ClockRom::new().unwrap();
        // counter 239 shows 12:59
        let bits: Vec<u32> = (0..8)
            .map(|slot| (rom.evaluate(address(239, slot)).unwrap().word >> HOUR_LINE) & 1)
            .collect();
        assert_eq!(bits, vec![0, 0, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_feedback_high_byte() {
        let rom = ClockRom::new().unwrap();
        // 511 + 1 = 0x200: high byte 0x02, low byte 0x00
        let eval = rom.evaluate(address(511, 6)).unwrap();
        assert_eq!(eval.next_counter, 0x200);
        assert_eq!(eval.outputs.feedback_high, 1);
        assert_eq!(eval.outputs.feedback_low, 0);
    }

    #[test]
    fn test_counter_wraps_at_end_of_cycle() {
        assert_eq!(next_counter(0), 1);
        assert_eq!(next_counter(718), 719);
        assert_eq!(next_counter(719), 0);
        assert_eq!(next_counter(1023), 0);
    }

    #[test]
    fn test_out_of_cycle_counter_still_displays() {
        let rom = ClockRom::new().unwrap();
        // (1000 + 480) % 720 = 40 -> 1:40
        let eval = rom.evaluate(address(1000, 0)).unwrap();
        assert_eq!(eval.time.to_string(), "1:40");
        assert_eq!(eval.next_counter, 0);
    }

    #[test]
    fn test_default_output_fills_unused_lines() {
        let settings = ClockSettings {
            geometry: RomGeometry {
                default_output: 0xF0,
                ..ClockSettings::DEFAULT.geometry
            },
            ..ClockSettings::DEFAULT
        };
        let rom = ClockRom::with_settings(settings).unwrap();
        assert_eq!(rom.evaluate(address(0, 7)).unwrap().word, 0xF9);
    }

    #[test]
    fn test_phase_offset_beyond_one_cycle() {
        let settings = ClockSettings {
            phase_offset: u32::MAX,
            ..ClockSettings::DEFAULT
        };
        let rom = ClockRom::with_settings(settings).unwrap();
        // (719 + 255) % 720 = 254 -> 5:14
        let eval = rom.evaluate(address(719, 0)).unwrap();
        assert_eq!(eval.time.to_string(), "5:14");

        let wrapped = ClockRom::with_settings(ClockSettings {
            phase_offset: PHASE_OFFSET + 3 * MINUTES_PER_CYCLE,
            ..ClockSettings::DEFAULT
        })
        .unwrap();
        let plain = ClockRom::new().unwrap();
        for addr in [0, 7, address(239, 3), address(1023, 7)] {
            assert_eq!(wrapped.word(addr), plain.word(addr));
        }
    }

    #[test]
    fn test_address_skew_rotates_decoding() {
        let settings = ClockSettings {
            address_skew: 4,
            ..ClockSettings::DEFAULT
        };
        let skewed = ClockRom::with_settings(settings).unwrap();
        let plain = ClockRom::new().unwrap();

        assert_eq!(skewed.decode(3).unwrap(), plain.decode(7).unwrap());
        assert_eq!(skewed.decode(0x1FFF).unwrap(), plain.decode(3).unwrap());
    }

    #[test]
    fn test_rejects_address_too_narrow_for_counter() {
        let settings = ClockSettings {
            geometry: RomGeometry {
                input_bits: 12,
                ..ClockSettings::DEFAULT.geometry
            },
            ..ClockSettings::DEFAULT
        };
        assert!(matches!(
            ClockRom::with_settings(settings),
            Err(CompileError::PositionOutOfRange { position: 12, .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_output_width() {
        let settings = ClockSettings {
            geometry: RomGeometry {
                output_bits: 4,
                ..ClockSettings::DEFAULT.geometry
            },
            ..ClockSettings::DEFAULT
        };
        assert!(matches!(
            ClockRom::with_settings(settings),
            Err(CompileError::InvalidOutputBits(4))
        ));
    }
}
