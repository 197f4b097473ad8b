//! Combinational serializers: the line level for one bit slot of a byte.
//!
//! Nothing here keeps time. The hardware steps a bit counter that is part of
//! the ROM address, and the ROM answers with the level for that slot.

use crate::errors::ArgumentError;

/// Slots in an 8-N-1 asynchronous character: start, 8 data, stop.
pub const FRAME_BITS: u32 = 10;

/// Slots in an 8-bit shift register load.
pub const SHIFT_BITS: u32 = 8;

/// Line level of slot `position` of an 8-N-1 frame carrying `byte`.
///
/// Slot 0 is the start bit (0), slots 1..=8 carry data LSB first, slot 9 is
/// the stop bit (1).
pub fn frame_bit(byte: u8, position: u32) -> Result<u8, ArgumentError> {
    match position {
        0 => Ok(0),
        1..=8 => Ok((byte >> (position - 1)) & 1),
        9 => Ok(1),
        _ => Err(ArgumentError::FramePositionOutOfRange(position)),
    }
}

/// Data level of slot `position` when `byte` is shifted out MSB first, as a
/// 74HC595 chain receives it. Slot 0 carries bit 7.
pub fn shift_out_bit(byte: u8, position: u32) -> Result<u8, ArgumentError> {
    if position >= SHIFT_BITS {
        return Err(ArgumentError::ShiftPositionOutOfRange(position));
    }

    Ok(u8::from(((0x80 >> position) & byte) != 0))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_frame_start_and_stop() {
        assert_eq!(frame_bit(0xFF, 0), Ok(0));
        assert_eq!(frame_bit(0x00, 9), Ok(1));
    }

    #[test]
    fn test_frame_data_lsb_first() {
        // 'A' = 0x41
        let levels: Vec<u8> = (0..FRAME_BITS).map(|p| frame_bit(b'A', p).unwrap()).collect();
        assert_eq!(levels, vec![0, 1, 0, 0, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_frame_position_out_of_range() {
        assert_eq!(
            frame_bit(0x55, 10),
            Err(ArgumentError::FramePositionOutOfRange(10))
        );
    }

    #[test]
    fn test_shift_out_msb_first() {
        assert_eq!(shift_out_bit(0x80, 0), Ok(1));
        assert_eq!(shift_out_bit(0x80, 7), Ok(0));
        assert_eq!(shift_out_bit(0x09, 4), Ok(1));
        assert_eq!(shift_out_bit(0x09, 7), Ok(1));
        assert_eq!(shift_out_bit(0x09, 5), Ok(0));
    }

    #[test]
    fn test_shift_position_out_of_range() {
        assert_eq!(
            shift_out_bit(0x09, 8),
            Err(ArgumentError::ShiftPositionOutOfRange(8))
        );
    }

    proptest! {
        #[test]
        fn frame_reassembles_byte(byte in any::<u8>()) {
            prop_assert_eq!(frame_bit(byte, 0).unwrap(), 0);
            prop_assert_eq!(frame_bit(byte, 9).unwrap(), 1);

            let data = (1..=8)
                .fold(0u8, |acc, p| acc | frame_bit(byte, p).unwrap() << (p - 1));
            prop_assert_eq!(data, byte);
        }

        #[test]
        fn shift_out_reassembles_byte(byte in any::<u8>()) {
            let data = (0..SHIFT_BITS)
                .fold(0u8, |acc, p| (acc << 1) | shift_out_bit(byte, p).unwrap());
            prop_assert_eq!(data, byte);
        }
    }
}
