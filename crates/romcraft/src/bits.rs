//! Low-level bit primitives over packed words.
//!
//! Bits are addressed by their weight: bit 0 is the least significant bit of
//! the word. Position lists map onto value bits in listed order, value-bit 0
//! first (see [crate::assembly::BitOrder::LsbFirst]).

use crate::errors::ArgumentError;

/// Width of the words the codec works on.
pub const WORD_BITS: u32 = u32::BITS;

/// Gathers the bits of `source` at `positions` into a value: result bit `k`
/// is `source` bit `positions[k]`.
///
/// Positions may be non-contiguous, unordered, or repeated.
pub fn decode_positions(source: u32, positions: &[u32]) -> Result<u32, ArgumentError> {
    if positions.len() > WORD_BITS as usize {
        return Err(ArgumentError::ValueTooWide {
            value: source,
            bits: WORD_BITS,
        });
    }

    if let Some(&position) = positions.iter().find(|&&p| p >= WORD_BITS) {
        return Err(ArgumentError::BitPositionOutOfRange(position));
    }

    Ok(gather_positions(source, positions))
}

/// [decode_positions] without range checks. Every position must be below
/// [WORD_BITS] and there must be at most [WORD_BITS] of them.
pub(crate) fn gather_positions(source: u32, positions: &[u32]) -> u32 {
    let mut value = 0u32;
    for (k, &position) in positions.iter().enumerate() {
        value |= ((source >> position) & 1) << k;
    }

    value
}

/// Scatters the bits of `value` into `destination`: value bit `k` is OR-ed
/// into `destination` at `positions[k]`.
///
/// Bits already set in `destination` are never cleared, so callers start from
/// a known default word.
pub fn encode_positions(
    destination: u32,
    value: u32,
    positions: &[u32],
) -> Result<u32, ArgumentError> {
    let bits = positions.len() as u32;
    if bits > WORD_BITS || (bits < WORD_BITS && value >> bits != 0) {
        return Err(ArgumentError::ValueTooWide { value, bits });
    }

    let mut word = destination;
    for (k, &position) in positions.iter().enumerate() {
        if position >= WORD_BITS {
            return Err(ArgumentError::BitPositionOutOfRange(position));
        }
        word |= ((value >> k) & 1) << position;
    }

    Ok(word)
}

/// Reverses the low `n` bits of `x` (LSB becomes MSB of the result).
pub fn reverse_bits_n(mut x: u32, n: u32) -> u32 {
    let mut r = 0u32;
    for _ in 0..n {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }

    r
}

/// Packs the low `n_bytes` bytes of `word`, most significant byte first.
pub fn word_to_be_bytes(word: u32, n_bytes: usize) -> Vec<u8> {
    (0..n_bytes)
        .rev()
        .map(|i| (word >> (i * 8)) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_bit() {
        assert_eq!(decode_positions(0b100, &[2]).unwrap(), 1);
        assert_eq!(decode_positions(0b100, &[1]).unwrap(), 0);
    }

    #[test]
    fn test_decode_contiguous() {
        let address = 0b1_0110_1011_0101u32;
        assert_eq!(decode_positions(address, &[0, 1, 2]).unwrap(), 0b101);
        assert_eq!(
            decode_positions(address, &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap(),
            address >> 3
        );
    }

    #[test]
    fn test_decode_reordered() {
        // bit 0 set, bit 7 clear, bit 3 set
        let source = 0b0000_1001;
        assert_eq!(decode_positions(source, &[7, 0, 3]).unwrap(), 0b110);
    }

    #[test]
    fn test_decode_aliased_positions() {
        assert_eq!(decode_positions(0b10, &[1, 1]).unwrap(), 0b11);
    }

    #[test]
    fn test_decode_position_out_of_range() {
        assert_eq!(
            decode_positions(0, &[0, 40]).unwrap_err(),
            ArgumentError::BitPositionOutOfRange(40)
        );
    }

    #[test]
    fn test_encode_ors_into_destination() {
        assert_eq!(
            encode_positions(0b1000_0000, 0b01, &[2, 3]).unwrap(),
            0b1000_0100
        );
        // never clears
        assert_eq!(encode_positions(0b1111, 0, &[0, 1]).unwrap(), 0b1111);
    }

    #[test]
    fn test_encode_value_too_wide() {
        assert_eq!(
            encode_positions(0, 0b100, &[0, 1]).unwrap_err(),
            ArgumentError::ValueTooWide { value: 4, bits: 2 }
        );
    }

    #[test]
    fn test_encode_full_width() {
        let positions: Vec<u32> = (0..32).collect();
        assert_eq!(encode_positions(0, u32::MAX, &positions).unwrap(), u32::MAX);
    }

    #[test]
    fn test_reverse_bits_n() {
        assert_eq!(reverse_bits_n(0b10101010, 8), 0b01010101);
        assert_eq!(reverse_bits_n(0b001, 3), 0b100);
    }

    #[test]
    fn test_word_to_be_bytes() {
        assert_eq!(word_to_be_bytes(0x1234, 2), vec![0x12, 0x34]);
        assert_eq!(word_to_be_bytes(0x1234, 1), vec![0x34]);
    }
}
