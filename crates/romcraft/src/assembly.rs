//! How a field's position list maps onto the significance of its value.

/// Order in which a [crate::field::Field]'s positions are assigned to value bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// First listed position carries value bit 0.
    #[default]
    LsbFirst,
    /// First listed position carries the most significant value bit.
    MsbFirst,
}

impl BitOrder {
    /// Converts a value assembled in this order into a value assembled
    /// least-significant-first over `bits` positions, and back.
    pub fn normalize(self, value: u32, bits: u32) -> u32 {
        match self {
            BitOrder::LsbFirst => value,
            BitOrder::MsbFirst => crate::bits::reverse_bits_n(value, bits),
        }
    }
}
