//! Declarative definition of logical fields packed into an address or data word.

use crate::assembly::BitOrder;

/// A named quantity spread over an explicit list of bit positions.
///
/// Fields are usually written as constants next to the hardware wiring they
/// describe, then compiled into a [crate::layout::Layout].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Name used for lookups and in decoded maps.
    pub name: String,
    /// How positions are assigned to value bits.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: BitOrder,
    /// Bit positions within the word (weight, 0 = LSB). Need not be
    /// contiguous or sorted.
    pub positions: Vec<u32>,
}

impl Field {
    /// Creates a least-significant-first field.
    pub fn new(name: impl Into<String>, positions: &[u32]) -> Self {
        Field {
            name: name.into(),
            order: BitOrder::LsbFirst,
            positions: positions.to_vec(),
        }
    }

    pub fn new_with_bit_order(name: impl Into<String>, positions: &[u32], order: BitOrder) -> Self {
        Field {
            name: name.into(),
            order,
            positions: positions.to_vec(),
        }
    }

    /// A one-bit field at `position`.
    pub fn bit(name: impl Into<String>, position: u32) -> Self {
        Self::new(name, &[position])
    }

    /// Number of value bits the field carries.
    pub fn width(&self) -> usize {
        self.positions.len()
    }
}
