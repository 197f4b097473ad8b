use crate::{
    assembly::BitOrder,
    bits::{self, WORD_BITS},
    errors::{ArgumentError, CompileError},
    field::Field,
};

/// A [Field] checked against the width of the word it lives in.
///
/// Once compiled, extraction cannot fail; injection only fails when the value
/// is wider than the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    pub order: BitOrder,
    pub positions: Vec<u32>,
    pub width: u32,
}

impl CompiledField {
    pub fn compile(field: &Field, word_bits: u32) -> Result<Self, CompileError> {
        if field.name.is_empty() {
            return Err(CompileError::InvalidFieldName(field.name.clone()));
        }

        if field.positions.is_empty() {
            return Err(CompileError::EmptyField(field.name.clone()));
        }

        if field.positions.len() > WORD_BITS as usize {
            return Err(CompileError::FieldTooWide {
                name: field.name.clone(),
                bits: field.positions.len(),
            });
        }

        if let Some(&position) = field.positions.iter().find(|&&p| p >= word_bits) {
            return Err(CompileError::PositionOutOfRange {
                name: field.name.clone(),
                position,
                word_bits,
            });
        }

        Ok(CompiledField {
            name: field.name.clone(),
            order: field.order,
            positions: field.positions.clone(),
            width: field.positions.len() as u32,
        })
    }

    /// Largest value the field can carry.
    pub fn max_value(&self) -> u32 {
        if self.width >= WORD_BITS {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Decodes the field's value out of `word`.
    pub fn extract(&self, word: u32) -> u32 {
        let value = bits::gather_positions(word, &self.positions);
        self.order.normalize(value, self.width)
    }

    /// OR-s `value` into `word` at the field's positions.
    pub fn inject(&self, word: u32, value: u32) -> Result<u32, ArgumentError> {
        if value > self.max_value() {
            return Err(ArgumentError::ValueTooWide {
                value,
                bits: self.width,
            });
        }

        bits::encode_positions(
            word,
            self.order.normalize(value, self.width),
            &self.positions,
        )
    }
}
