//! Layout: compiled set of fields sharing one word (an address or a data word).

use std::collections::BTreeMap;

use crate::{
    compiled::CompiledField,
    errors::{ArgumentError, CompileError},
    field::Field,
};

/// A compiled set of [CompiledField]s over a word of `word_bits` bits. Use
/// [Layout::compile] to build from [Field]s, then [Layout::decode] /
/// [Layout::encode] to move between words and named values.
///
/// Fields may overlap; the layout does not enforce disjoint positions.
#[derive(Debug, Clone)]
pub struct Layout {
    word_bits: u32,
    /// Compiled fields in definition order.
    pub fields: Vec<CompiledField>,
}

impl Layout {
    /// Compiles a slice of [Field]s into a layout. Fails if any field is
    /// invalid or two fields share a name.
    pub fn compile(fields: &[Field], word_bits: u32) -> Result<Self, CompileError> {
        let mut compiled_fields: Vec<CompiledField> = Vec::with_capacity(fields.len());

        for field in fields {
            if compiled_fields.iter().any(|f| f.name == field.name) {
                return Err(CompileError::InvalidFieldName(field.name.clone()));
            }

            compiled_fields.push(CompiledField::compile(field, word_bits)?);
        }

        Ok(Self {
            word_bits,
            fields: compiled_fields,
        })
    }

    pub fn word_bits(&self) -> u32 {
        self.word_bits
    }

    /// Looks up a compiled field by name.
    pub fn field(&self, name: &str) -> Result<&CompiledField, ArgumentError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ArgumentError::UnknownField(name.to_string()))
    }

    /// Decodes the value of a single named field.
    pub fn get(&self, word: u32, name: &str) -> Result<u32, ArgumentError> {
        Ok(self.field(name)?.extract(word))
    }

    /// Decodes every field of `word` into a map of field names to values.
    pub fn decode(&self, word: u32) -> BTreeMap<String, u32> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.extract(word)))
            .collect()
    }

    /// Builds a word starting from `default`, OR-ing in each named value.
    /// Fields absent from `values` keep the default bits.
    pub fn encode<'a, I>(&self, default: u32, values: I) -> Result<u32, ArgumentError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut word = default;
        for (name, value) in values {
            word = self.field(name)?.inject(word, value)?;
        }

        Ok(word)
    }
}
