//! Error types for layout compilation, per-address evaluation and image output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced when validating compile-time layouts and geometry.
///
/// These are raised once, before any address is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Field lists no bit positions.
    #[error("field `{0}` has no bit positions")]
    EmptyField(String),
    /// Field lists more positions than a 32-bit value can hold.
    #[error("field `{name}` is {bits} bits wide (max 32)")]
    FieldTooWide { name: String, bits: usize },
    /// A listed position lies outside the word the field belongs to.
    #[error("field `{name}` uses bit {position} of a {word_bits}-bit word")]
    PositionOutOfRange {
        name: String,
        position: u32,
        word_bits: u32,
    },
    /// Field name is empty or used twice within one layout.
    #[error("invalid field name `{0}`")]
    InvalidFieldName(String),
    /// Address width outside 1..=24 lines.
    #[error("input width must be 1..=24 bits, got {0}")]
    InvalidInputBits(u32),
    /// Data width other than 8 or 16.
    #[error("output width must be 8 or 16 bits, got {0}")]
    InvalidOutputBits(u32),
    /// Default output word does not fit the data width.
    #[error("default output {value:#x} does not fit in {bits} bits")]
    DefaultOutputTooWide { value: u32, bits: u32 },
}

/// Errors produced when a primitive is called outside its domain.
///
/// All inputs are compile-time constants or values derived from them, so
/// these indicate a logic defect rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Bit position beyond a 32-bit word.
    #[error("bit position {0} is outside a 32-bit word")]
    BitPositionOutOfRange(u32),
    /// Value has bits set above the field width.
    #[error("value {value:#x} does not fit in a {bits}-bit field")]
    ValueTooWide { value: u32, bits: u32 },
    /// Position inside an asynchronous frame beyond the stop bit.
    #[error("frame position {0} is outside 0..=9")]
    FramePositionOutOfRange(u32),
    /// Position inside a shift register beyond the last data bit.
    #[error("shift position {0} is outside 0..=7")]
    ShiftPositionOutOfRange(u32),
    /// Minute index outside one 12-hour cycle.
    #[error("minute index {0} is outside 0..=719")]
    MinuteIndexOutOfRange(u32),
    /// Lookup of a field name the layout does not define.
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// Errors produced by a [crate::sink::WordSink].
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to finish {path}: {source}")]
    Close {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Word was not the sink's configured width.
    #[error("expected a {expected}-byte word, got {actual} bytes")]
    WordSize { expected: usize, actual: usize },
}

/// Any failure while enumerating the address space into an image.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("address {address:#06x}: {source}")]
    Argument {
        address: u32,
        #[source]
        source: ArgumentError,
    },
    #[error(transparent)]
    Sink(#[from] SinkError),
}
