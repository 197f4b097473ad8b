//! The address space enumerator: evaluates a [RomProgram] at every address, in
//! ascending order, and hands each packed word to a [WordSink].

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    bits::word_to_be_bytes,
    errors::{ArgumentError, GenerateError},
    geometry::RomGeometry,
    sink::{FileSink, WordSink},
};

/// A combinational function from address to data word.
///
/// `word` must be pure: the same address always yields the same word, and
/// evaluation order carries no state.
pub trait RomProgram {
    fn geometry(&self) -> RomGeometry;

    /// Data word for `address`. Bits above the geometry's output width are
    /// dropped when packing.
    fn word(&self, address: u32) -> Result<u32, ArgumentError>;
}

/// Every address of `geometry`, ascending.
pub fn addresses(geometry: RomGeometry) -> impl Iterator<Item = u32> {
    0..geometry.address_count()
}

/// Evaluates and packs the word for a single address.
pub fn packed_word<P: RomProgram + ?Sized>(
    program: &P,
    geometry: &RomGeometry,
    address: u32,
) -> Result<Vec<u8>, GenerateError> {
    let word = program
        .word(address)
        .map_err(|source| GenerateError::Argument { address, source })?;

    Ok(word_to_be_bytes(word & geometry.word_mask(), geometry.word_bytes()))
}

/// Streams the whole image into `sink`, then closes it.
///
/// Stops at the first failure; the sink is not closed in that case.
#[instrument(skip_all)]
pub fn generate<P, S>(program: &P, sink: &mut S) -> Result<(), GenerateError>
where
    P: RomProgram + ?Sized,
    S: WordSink + ?Sized,
{
    let geometry = program.geometry();
    geometry.validate()?;

    info!(
        input_bits = geometry.input_bits,
        output_bits = geometry.output_bits,
        part = %geometry.part(),
        "generating image"
    );

    for address in addresses(geometry) {
        let word = packed_word(program, &geometry, address)?;
        sink.write_word(&word)?;
    }

    sink.close()?;
    debug!(words = geometry.address_count(), "image complete");
    Ok(())
}

/// Generates the whole image in memory.
pub fn generate_image<P: RomProgram + ?Sized>(program: &P) -> Result<Vec<u8>, GenerateError> {
    let mut image = Vec::with_capacity(program.geometry().image_len());
    generate(program, &mut image)?;
    Ok(image)
}

/// Generates the image into the file at `path`, replacing any previous
/// contents. On failure no file is left at `path`.
pub fn write_image<P: RomProgram + ?Sized>(
    program: &P,
    path: impl AsRef<Path>,
) -> Result<usize, GenerateError> {
    let geometry = program.geometry();
    geometry.validate()?;

    let mut sink = FileSink::open(path, geometry.word_bytes())?;
    generate(program, &mut sink)?;

    info!(path = %sink.path().display(), bytes = sink.written(), "wrote image");
    Ok(sink.written())
}
