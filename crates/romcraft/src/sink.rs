//! Sinks that receive one packed word per address, in address order.
//!
//! A ROM image is only meaningful when complete. [FileSink] removes its file
//! unless [WordSink::close] succeeds, so a failed run never leaves a
//! truncated image behind.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::errors::SinkError;

/// Destination for the packed words of an image.
pub trait WordSink {
    /// Appends one word, already packed into bytes.
    fn write_word(&mut self, word: &[u8]) -> Result<(), SinkError>;

    /// Flushes and releases the destination. The image is complete after this
    /// returns `Ok`.
    fn close(&mut self) -> Result<(), SinkError>;
}

impl WordSink for Vec<u8> {
    fn write_word(&mut self, word: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(word);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes an image to a flat binary file: no header, no separators.
pub struct FileSink {
    path: PathBuf,
    word_bytes: usize,
    writer: Option<BufWriter<File>>,
    written: usize,
    is_closed: bool,
}

impl FileSink {
    /// Creates or truncates `path`.
    pub fn open(path: impl AsRef<Path>, word_bytes: usize) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| SinkError::Open {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), word_bytes, "opened image file");

        Ok(FileSink {
            path,
            word_bytes,
            writer: Some(BufWriter::new(file)),
            written: 0,
            is_closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn write_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl WordSink for FileSink {
    fn write_word(&mut self, word: &[u8]) -> Result<(), SinkError> {
        if word.len() != self.word_bytes {
            return Err(SinkError::WordSize {
                expected: self.word_bytes,
                actual: word.len(),
            });
        }

        let Some(writer) = self.writer.as_mut() else {
            return Err(self.write_error(std::io::ErrorKind::BrokenPipe.into()));
        };

        if let Err(source) = writer.write_all(word) {
            return Err(self.write_error(source));
        }

        self.written += word.len();
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        let close_error = |source| SinkError::Close {
            path: self.path.clone(),
            source,
        };

        let file = writer.into_inner().map_err(|e| close_error(e.into_error()))?;
        file.sync_all().map_err(close_error)?;

        self.is_closed = true;
        debug!(path = %self.path.display(), bytes = self.written, "closed image file");
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if self.is_closed {
            return;
        }

        self.writer = None;
        match fs::remove_file(&self.path) {
            Ok(()) => warn!(path = %self.path.display(), "removed incomplete image file"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "could not remove incomplete image file"
            ),
        }
    }
}
