//! PDF serialization.
//!
//! Flattens a finished [`Document`] into the bytes of one PDF file. The
//! writer never stamps dates or identifiers, so identical documents always
//! serialize to identical bytes.

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::config::CompressionLevel;
use crate::error::{MergeError, Result};

/// Options for serializing PDF documents.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Drop objects that are not reachable from the trailer.
    pub prune: bool,

    /// Compress uncompressed streams before writing.
    pub compress: bool,

    /// Renumber objects densely from 1.
    pub optimize: bool,

    /// Initial capacity of the output buffer (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            prune: true,
            compress: true,
            optimize: true,
            buffer_size: 64 * 1024,
        }
    }
}

impl From<CompressionLevel> for WriteOptions {
    fn from(level: CompressionLevel) -> Self {
        Self {
            compress: level != CompressionLevel::None,
            ..Default::default()
        }
    }
}

/// Statistics about a serialization.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize.
    pub write_time: Duration,

    /// Number of bytes produced.
    pub output_size: u64,

    /// Number of unreachable objects that were dropped.
    pub pruned_objects: usize,
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Serialize a document to bytes.
    ///
    /// The document is modified in place (pruned, compressed, renumbered)
    /// according to the writer options.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::SerializationFailure`] if lopdf cannot write the
    /// document.
    pub fn to_bytes(&self, doc: &mut Document) -> Result<(Vec<u8>, WriteStatistics)> {
        let start = Instant::now();

        let pruned_objects = if self.options.prune {
            doc.prune_objects().len()
        } else {
            0
        };

        if self.options.compress {
            doc.compress();
        }

        if self.options.optimize {
            doc.renumber_objects();
        }

        let mut buffer = Vec::with_capacity(self.options.buffer_size);
        doc.save_to(&mut buffer)
            .map_err(|e| MergeError::serialization(e.to_string()))?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            output_size: buffer.len() as u64,
            pruned_objects,
        };

        Ok((buffer, stats))
    }
}
