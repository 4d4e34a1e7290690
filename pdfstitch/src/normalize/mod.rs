//! Type normalization.
//!
//! Every accepted input is turned into a standalone PDF document before it is
//! appended to the output:
//!
//! - PDF content is parsed and kept page for page
//! - PNG and JPEG content is decoded, flattened to opaque RGB, and wrapped as
//!   a single page sized to the image
//!
//! The declared type of an input only chooses which path is attempted. The
//! content is sniffed first, and a mismatch is reported as an invalid
//! document or image instead of being handed to the wrong decoder.

pub mod pdf;
pub mod raster;

use ::image::ImageFormat;
use lopdf::Document;

use crate::detect::{self, ContentType};
use crate::error::{MergeError, Result};
use crate::input::DeclaredType;

/// The pages derived from one input, as a self-contained document.
#[derive(Debug)]
pub struct NormalizedPages {
    document: Document,
    page_count: usize,
    source: ContentType,
}

impl NormalizedPages {
    fn new(document: Document, source: ContentType) -> Self {
        let page_count = document.get_pages().len();
        Self {
            document,
            page_count,
            source,
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Detected type of the input the pages came from.
    pub fn source(&self) -> ContentType {
        self.source
    }

    /// Borrow the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the underlying document.
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Converts one input into [`NormalizedPages`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize the content of one input.
    ///
    /// # Arguments
    ///
    /// * `name` - Client-supplied file name, used in error messages
    /// * `declared` - Type the client claims the content has
    /// * `data` - Raw content
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDocument`] for a declared PDF that is not
    /// one or cannot be parsed, and [`MergeError::InvalidImage`] for a declared
    /// image that is not of that format or cannot be decoded.
    pub fn normalize(
        &self,
        name: &str,
        declared: DeclaredType,
        data: &[u8],
    ) -> Result<NormalizedPages> {
        let detected = detect::sniff(data);

        let document = match detected {
            _ if !detected.matches(declared) => {
                return Err(mismatch(name, declared, detected));
            }
            ContentType::Pdf => pdf::load(name, data)?,
            ContentType::Png => self.image_to_pdf(name, data, ImageFormat::Png)?,
            ContentType::Jpeg => self.image_to_pdf(name, data, ImageFormat::Jpeg)?,
            ContentType::Unknown => return Err(mismatch(name, declared, detected)),
        };

        let pages = NormalizedPages::new(document, detected);
        tracing::debug!(
            name,
            detected = %detected,
            pages = pages.page_count(),
            "Normalized input"
        );

        Ok(pages)
    }

    fn image_to_pdf(&self, name: &str, data: &[u8], format: ImageFormat) -> Result<Document> {
        let image = raster::decode(name, data, format)?;
        let rgb = raster::flatten_to_rgb(image);
        raster::wrap_as_page(name, &rgb)
    }
}

fn mismatch(name: &str, declared: DeclaredType, detected: ContentType) -> MergeError {
    let reason = format!("declared as {declared} but content is {detected}");
    if declared.is_image() {
        MergeError::invalid_image(name, reason)
    } else {
        MergeError::invalid_document(name, reason)
    }
}
