//! Content type detection from magic bytes.
//!
//! Uploads are classified by what they contain, not by what their name
//! claims. The normalizer refuses to process content whose sniffed type does
//! not match the declared one.

use std::fmt;

use crate::input::DeclaredType;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers tolerate junk before the header within the first kilobyte.
const PDF_HEADER_WINDOW: usize = 1024;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Type of an upload as detected from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// A PDF document.
    Pdf,
    /// A PNG image.
    Png,
    /// A JPEG image.
    Jpeg,
    /// Anything else.
    Unknown,
}

impl ContentType {
    /// Whether content of this type satisfies the declared type.
    pub fn matches(&self, declared: DeclaredType) -> bool {
        matches!(
            (self, declared),
            (Self::Pdf, DeclaredType::Pdf)
                | (Self::Png, DeclaredType::Png)
                | (Self::Jpeg, DeclaredType::Jpg | DeclaredType::Jpeg)
        )
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Detect the content type of `data`.
pub fn sniff(data: &[u8]) -> ContentType {
    if data.starts_with(PNG_MAGIC) {
        ContentType::Png
    } else if data.starts_with(JPEG_MAGIC) {
        ContentType::Jpeg
    } else if find_pdf_header(data).is_some() {
        ContentType::Pdf
    } else {
        ContentType::Unknown
    }
}

/// Offset of the `%PDF-` header, if it starts within the first kilobyte.
pub fn find_pdf_header(data: &[u8]) -> Option<usize> {
    let window = &data[..data.len().min(PDF_HEADER_WINDOW + PDF_MAGIC.len())];
    window
        .windows(PDF_MAGIC.len())
        .position(|candidate| candidate == PDF_MAGIC)
}
