//! pdfstitch - Merge PDF documents and images into a single PDF.
//!
//! This library combines an ordered batch of uploads into one document:
//!
//! - PDF pages are copied with their content, never re-rendered
//! - PNG and JPEG images become one page each, sized to the image
//! - Transparent images are flattened onto white
//! - A batch either merges completely or fails without output
//! - Temporary files never outlive the request that created them
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfstitch::InputItem;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let items = vec![
//!     InputItem::new("report.pdf", std::fs::read("report.pdf")?),
//!     InputItem::new("photo.jpg", std::fs::read("photo.jpg")?),
//! ];
//!
//! let bytes = pdfstitch::merge(&items)?;
//! std::fs::write("merged_output.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configured Merge
//!
//! ```no_run
//! use pdfstitch::{CompressionLevel, InputItem, MergeOptions, Merger};
//!
//! # fn example(items: Vec<InputItem>) -> pdfstitch::Result<()> {
//! let mut options = MergeOptions::spooled_in("/var/tmp");
//! options.compression = CompressionLevel::Maximum;
//!
//! let output = Merger::new(options).merge(&items)?;
//! println!(
//!     "Merged {} files into {} pages ({})",
//!     output.statistics.files_merged,
//!     output.statistics.total_pages,
//!     output.statistics.format_output_size()
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod detect;
pub mod error;
pub mod input;
pub mod io;
pub mod merge;
pub mod normalize;
pub mod utils;

// Re-export commonly used types
pub use config::{CompressionLevel, MergeOptions, SpoolMode};
pub use error::{ErrorKind, MergeError, Result};
pub use input::{DeclaredType, InputItem};
pub use merge::{MergeOutput, MergeStatistics, Merger, merge};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
