//! Merging PDF documents and images.
//!
//! This module provides the core merging functionality:
//! - Precondition checks and input ordering ([`Merger`])
//! - Page tree assembly and serialization ([`DocumentAccumulator`])
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::InputItem;
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfstitch::Result<()> {
//! let bytes = pdfstitch::merge::merge(&[
//!     InputItem::new("a.pdf", a),
//!     InputItem::new("scan.png", b),
//! ])?;
//! std::fs::write("merged_output.pdf", bytes).unwrap();
//! # Ok(())
//! # }
//! ```

pub mod accumulator;
pub mod merger;

pub use accumulator::DocumentAccumulator;
pub use merger::{MergeOutput, MergeStatistics, Merger};

use crate::error::Result;
use crate::input::InputItem;

/// Merge `items` with default options and return the PDF bytes.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// See [`Merger::merge`].
pub fn merge(items: &[InputItem]) -> Result<Vec<u8>> {
    Merger::default().merge(items).map(|output| output.bytes)
}
