//! Temporary storage and PDF serialization.

pub mod spool;
pub mod writer;

pub use spool::TempWorkspace;
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
