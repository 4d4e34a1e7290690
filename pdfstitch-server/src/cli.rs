//! Command-line interface for the pdfstitch server.
//!
//! Every flag can also be set through a `PDFSTITCH_*` environment variable.
//! This file is also compiled by `build.rs` to render the man page, so it only
//! depends on `clap`.

use clap::Parser;
use std::path::PathBuf;

/// Serve a web form that merges uploaded PDFs and images into one PDF.
///
/// Uploads are merged in the order they were submitted. PDF pages are copied
/// as they are; PNG and JPEG images become one page each, sized to the image.
#[derive(Parser, Debug)]
#[command(name = "pdfstitch")]
#[command(version)]
#[command(about = "Merge uploaded PDFs and images into a single PDF", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long, value_name = "ADDR", env = "PDFSTITCH_BIND")]
    #[arg(default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Largest accepted request body, in megabytes
    ///
    /// Requests above this size are rejected with 413 before any file is
    /// processed.
    #[arg(long, value_name = "MB", env = "PDFSTITCH_MAX_UPLOAD_MB", default_value_t = 50)]
    pub max_upload_mb: u64,

    /// Compression level for the merged PDF
    ///
    /// - none: write streams as they are
    /// - standard: compress uncompressed streams (default)
    /// - maximum: standard, and prune every input before merging
    #[arg(short, long, value_name = "LEVEL", env = "PDFSTITCH_COMPRESSION")]
    #[arg(default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Where uploads are kept while a merge runs
    ///
    /// - disk: spool each upload into a per-request temp directory (default)
    /// - memory: keep uploads in memory
    #[arg(long, value_name = "MODE", env = "PDFSTITCH_SPOOL", default_value = "disk")]
    #[arg(value_parser = ["memory", "disk"])]
    pub spool: String,

    /// Parent directory for per-request temp directories
    ///
    /// Defaults to the system temp directory.
    #[arg(long, value_name = "DIR", env = "PDFSTITCH_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,
}
