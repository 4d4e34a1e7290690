//! The merge orchestrator.
//!
//! Runs one request end to end: precondition checks, then for every accepted
//! item in submission order materialize, normalize and append, then
//! serialize once. The first failing item aborts the request. Temp resources
//! are released on every path before the result is returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::config::MergeOptions;
use crate::error::{MergeError, Result};
use crate::input::InputItem;
use crate::io::TempWorkspace;
use crate::merge::accumulator::DocumentAccumulator;
use crate::normalize::Normalizer;
use crate::utils::format_file_size;

/// Source of request ids for log correlation.
static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of inputs whose pages made it into the output.
    pub files_merged: usize,

    /// Number of inputs skipped for an unsupported name.
    pub files_skipped: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Size of the merged document in bytes.
    pub output_size: u64,

    /// Total time taken for the merge.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeOutput {
    /// The merged PDF file.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Merges an ordered batch of PDF and image inputs into one PDF.
///
/// A `Merger` holds only configuration; every call to [`Merger::merge`] owns
/// its own accumulator and temp workspace, so one merger can serve
/// concurrent requests from several threads.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
    normalizer: Normalizer,
}

#[derive(Debug, Default)]
struct Tally {
    merged: usize,
    skipped: usize,
    pages: usize,
}

impl Merger {
    /// Create a merger with the given options.
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            normalizer: Normalizer::new(),
        }
    }

    /// Options this merger runs with.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `items` in order.
    ///
    /// Items whose name carries no accepted extension are skipped with a
    /// warning. Every other item must normalize, or the whole merge fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `items` is empty or every name is empty ([`MergeError::NoInputSelected`])
    /// - no item has an accepted extension ([`MergeError::NoSupportedInput`])
    /// - the options are invalid
    /// - any accepted item fails to spool or normalize
    /// - the merged document cannot be serialized
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfstitch::{InputItem, MergeOptions, Merger};
    /// # fn example(report: Vec<u8>, photo: Vec<u8>) -> pdfstitch::Result<()> {
    /// let merger = Merger::new(MergeOptions::default());
    /// let output = merger.merge(&[
    ///     InputItem::new("report.pdf", report),
    ///     InputItem::new("photo.jpg", photo),
    /// ])?;
    /// println!("Merged {} pages", output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, items: &[InputItem]) -> Result<MergeOutput> {
        let request_id = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
        let _span = tracing::info_span!("merge", request_id, items = items.len()).entered();
        let start = Instant::now();

        check_preconditions(items)?;
        self.options.validate()?;

        let mut workspace = TempWorkspace::new(&self.options);
        let outcome = self.run(items, &mut workspace);
        workspace.release();

        let (bytes, tally) = outcome?;
        let statistics = MergeStatistics {
            files_merged: tally.merged,
            files_skipped: tally.skipped,
            total_pages: tally.pages,
            output_size: bytes.len() as u64,
            merge_time: start.elapsed(),
        };

        tracing::info!(
            files = statistics.files_merged,
            skipped = statistics.files_skipped,
            pages = statistics.total_pages,
            size = %statistics.format_output_size(),
            elapsed_ms = statistics.merge_time.as_millis() as u64,
            "Merge complete"
        );

        Ok(MergeOutput { bytes, statistics })
    }

    fn run(&self, items: &[InputItem], workspace: &mut TempWorkspace) -> Result<(Vec<u8>, Tally)> {
        let mut accumulator = DocumentAccumulator::new(self.options.compression);
        let mut tally = Tally::default();

        for (index, item) in items.iter().enumerate() {
            let Some(declared) = item.declared_type().filter(|_| item.is_supported()) else {
                let skipped = MergeError::UnsupportedType {
                    name: item.name().to_string(),
                };
                tracing::warn!(index, error = %skipped, "Skipping input");
                tally.skipped += 1;
                continue;
            };

            let data = workspace.materialize(index, item)?;
            let pages = self.normalizer.normalize(item.name(), declared, &data)?;
            tally.pages += accumulator.append(pages)?;
            tally.merged += 1;
        }

        let (bytes, write_stats) = accumulator.serialize()?;
        tracing::debug!(
            pruned = write_stats.pruned_objects,
            write_ms = write_stats.write_time.as_millis() as u64,
            "Serialized output"
        );

        Ok((bytes, tally))
    }
}

/// Reject requests with nothing to merge before any work is done.
fn check_preconditions(items: &[InputItem]) -> Result<()> {
    if items.iter().all(|item| item.name().is_empty()) {
        return Err(MergeError::NoInputSelected);
    }
    if !items.iter().any(InputItem::is_supported) {
        return Err(MergeError::NoSupportedInput);
    }
    Ok(())
}
