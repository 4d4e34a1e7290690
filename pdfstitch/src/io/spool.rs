//! Per-request temporary storage.
//!
//! A [`TempWorkspace`] owns every temporary resource created while one merge
//! request runs. In [`SpoolMode::Disk`] it creates a uniquely named directory
//! under the configured temp root and writes each accepted upload there as
//! `<index>-<sanitized name>`, so concurrent requests never share a path.
//!
//! Release is best-effort: failures are logged and never returned, because a
//! cleanup problem must not replace the outcome of the merge itself. Dropping
//! an unreleased workspace releases it as well.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{MergeOptions, SpoolMode};
use crate::error::{MergeError, Result};
use crate::input::InputItem;
use crate::utils::sanitize_file_name;

const WORKSPACE_PREFIX: &str = "pdfstitch-";

/// Scoped owner of the temp resources of one merge request.
#[derive(Debug)]
pub struct TempWorkspace {
    mode: SpoolMode,
    root: PathBuf,
    dir: Option<TempDir>,
    resources: Vec<PathBuf>,
}

impl TempWorkspace {
    /// Create a workspace for one request.
    ///
    /// Nothing touches the filesystem until the first input is materialized.
    pub fn new(options: &MergeOptions) -> Self {
        Self {
            mode: options.spool,
            root: options.effective_temp_root(),
            dir: None,
            resources: Vec::new(),
        }
    }

    /// Make an input's bytes available to the normalizer.
    ///
    /// In memory mode this borrows the item's content. In disk mode the content
    /// is written to a temp file owned by this workspace and read back.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TempStorage`] if the workspace directory or the
    /// temp file cannot be created, written, or read.
    pub fn materialize<'a>(&mut self, index: usize, item: &'a InputItem) -> Result<Cow<'a, [u8]>> {
        match self.mode {
            SpoolMode::Memory => Ok(Cow::Borrowed(item.content())),
            SpoolMode::Disk => {
                let path = self.spool(index, item)?;
                let data = fs::read(&path).map_err(|e| MergeError::temp_storage(&path, e))?;
                Ok(Cow::Owned(data))
            }
        }
    }

    fn spool(&mut self, index: usize, item: &InputItem) -> Result<PathBuf> {
        let dir = self.ensure_dir()?;
        let path = dir.join(format!("{index:03}-{}", sanitize_file_name(item.name())));

        // Tracked before writing so a partial file is still released.
        self.resources.push(path.clone());
        fs::write(&path, item.content()).map_err(|e| MergeError::temp_storage(&path, e))?;

        tracing::trace!(path = %path.display(), bytes = item.content().len(), "Spooled input");
        Ok(path)
    }

    fn ensure_dir(&mut self) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(dir.path().to_path_buf());
        }

        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&self.root)
            .map_err(|e| MergeError::temp_storage(&self.root, e))?;
        let path = dir.path().to_path_buf();
        self.dir = Some(dir);
        Ok(path)
    }

    /// Directory holding this request's temp files, once created.
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Number of temp files currently owned by this workspace.
    pub fn live_resources(&self) -> usize {
        self.resources.len()
    }

    /// Delete every temp resource of this request.
    pub fn release(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        for path in std::mem::take(&mut self.resources) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    let err = MergeError::ResourceCleanup { path, source };
                    tracing::warn!(error = %err, "Temp file left behind");
                }
            }
        }

        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(source) = dir.close() {
                let err = MergeError::ResourceCleanup { path, source };
                tracing::warn!(error = %err, "Temp directory left behind");
            }
        }
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}
