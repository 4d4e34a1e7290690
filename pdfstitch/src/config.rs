//! Merge options.
//!
//! These settings control how a merge request handles its inputs and how the
//! merged document is written. They are transport-agnostic: the server builds
//! them from its command line, tests build them directly.

use std::{path::PathBuf, str::FromStr};

use crate::error::{MergeError, Result};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were read.
    None,
    /// Compress every uncompressed stream in the output.
    #[default]
    Standard,
    /// Standard compression, and each input is pruned of unreferenced objects
    /// before it is merged.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = MergeError;

    /// Parse compression level from "none", "standard", or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(MergeError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Where accepted inputs are materialized while a merge runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpoolMode {
    /// Keep upload bytes in memory.
    #[default]
    Memory,
    /// Write every upload into a per-request temp directory and read it back.
    Disk,
}

impl FromStr for SpoolMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "disk" => Ok(Self::Disk),
            _ => Err(MergeError::invalid_config(format!(
                "Invalid spool mode: {s}. Must be one of: memory, disk"
            ))),
        }
    }
}

/// Complete configuration for a merge request.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Compression applied to the merged document.
    pub compression: CompressionLevel,

    /// How inputs are materialized during the merge.
    pub spool: SpoolMode,

    /// Parent directory for per-request temp directories.
    ///
    /// Falls back to the system temp directory.
    pub temp_root: Option<PathBuf>,
}

impl MergeOptions {
    /// Options that spool inputs to disk under `root`.
    pub fn spooled_in(root: impl Into<PathBuf>) -> Self {
        Self {
            spool: SpoolMode::Disk,
            temp_root: Some(root.into()),
            ..Default::default()
        }
    }

    /// Check that the options can be used for a merge.
    ///
    /// # Errors
    ///
    /// Returns an error if `temp_root` is set but is not an existing directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.temp_root {
            if !root.exists() {
                return Err(MergeError::invalid_config(format!(
                    "Temp directory does not exist: {}",
                    root.display()
                )));
            }
            if !root.is_dir() {
                return Err(MergeError::invalid_config(format!(
                    "Temp directory is not a directory: {}",
                    root.display()
                )));
            }
        }
        Ok(())
    }

    /// Directory under which request workspaces are created.
    pub fn effective_temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }
}
