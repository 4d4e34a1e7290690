//! Server configuration.

use std::net::SocketAddr;

use anyhow::{Context, bail};
use pdfstitch::{CompressionLevel, MergeOptions, SpoolMode};

use crate::cli::Cli;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Validated settings the server runs with.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,

    /// Request body cap in bytes.
    pub max_upload_bytes: usize,

    /// Options handed to every merge.
    pub merge: MergeOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_bytes: (50 * BYTES_PER_MB) as usize,
            merge: MergeOptions {
                spool: SpoolMode::Disk,
                ..Default::default()
            },
        }
    }
}

impl TryFrom<&Cli> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(cli: &Cli) -> anyhow::Result<Self> {
        let bind: SocketAddr = cli
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", cli.bind))?;

        if cli.max_upload_mb == 0 {
            bail!("--max-upload-mb must be greater than 0");
        }
        let max_upload_bytes = cli
            .max_upload_mb
            .checked_mul(BYTES_PER_MB)
            .and_then(|bytes| usize::try_from(bytes).ok())
            .context("--max-upload-mb is too large")?;

        let compression: CompressionLevel = cli.compression.parse()?;
        let spool: SpoolMode = cli.spool.parse()?;

        let merge = MergeOptions {
            compression,
            spool,
            temp_root: cli.temp_dir.clone(),
        };
        merge.validate()?;

        Ok(Self {
            bind,
            max_upload_bytes,
            merge,
        })
    }
}
