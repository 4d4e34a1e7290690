//! Error types for pdfstitch.
//!
//! Every failure of a merge request is reported through [`MergeError`]. A
//! merge is all-or-nothing, so a single error describes why the whole batch
//! produced no document.
//!
//! # Error Categories
//!
//! - **Input Errors**: nothing selected, content that does not match its name
//! - **Storage Errors**: temp workspace could not be written
//! - **Output Errors**: the merged document could not be serialized

use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfstitch operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Coarse classification of a [`MergeError`].
///
/// Transports use the kind to pick a status code or a message template
/// without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request carried no usable item.
    NoInputSelected,
    /// An item's declared extension is not accepted.
    UnsupportedType,
    /// An item claimed to be a PDF but could not be parsed as one.
    InvalidDocument,
    /// An item claimed to be an image but could not be decoded as one.
    InvalidImage,
    /// The merged document could not be written out.
    SerializationFailure,
    /// An input could not be materialized into temporary storage.
    TempStorage,
    /// A temporary resource could not be released.
    ResourceCleanupFailure,
    /// Options passed to the merger are invalid.
    InvalidConfig,
}

/// Main error type for merge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The request contained no files at all.
    #[error("No files were selected")]
    NoInputSelected,

    /// Files were submitted but none of them has an accepted extension.
    #[error("No supported files were submitted (accepted: pdf, png, jpg, jpeg)")]
    NoSupportedInput,

    /// The item's name does not carry an accepted extension.
    #[error("Unsupported file type: {name}")]
    UnsupportedType {
        /// Client-supplied file name.
        name: String,
    },

    /// PDF content could not be parsed, or the content is not a PDF.
    #[error("Invalid PDF document: {name}\n  Reason: {reason}")]
    InvalidDocument {
        /// Client-supplied file name.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// Image content could not be decoded, or is not the declared format.
    #[error("Invalid image: {name}\n  Reason: {reason}")]
    InvalidImage {
        /// Client-supplied file name.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The merged document could not be flattened to bytes.
    #[error("Failed to serialize merged document: {reason}")]
    SerializationFailure {
        /// Description of what went wrong.
        reason: String,
    },

    /// Writing or reading a spooled input failed.
    #[error("Temporary storage failed at: {}\n  Reason: {source}", path.display())]
    TempStorage {
        /// Path of the temporary resource.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A temporary resource could not be deleted.
    ///
    /// Never returned from a merge; only logged.
    #[error("Failed to release temporary resource: {}\n  Reason: {source}", path.display())]
    ResourceCleanup {
        /// Path of the resource that was left behind.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid merge options.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },
}

impl MergeError {
    /// Create an InvalidDocument error.
    pub fn invalid_document(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidImage error.
    pub fn invalid_image(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationFailure error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::SerializationFailure {
            reason: reason.into(),
        }
    }

    /// Create a TempStorage error.
    pub fn temp_storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::TempStorage {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoInputSelected | Self::NoSupportedInput => ErrorKind::NoInputSelected,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::InvalidDocument { .. } => ErrorKind::InvalidDocument,
            Self::InvalidImage { .. } => ErrorKind::InvalidImage,
            Self::SerializationFailure { .. } => ErrorKind::SerializationFailure,
            Self::TempStorage { .. } => ErrorKind::TempStorage,
            Self::ResourceCleanup { .. } => ErrorKind::ResourceCleanupFailure,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// Check if the caller can fix this error by changing the submitted files.
    ///
    /// Everything else is a failure on the serving side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoInputSelected
                | ErrorKind::UnsupportedType
                | ErrorKind::InvalidDocument
                | ErrorKind::InvalidImage
        )
    }
}
