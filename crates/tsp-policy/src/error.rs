// error.rs — Error types for policy discovery and patching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or patching policy metadata.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The policy source directory does not exist.
    #[error("policy directory not found: {}", .path.display())]
    DirectoryMissing { path: PathBuf },

    /// A file I/O operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The policy document is not well-formed XML.
    #[error("malformed policy XML in {}: {reason}", .path.display())]
    Xml { path: PathBuf, reason: String },

    /// A discovery glob could not be built from the configured paths.
    #[error("invalid discovery pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
