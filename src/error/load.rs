//! Key loading error module.
//!
//! This module defines error types raised while reading keys from a
//! [`KeySource`](crate::loader::KeySource). A load error never invalidates the
//! filter being loaded; it only means the filter may be missing keys.

use thiserror::Error;

/// Errors that can occur while loading keys into a filter.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened at all.
    #[error("Failed to open key source {source_name}: {error}")]
    Open {
        /// Human-readable description of the source
        source_name: String,
        /// Underlying I/O failure
        #[source]
        error: std::io::Error,
    },

    /// Reading failed part way through the source.
    #[error("Failed to read key source {source_name} at line {line}: {error}")]
    Read {
        /// Human-readable description of the source
        source_name: String,
        /// 1-based line number that could not be read
        line: usize,
        /// Underlying I/O failure
        #[source]
        error: std::io::Error,
    },
}

impl LoadError {
    /// The I/O error kind behind this failure.
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            Self::Open { error, .. } | Self::Read { error, .. } => error.kind(),
        }
    }
}
