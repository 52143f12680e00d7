//! Error module for Kiai.
//!
//! This module provides the crate-wide error type. Each subsystem keeps its
//! own error enum (filter construction, configuration, key loading) and this
//! module folds them into [`KiaiError`] for the binary and other callers that
//! cross subsystem boundaries.

use thiserror::Error;

use crate::data_structures::kiai_filter::KiaiFilterError;

pub mod config;
pub mod load;

/// Result type alias used throughout Kiai.
pub type KiaiResult<T> = Result<T, KiaiError>;

/// Core error enum for Kiai.
#[derive(Error, Debug)]
pub enum KiaiError {
    /// Errors occurring while building a filter.
    #[error("Filter error: {0}")]
    Filter(#[from] KiaiFilterError),

    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors occurring while loading keys from a source.
    #[error("Load error: {0}")]
    Load(#[from] load::LoadError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
