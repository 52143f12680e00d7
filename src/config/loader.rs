//! Loader configuration module.
//!
//! This module defines how raw lines from a key source are normalised into
//! keys before they reach the filter.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Key loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Whether to strip leading and trailing whitespace from each line
    pub trim: bool,

    /// Lines starting with this prefix are skipped (None to keep every line)
    pub comment_prefix: Option<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            trim: true,
            comment_prefix: None,
        }
    }
}

impl Validate for LoaderSettings {
    fn validate(&self) -> ConfigResult<()> {
        if matches!(&self.comment_prefix, Some(prefix) if prefix.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "comment_prefix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
