//! Kiai Library
//!
//! This library contains a probabilistic set-membership filter for fronting
//! expensive existence checks, together with the configuration, key loading
//! and error handling around it. The library is used by the `kiai` binary,
//! but can also be used as a dependency by other projects.
//!
//! # Architecture
//!
//! Kiai is designed with the following principles in mind:
//! - Strict component boundaries: the filter never performs I/O
//! - Dependency injection for key sources
//! - Comprehensive error handling and propagation
//! - Deterministic, reproducible filter contents

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod loader;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Kiai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
