//! Test modules for Kiai.
//!
//! This module contains cross-component testing infrastructure, including:
//! - Filter property tests (no false negatives, determinism, monotonic fill)
//! - Loader tests against files, readers and mocked sources
//! - Configuration loading tests
//! - Test fixtures and utilities
//!
//! Unit tests for individual components live next to the code they test.

pub mod config_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_set_strategy, key_strategy, numbered_keys, FailingReader, TestFixture};
