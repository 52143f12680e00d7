//! Key loading for Kiai filters.
//!
//! The filter itself never performs I/O. This module reads keys from a
//! [`KeySource`], normalises each line (trim, skip blanks and comments) and
//! feeds the result to [`KiaiFilter::add`]. Bytes that are not valid UTF-8
//! are replaced with U+FFFD rather than ending the load, and a leading
//! byte-order mark is trimmed along with whitespace.
//!
//! A failed load is not fatal to the filter: every key read before the
//! failure stays added, and the returned [`LoadReport`] records the error so
//! callers can treat the filter as possibly incomplete.
//!
//! ```
//! use kiai_lib::data_structures::kiai_filter::KiaiFilter;
//! use kiai_lib::loader::{load_keys, ReaderSource};
//!
//! let mut filter = KiaiFilter::new();
//! let mut source = ReaderSource::from_text("inline", "apple\n  banana \n\ncherry\r\n");
//!
//! let report = load_keys(&mut filter, &mut source);
//! assert!(report.is_complete());
//! assert_eq!(report.keys_added, 3);
//! assert!(filter.contains("banana"));
//! ```

use std::borrow::Cow;
use std::io::BufRead;

use crate::config::LoaderSettings;
use crate::data_structures::kiai_filter::{KiaiFilter, KiaiFilterConfig, Result};
use crate::error::load::LoadError;

mod source;

pub use source::{FileSource, KeySource, ReaderSource};

#[cfg(test)]
pub(crate) use source::MockKeySource;

/// U+FEFF, which editors often leave at the start of a text file.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Outcome of loading one source into a filter.
#[derive(Debug)]
pub struct LoadReport {
    /// Description of the source that was read
    pub source: String,

    /// Keys passed to `add`
    pub keys_added: usize,

    /// Lines dropped as blank or commented out
    pub lines_skipped: usize,

    /// Failure that stopped the load early, if any
    pub error: Option<LoadError>,
}

impl LoadReport {
    fn new(source: String) -> Self {
        Self {
            source,
            keys_added: 0,
            lines_skipped: 0,
            error: None,
        }
    }

    /// Whether the whole source was read without error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Reads keys from sources into filters.
#[derive(Debug, Clone, Default)]
pub struct KeyLoader {
    settings: LoaderSettings,
}

impl KeyLoader {
    /// Create a loader with the given line normalisation settings.
    pub fn new(settings: LoaderSettings) -> Self {
        Self { settings }
    }

    /// Read every key from `source` into `filter`.
    pub fn load<S>(&self, filter: &mut KiaiFilter, source: &mut S) -> LoadReport
    where
        S: KeySource + ?Sized,
    {
        let mut report = LoadReport::new(source.describe());

        let mut reader = match source.open() {
            Ok(reader) => reader,
            Err(error) => {
                let error = LoadError::Open {
                    source_name: report.source.clone(),
                    error,
                };
                tracing::error!(error = %error, "Error loading keys");
                report.error = Some(error);
                return report;
            }
        };

        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    line_number += 1;
                    let line = String::from_utf8_lossy(strip_line_ending(&buf));
                    if matches!(line, Cow::Owned(_)) {
                        tracing::warn!(
                            source = %report.source,
                            line = line_number,
                            "Invalid UTF-8 replaced with U+FFFD"
                        );
                    }

                    match self.normalize(&line) {
                        Some(key) => {
                            filter.add(key);
                            report.keys_added += 1;
                        }
                        None => report.lines_skipped += 1,
                    }
                }
                Err(error) => {
                    let error = LoadError::Read {
                        source_name: report.source.clone(),
                        line: line_number + 1,
                        error,
                    };
                    tracing::error!(
                        error = %error,
                        keys_added = report.keys_added,
                        "Error loading keys, filter may be incomplete"
                    );
                    report.error = Some(error);
                    break;
                }
            }
        }

        if filter.is_over_capacity() {
            tracing::warn!(
                items_added = filter.items_added(),
                expected_items = filter.config().expected_items(),
                "Filter is over capacity, false positive rate will exceed its target"
            );
        }

        tracing::info!(
            source = %report.source,
            keys_added = report.keys_added,
            lines_skipped = report.lines_skipped,
            "Loaded keys"
        );

        report
    }

    /// Turn a raw line into a key, or `None` if the line should be skipped.
    fn normalize<'a>(&self, line: &'a str) -> Option<&'a str> {
        let trimmed = line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
        if trimmed.is_empty() {
            return None;
        }
        if let Some(prefix) = &self.settings.comment_prefix {
            if trimmed.starts_with(prefix.as_str()) {
                return None;
            }
        }

        Some(if self.settings.trim { trimmed } else { line })
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Read every key from `source` into `filter` with default settings.
pub fn load_keys<S>(filter: &mut KiaiFilter, source: &mut S) -> LoadReport
where
    S: KeySource + ?Sized,
{
    KeyLoader::default().load(filter, source)
}

/// Build a filter from `config` and fill it from `source`.
///
/// Construction errors are returned; load errors are reported in the
/// [`LoadReport`] alongside the (possibly partial) filter.
pub fn filter_from_source<S>(
    config: KiaiFilterConfig,
    source: &mut S,
) -> Result<(KiaiFilter, LoadReport)>
where
    S: KeySource + ?Sized,
{
    let mut filter = KiaiFilter::with_config(config)?;
    let report = load_keys(&mut filter, source);
    Ok((filter, report))
}
