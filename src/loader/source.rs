//! Key sources for the loader.
//!
//! A [`KeySource`] hands the loader a line-oriented reader. The loader never
//! knows where the bytes come from, so new sources plug in without touching
//! the filter or the loader.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Something keys can be read from, one per line.
#[cfg_attr(test, mockall::automock)]
pub trait KeySource {
    /// Human-readable name used in logs and reports.
    fn describe(&self) -> String;

    /// Open the source for reading.
    fn open(&mut self) -> io::Result<Box<dyn BufRead + Send>>;
}

/// Keys stored one per line in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the file at `path`. The file is not opened yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&mut self) -> io::Result<Box<dyn BufRead + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Keys read from an arbitrary reader such as stdin or an in-memory buffer.
///
/// The reader is handed over on the first `open`; later opens fail.
#[derive(Debug)]
pub struct ReaderSource<R> {
    name: String,
    reader: Option<R>,
}

impl<R: Read + Send + 'static> ReaderSource<R> {
    /// Wrap `reader`, naming it `name` in logs.
    pub fn new<S: Into<String>>(name: S, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: Some(reader),
        }
    }
}

impl ReaderSource<io::Cursor<Vec<u8>>> {
    /// Source over an in-memory block of text.
    pub fn from_text<S: Into<String>>(name: S, text: &str) -> Self {
        Self::new(name, io::Cursor::new(text.as_bytes().to_vec()))
    }
}

impl<R: Read + Send + 'static> KeySource for ReaderSource<R> {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn open(&mut self) -> io::Result<Box<dyn BufRead + Send>> {
        match self.reader.take() {
            Some(reader) => Ok(Box::new(BufReader::new(reader))),
            None => Err(io::Error::other(format!(
                "{} has already been read",
                self.name
            ))),
        }
    }
}
