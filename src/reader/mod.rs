//! Record reader (delimited, header-first result files)
//!
//! Loads every row as a raw name→value mapping. No type interpretation
//! happens here; see [`crate::record::SchemaClassifier`] for that.

use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One untyped row of the results file.
///
/// Values are looked up by header name, never by position, so column order
/// in the file does not matter to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    row: usize,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRow {
    /// 1-based data row number (header excluded).
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Value of the named column, if the header has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }
}

/// Reader for benchmark result files.
#[derive(Debug)]
pub struct RecordReader {
    path: PathBuf,
    headers: Arc<[String]>,
    rows: Vec<RawRow>,
}

impl RecordReader {
    /// Load a result file from disk.
    ///
    /// # Errors
    ///
    /// - [`Error::InputNotFound`] if `path` does not exist
    /// - [`Error::MalformedInput`] if the header is missing or a row's
    ///   column count differs from the header's
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InputNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_reader(file, path)
    }

    /// Load rows from any byte source. `origin` is only used in messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] on a missing header or ragged row.
    pub fn from_reader<R: Read>(source: R, origin: &Path) -> Result<Self> {
        let malformed = |detail: String| Error::MalformedInput {
            path: origin.to_path_buf(),
            detail,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(source);

        let header_record = reader
            .headers()
            .map_err(|e| malformed(format!("unreadable header row: {e}")))?
            .clone();

        if header_record.iter().all(str::is_empty) {
            return Err(malformed("missing header row".to_string()));
        }

        let headers: Arc<[String]> = header_record.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| match e.kind() {
                csv::ErrorKind::UnequalLengths {
                    expected_len, len, ..
                } => malformed(format!(
                    "row {row} has {len} columns but the header has {expected_len}"
                )),
                _ => malformed(format!("row {row}: {e}")),
            })?;

            rows.push(RawRow {
                row,
                headers: Arc::clone(&headers),
                values: record.iter().map(str::to_string).collect(),
            });
        }

        tracing::debug!(path = %origin.display(), rows = rows.len(), "read result rows");

        Ok(Self {
            path: origin.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Path the rows were read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header columns in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the file had a header and no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
