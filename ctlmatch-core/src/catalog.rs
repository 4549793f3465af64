//! Control catalog reading.
//!
//! The catalog is a CSV file with a header row. One column holds the control
//! text (configurable, `control_text` by default); an optional `identifier`
//! column names the control. Rows are yielded lazily so the scanner stops at
//! the first bad row without touching the rest of the file.

use crate::error::{CtlmatchError, CtlmatchResult, IoResultExt};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Header of the optional identifier column.
pub const IDENTIFIER_COLUMN: &str = "identifier";

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlRecord {
    /// Control identifier; `None` when the column is absent or the cell empty
    pub identifier: Option<String>,
    pub control_text: String,
    /// Data row in the catalog (1-indexed, header excluded), when read from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl ControlRecord {
    pub fn new(identifier: Option<&str>, control_text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.map(String::from),
            control_text: control_text.into(),
            row: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Identifier for display, with `fallback` standing in for a missing one.
    pub fn identifier_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.identifier.as_deref().unwrap_or(fallback)
    }
}

/// Streaming catalog reader yielding one [`ControlRecord`] per data row.
///
/// The iterator is fused after the first error.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
    path: Option<PathBuf>,
    text_column: String,
    text_idx: Option<usize>,
    id_idx: Option<usize>,
    row: usize,
    failed: bool,
}

impl CatalogReader<File> {
    /// Opens a catalog file.
    pub fn open(path: &Path, text_column: &str) -> CtlmatchResult<Self> {
        let file = File::open(path).with_path(path)?;
        let mut reader = Self::from_reader(file, text_column)
            .map_err(|e| with_catalog_path(e, path))?;
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: Read> CatalogReader<R> {
    /// Wraps any CSV source. Reads the header row immediately.
    pub fn from_reader(source: R, text_column: &str) -> CtlmatchResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|e| CtlmatchError::csv(None, e))?
            .clone();
        let position = |name: &str| headers.iter().position(|h| h == name);

        Ok(Self {
            text_idx: position(text_column),
            id_idx: position(IDENTIFIER_COLUMN),
            reader,
            path: None,
            text_column: text_column.to_string(),
            row: 0,
            failed: false,
        })
    }

    /// Whether the header row contains the configured text column.
    pub fn has_text_column(&self) -> bool {
        self.text_idx.is_some()
    }

    pub fn has_identifier_column(&self) -> bool {
        self.id_idx.is_some()
    }

    fn read_row(&self, record: &csv::StringRecord) -> CtlmatchResult<ControlRecord> {
        let control_text = self
            .text_idx
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| {
                CtlmatchError::missing_field(self.path.clone(), self.row, &self.text_column)
            })?;

        let identifier = self
            .id_idx
            .and_then(|idx| record.get(idx))
            .filter(|id| !id.is_empty());

        Ok(ControlRecord::new(identifier, control_text).with_row(self.row))
    }
}

impl<R: Read> Iterator for CatalogReader<R> {
    type Item = CtlmatchResult<ControlRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut record = csv::StringRecord::new();
        let result = match self.reader.read_record(&mut record) {
            Ok(false) => return None,
            Ok(true) => {
                self.row += 1;
                self.read_row(&record)
            }
            Err(e) => Err(CtlmatchError::csv(self.path.clone(), e)),
        };

        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

fn with_catalog_path(err: CtlmatchError, path: &Path) -> CtlmatchError {
    match err {
        CtlmatchError::Csv { message, line, .. } => CtlmatchError::Csv {
            path: Some(path.to_path_buf()),
            message,
            line,
        },
        other => other,
    }
}

/// Reads a whole catalog file into memory, failing on the first bad row.
pub fn load_catalog(path: &Path, text_column: &str) -> CtlmatchResult<Vec<ControlRecord>> {
    CatalogReader::open(path, text_column)?.collect()
}
