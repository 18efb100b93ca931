use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use quiz_core::model::{LoadError, QuestionDraft, QuestionStore};

use crate::files::{CsvSource, JsonSource};

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported question file {0}: expected .csv or .json")]
    UnsupportedFormat(PathBuf),

    #[error("invalid question data: {0}")]
    Load(#[from] LoadError),
}

/// Something that yields raw question rows once per session.
pub trait QuestionSource {
    /// Read every row, in input order, without validating it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the input cannot be read or decoded.
    fn load_rows(&self) -> Result<Vec<QuestionDraft>, StorageError>;

    /// Read and validate all rows into a `QuestionStore`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Load` if any row is malformed; no partial store is produced.
    fn load_store(&self) -> Result<QuestionStore, StorageError> {
        let rows = self.load_rows()?;
        let store = QuestionStore::load(rows)?;
        debug!(questions = store.len(), "question store loaded");
        Ok(store)
    }
}

/// In-memory rows, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<QuestionDraft>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(rows: Vec<QuestionDraft>) -> Self {
        Self { rows }
    }
}

impl QuestionSource for InMemorySource {
    fn load_rows(&self) -> Result<Vec<QuestionDraft>, StorageError> {
        Ok(self.rows.clone())
    }
}

/// Pick a file source by extension (`.csv` or `.json`, any case).
///
/// # Errors
///
/// Returns `StorageError::UnsupportedFormat` for any other extension.
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn QuestionSource + Send + Sync>, StorageError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        _ => Err(StorageError::UnsupportedFormat(path.to_path_buf())),
    }
}
