use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use quiz_core::model::QuestionDraft;

use crate::source::{QuestionSource, StorageError};

/// Question bank stored as a JSON array of row objects.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for JsonSource {
    fn load_rows(&self) -> Result<Vec<QuestionDraft>, StorageError> {
        let file = File::open(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows = read_json_rows(BufReader::new(file))?;
        debug!(path = %self.path.display(), rows = rows.len(), "read json question rows");
        Ok(rows)
    }
}

/// Decode a JSON array of rows from any reader.
///
/// # Errors
///
/// Returns `StorageError::Json` if the input is not an array of row objects.
pub fn read_json_rows<R: Read>(reader: R) -> Result<Vec<QuestionDraft>, StorageError> {
    Ok(serde_json::from_reader(reader)?)
}
