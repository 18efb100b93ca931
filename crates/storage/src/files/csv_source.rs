use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use quiz_core::model::QuestionDraft;

use crate::source::{QuestionSource, StorageError};

/// Question bank stored as a header-row CSV file.
///
/// Expected columns: optional `id`, `question`, `option_a`..`option_d`,
/// `correct_option`. Unknown columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for CsvSource {
    fn load_rows(&self) -> Result<Vec<QuestionDraft>, StorageError> {
        let file = File::open(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows = read_csv_rows(file)?;
        debug!(path = %self.path.display(), rows = rows.len(), "read csv question rows");
        Ok(rows)
    }
}

/// Decode CSV rows from any reader.
///
/// Short rows are accepted here so that missing cells surface as validation
/// errors naming the field.
///
/// # Errors
///
/// Returns `StorageError::Csv` on malformed CSV or a non-numeric `id`.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<QuestionDraft>, StorageError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.deserialize::<QuestionDraft>() {
        rows.push(record?);
    }
    Ok(rows)
}
