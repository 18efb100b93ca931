#![forbid(unsafe_code)]

pub mod files;
pub mod source;

pub use files::{CsvSource, JsonSource, read_csv_rows, read_json_rows};
pub use source::{InMemorySource, QuestionSource, StorageError, open_source};
