mod csv_source;
mod json_source;

pub use csv_source::{CsvSource, read_csv_rows};
pub use json_source::{JsonSource, read_json_rows};
