//! Storage layer: the CSV backing file.
//!
//! The backing file is the single durable source of truth for the record
//! table. [`CsvStore`] owns all file access: initialization and legacy
//! migration, full loads, appends, and whole-file rewrites.

pub mod csv_file;
pub mod row;

pub use csv_file::CsvStore;
pub use row::CsvRow;
