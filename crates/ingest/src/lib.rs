//! Delimited-text adapters around the clustering engine: loading a dataset,
//! writing per-point results, and generating random datasets for testing.

pub mod csv_export;
pub mod csv_import;
pub mod error;
pub mod generate;

pub use csv_export::CsvExporter;
pub use csv_import::CsvImporter;
pub use error::IngestError;
pub use generate::{DatasetGenerator, DEFAULT_COLUMNS};
