pub mod loader;
pub mod source;
pub mod station_reader;

pub use loader::{load_combined_data, Dataset, StationLoader};
pub use source::{decode_csv_bytes, AutoSource, CsvSource, FileSource, HttpSource};
pub use station_reader::{normalize_header, CsvTable, StationReader};
