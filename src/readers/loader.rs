use crate::error::{LocatorError, Result};
use crate::models::RawStationRecord;
use crate::processors::LoadReport;
use crate::readers::source::{decode_csv_bytes, CsvSource};
use crate::readers::station_reader::{CsvTable, StationReader};
use crate::utils::constants::{COL_ADDRESS, COL_LAT_LON};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// The combined, cleaned charger rows of both partitions
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<RawStationRecord>,
    pub columns: BTreeSet<String>,
    pub report: LoadReport,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Fail with the first column in `required` that the sources did not provide
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(LocatorError::MissingColumn {
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Sorted distinct provinces
    pub fn provinces(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.province.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct districts of one province
    pub fn districts(&self, province: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.is_in_province(province))
            .filter_map(|r| r.district.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

pub struct StationLoader<S: CsvSource> {
    source: S,
    reader: StationReader,
}

impl<S: CsvSource> StationLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            reader: StationReader::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn read_partition(&self, location: &str) -> Result<CsvTable> {
        let bytes = self.source.fetch(location)?;
        let text = decode_csv_bytes(location, &bytes);
        let table = self.reader.read_table(&text)?;
        debug!(
            "Partition {}: {} rows, {} columns",
            location,
            table.len(),
            table.headers.len()
        );
        Ok(table)
    }

    /// Load both partitions, url1 rows first, and clean them
    pub fn load_combined_data(&self, url1: &str, url2: &str) -> Result<Dataset> {
        let tables = [self.read_partition(url1)?, self.read_partition(url2)?];

        let columns: BTreeSet<String> = tables
            .iter()
            .flat_map(|t| t.headers.iter().cloned())
            .collect();

        for required in [COL_LAT_LON, COL_ADDRESS] {
            if !columns.contains(required) {
                warn!("Required column '{}' is missing from both partitions", required);
                return Err(LocatorError::MissingColumn {
                    column: required.to_string(),
                });
            }
        }

        let mut report = LoadReport::default();
        let mut records = Vec::new();
        for table in &tables {
            report.partition_rows.push(table.len());
            records.extend(self.reader.parse_records(table, &mut report));
        }

        info!(
            "Loaded {} charger rows ({} unparseable, {} outside bounds)",
            report.retained, report.coordinate_parse_failures, report.out_of_bounds
        );

        Ok(Dataset {
            records,
            columns,
            report,
        })
    }
}

/// Load both partitions through `source` with default reader settings
pub fn load_combined_data<S: CsvSource>(source: S, url1: &str, url2: &str) -> Result<Dataset> {
    StationLoader::new(source).load_combined_data(url1, url2)
}
