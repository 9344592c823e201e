use crate::error::Result;
use crate::models::RawStationRecord;
use crate::processors::LoadReport;
use crate::utils::constants::{
    COL_ADDRESS, COL_CHARGER_ID, COL_CHARGER_TYPE, COL_FACILITY_MAJOR, COL_FACILITY_MINOR,
    COL_LAT_LON, COL_STATION_NAME,
};
use crate::utils::coordinates::{is_within_korea_bounds, parse_lat_lon};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;

/// One decoded CSV partition with normalized headers
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
    index: HashMap<String, usize>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            // duplicate headers: first one wins
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trim whitespace and lowercase a header name
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

struct ColumnMap {
    lat_lon: Option<usize>,
    address: Option<usize>,
    station_name: Option<usize>,
    charger_type: Option<usize>,
    charger_id: Option<usize>,
    facility_major: Option<usize>,
    facility_minor: Option<usize>,
}

impl ColumnMap {
    fn for_table(table: &CsvTable) -> Self {
        Self {
            lat_lon: table.column_index(COL_LAT_LON),
            address: table.column_index(COL_ADDRESS),
            station_name: table.column_index(COL_STATION_NAME),
            charger_type: table.column_index(COL_CHARGER_TYPE),
            charger_id: table.column_index(COL_CHARGER_ID),
            facility_major: table.column_index(COL_FACILITY_MAJOR),
            facility_minor: table.column_index(COL_FACILITY_MINOR),
        }
    }
}

fn field(row: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).unwrap_or("")
}

pub struct StationReader {
    normalize_headers: bool,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            normalize_headers: true,
        }
    }

    pub fn with_normalize_headers(normalize_headers: bool) -> Self {
        Self { normalize_headers }
    }

    /// Parse decoded CSV text into a table
    pub fn read_table(&self, text: &str) -> Result<CsvTable> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(|h| {
                if self.normalize_headers {
                    normalize_header(h)
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }

        Ok(CsvTable::new(headers, rows))
    }

    /// Turn table rows into station records, dropping unparseable and out-of-bounds rows
    pub fn parse_records(&self, table: &CsvTable, report: &mut LoadReport) -> Vec<RawStationRecord> {
        let columns = ColumnMap::for_table(table);
        let mut records = Vec::with_capacity(table.len());

        for row in &table.rows {
            report.total_rows += 1;

            if let Some(record) = self.parse_row(row, &columns, report) {
                records.push(record);
            }
        }

        records
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        columns: &ColumnMap,
        report: &mut LoadReport,
    ) -> Option<RawStationRecord> {
        let combined = field(row, columns.lat_lon);

        let (latitude, longitude) = match parse_lat_lon(combined) {
            Ok(coords) => coords,
            Err(_) => {
                report.coordinate_parse_failures += 1;
                return None;
            }
        };

        if !is_within_korea_bounds(latitude, longitude) {
            report.out_of_bounds += 1;
            return None;
        }

        let record = RawStationRecord::new(
            combined.to_string(),
            latitude,
            longitude,
            field(row, columns.address).to_string(),
        )
        .with_station(
            field(row, columns.station_name).trim(),
            field(row, columns.charger_type).trim(),
            field(row, columns.charger_id).trim(),
        )
        .with_facility(
            field(row, columns.facility_major).trim(),
            field(row, columns.facility_minor).trim(),
        );

        if record.district.is_none() {
            report.incomplete_addresses += 1;
        }
        report.retained += 1;

        Some(record)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
충전소명 ,충전기ID,충전기타입,주소,위도경도,시설구분(대),시설구분(소)
세화고,01,DC콤보,서울특별시 서초구 남부순환로 2433,\"37.50,127.00\",교육문화시설,학교
먼바다,02,AC완속,어딘가 먼곳,\"91.0,200.0\",기타,기타
좌표없음,03,AC완속,서울특별시 강남구 테헤란로,,기타,기타
";

    #[test]
    fn test_headers_are_normalized() {
        let table = StationReader::new().read_table(SAMPLE).unwrap();

        assert_eq!(table.headers[0], "충전소명");
        assert_eq!(table.headers[1], "충전기id");
        assert!(table.has_column(COL_LAT_LON));
        assert!(table.has_column(COL_CHARGER_ID));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_headers_untouched_when_disabled() {
        let table = StationReader::with_normalize_headers(false)
            .read_table(SAMPLE)
            .unwrap();
        assert_eq!(table.headers[0], "충전소명 ");
        assert!(!table.has_column(COL_CHARGER_ID));
    }

    #[test]
    fn test_parse_records() {
        let reader = StationReader::new();
        let table = reader.read_table(SAMPLE).unwrap();
        let mut report = LoadReport::default();
        let records = reader.parse_records(&table, &mut report);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.province.as_deref(), Some("서울특별시"));
        assert_eq!(record.district.as_deref(), Some("서초구"));
        assert!((record.latitude - 37.50).abs() < 0.000001);
        assert!((record.longitude - 127.00).abs() < 0.000001);
        assert_eq!(record.station_name, "세화고");
        assert_eq!(record.charger_id, "01");
        assert_eq!(record.facility_minor, "학교");

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.out_of_bounds, 1);
        assert_eq!(report.coordinate_parse_failures, 1);
        assert_eq!(report.retained, 1);
    }
}
