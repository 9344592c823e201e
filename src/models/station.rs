use serde::{Deserialize, Serialize};

use crate::utils::coordinates::is_within_korea_bounds;

/// One charger as read from the source partitions, after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStationRecord {
    pub combined_lat_lon: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub station_name: String,
    pub charger_type: String,
    pub charger_id: String,
    pub facility_major: String,
    pub facility_minor: String,
}

impl RawStationRecord {
    /// Build a record; province and district are always derived from `address`
    pub fn new(combined_lat_lon: String, latitude: f64, longitude: f64, address: String) -> Self {
        let (province, district) = derive_region(&address);

        Self {
            combined_lat_lon,
            latitude,
            longitude,
            address,
            province,
            district,
            station_name: String::new(),
            charger_type: String::new(),
            charger_id: String::new(),
            facility_major: String::new(),
            facility_minor: String::new(),
        }
    }

    pub fn with_station(
        mut self,
        station_name: impl Into<String>,
        charger_type: impl Into<String>,
        charger_id: impl Into<String>,
    ) -> Self {
        self.station_name = station_name.into();
        self.charger_type = charger_type.into();
        self.charger_id = charger_id.into();
        self
    }

    pub fn with_facility(
        mut self,
        facility_major: impl Into<String>,
        facility_minor: impl Into<String>,
    ) -> Self {
        self.facility_major = facility_major.into();
        self.facility_minor = facility_minor.into();
        self
    }

    pub fn is_within_korea_bounds(&self) -> bool {
        is_within_korea_bounds(self.latitude, self.longitude)
    }

    pub fn is_in_province(&self, province: &str) -> bool {
        self.province.as_deref() == Some(province)
    }

    pub fn is_in_region(&self, province: &str, district: &str) -> bool {
        self.is_in_province(province) && self.district.as_deref() == Some(district)
    }
}

/// Province and district are the first two whitespace-separated address tokens
pub fn derive_region(address: &str) -> (Option<String>, Option<String>) {
    let mut tokens = address.split_whitespace();
    let province = tokens.next().map(str::to_string);
    let district = tokens.next().map(str::to_string);
    (province, district)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_derivation() {
        let record = RawStationRecord::new(
            "37.50,127.00".to_string(),
            37.50,
            127.00,
            "서울특별시 서초구 남부순환로 2433".to_string(),
        );

        assert_eq!(record.province.as_deref(), Some("서울특별시"));
        assert_eq!(record.district.as_deref(), Some("서초구"));
        assert!(record.is_within_korea_bounds());
        assert!(record.is_in_region("서울특별시", "서초구"));
        assert!(!record.is_in_region("서울특별시", "강남구"));
    }

    #[test]
    fn test_short_address() {
        assert_eq!(derive_region("세종특별자치시"), (Some("세종특별자치시".to_string()), None));
        assert_eq!(derive_region("   "), (None, None));
    }
}
