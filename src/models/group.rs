use serde::{Deserialize, Serialize};

/// Chargers sharing location, station name and address; one map marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationGroup {
    pub latitude: f64,
    pub longitude: f64,
    pub station_name: String,
    pub address: String,
    /// Sorted, de-duplicated, comma-joined charger types
    pub charger_types: String,
    pub facility_major: String,
    pub facility_minor: String,
    pub charger_count: usize,
}

impl StationGroup {
    pub fn charger_type_list(&self) -> Vec<&str> {
        if self.charger_types.is_empty() {
            return Vec::new();
        }
        self.charger_types.split(", ").collect()
    }
}
