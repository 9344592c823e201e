use serde::{Deserialize, Serialize};

use crate::models::StationGroup;
use crate::utils::coordinates::mean_center;

/// Popup contents of a single marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPopup {
    pub station_name: String,
    pub address: String,
    pub charger_types: String,
    pub charger_count: usize,
    pub facility_major: String,
    pub facility_minor: String,
}

impl MarkerPopup {
    pub fn to_text(&self) -> String {
        format!(
            "{}\n주소: {}\n충전기 타입: {}\n충전기 수: {}대\n시설: {} - {}",
            self.station_name,
            self.address,
            self.charger_types,
            self.charger_count,
            self.facility_major,
            self.facility_minor
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub tooltip: String,
    pub popup: MarkerPopup,
}

impl From<&StationGroup> for MapMarker {
    fn from(group: &StationGroup) -> Self {
        Self {
            latitude: group.latitude,
            longitude: group.longitude,
            tooltip: group.station_name.clone(),
            popup: MarkerPopup {
                station_name: group.station_name.clone(),
                address: group.address.clone(),
                charger_types: group.charger_types.clone(),
                charger_count: group.charger_count,
                facility_major: group.facility_major.clone(),
                facility_minor: group.facility_minor.clone(),
            },
        }
    }
}

/// Everything a cluster-map renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Center on the mean marker position, or on `fallback_center` when empty
    pub fn from_groups(groups: &[StationGroup], fallback_center: (f64, f64), zoom: u8) -> Self {
        let center = mean_center(groups.iter().map(|g| (g.latitude, g.longitude)))
            .unwrap_or(fallback_center);

        Self {
            center,
            zoom,
            markers: groups.iter().map(MapMarker::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn total_chargers(&self) -> usize {
        self.markers.iter().map(|m| m.popup.charger_count).sum()
    }
}
