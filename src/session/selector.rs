use crate::error::{LocatorError, Result};
use crate::models::RawStationRecord;
use crate::processors::{filter_by_region, filter_within_radius, province_centroid};
use crate::readers::Dataset;
use crate::session::SessionStore;
use crate::utils::constants::{PLACEHOLDER_OPTION, SESSION_DISTRICT_KEY, SESSION_PROVINCE_KEY};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    NoProvinceSelected,
    ProvinceSelected { province: String },
    DistrictSelected { province: String, district: String },
}

impl SelectionState {
    pub fn province(&self) -> Option<&str> {
        match self {
            SelectionState::NoProvinceSelected => None,
            SelectionState::ProvinceSelected { province }
            | SelectionState::DistrictSelected { province, .. } => Some(province.as_str()),
        }
    }

    pub fn district(&self) -> Option<&str> {
        match self {
            SelectionState::DistrictSelected { district, .. } => Some(district.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionState::NoProvinceSelected => write!(f, "시/도 미선택"),
            SelectionState::ProvinceSelected { province } => write!(f, "{} (구/군 미선택)", province),
            SelectionState::DistrictSelected { province, district } => {
                write!(f, "{} {}", province, district)
            }
        }
    }
}

/// How the rendered rows are chosen once a region is selected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMode {
    /// Explicit province then district
    District,
    /// Fixed radius around the chosen province's centroid
    Radius { radius_km: f64 },
}

/// Cascading province/district selection over a session store
#[derive(Debug, Clone, Default)]
pub struct RegionSelector;

impl RegionSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn is_placeholder(choice: &str) -> bool {
        let choice = choice.trim();
        choice.is_empty() || choice == PLACEHOLDER_OPTION
    }

    pub fn state(&self, session: &SessionStore) -> SelectionState {
        match (
            session.get(SESSION_PROVINCE_KEY),
            session.get(SESSION_DISTRICT_KEY),
        ) {
            (Some(province), Some(district)) => SelectionState::DistrictSelected {
                province: province.to_string(),
                district: district.to_string(),
            },
            (Some(province), None) => SelectionState::ProvinceSelected {
                province: province.to_string(),
            },
            (None, _) => SelectionState::NoProvinceSelected,
        }
    }

    /// Placeholder followed by the sorted provinces
    pub fn province_options(&self, dataset: &Dataset) -> Vec<String> {
        std::iter::once(PLACEHOLDER_OPTION.to_string())
            .chain(dataset.provinces())
            .collect()
    }

    /// Placeholder followed by the sorted districts of the selected province
    pub fn district_options(&self, dataset: &Dataset, session: &SessionStore) -> Vec<String> {
        let districts = match session.get(SESSION_PROVINCE_KEY) {
            Some(province) => dataset.districts(province),
            None => Vec::new(),
        };

        std::iter::once(PLACEHOLDER_OPTION.to_string())
            .chain(districts)
            .collect()
    }

    pub fn select_province(
        &self,
        dataset: &Dataset,
        session: &mut SessionStore,
        choice: &str,
    ) -> Result<SelectionState> {
        if Self::is_placeholder(choice) {
            self.reset(session);
            return Ok(self.state(session));
        }

        let choice = choice.trim();
        if !dataset.provinces().iter().any(|p| p == choice) {
            return Err(LocatorError::InvalidSelection {
                kind: "province",
                value: choice.to_string(),
            });
        }

        if session.get(SESSION_PROVINCE_KEY) != Some(choice) {
            debug!("Province changed to {}, district reset", choice);
            session.set(SESSION_PROVINCE_KEY, choice);
            session.remove(SESSION_DISTRICT_KEY);
        }

        Ok(self.state(session))
    }

    pub fn select_district(
        &self,
        dataset: &Dataset,
        session: &mut SessionStore,
        choice: &str,
    ) -> Result<SelectionState> {
        let province = match session.get(SESSION_PROVINCE_KEY) {
            Some(province) => province.to_string(),
            None => return Err(LocatorError::EmptySelection),
        };

        if Self::is_placeholder(choice) {
            session.remove(SESSION_DISTRICT_KEY);
            return Ok(self.state(session));
        }

        let choice = choice.trim();
        if !dataset.districts(&province).iter().any(|d| d == choice) {
            return Err(LocatorError::InvalidSelection {
                kind: "district",
                value: choice.to_string(),
            });
        }

        session.set(SESSION_DISTRICT_KEY, choice);
        Ok(self.state(session))
    }

    pub fn reset(&self, session: &mut SessionStore) {
        session.remove(SESSION_PROVINCE_KEY);
        session.remove(SESSION_DISTRICT_KEY);
    }

    /// Rows to render for the current selection
    pub fn selected_records<'a>(
        &self,
        dataset: &'a Dataset,
        session: &SessionStore,
        mode: SelectionMode,
    ) -> Result<Vec<&'a RawStationRecord>> {
        match (self.state(session), mode) {
            (SelectionState::DistrictSelected { province, district }, SelectionMode::District) => {
                Ok(filter_by_region(&dataset.records, &province, &district))
            }
            (SelectionState::NoProvinceSelected, _) => Err(LocatorError::EmptySelection),
            (_, SelectionMode::District) => Err(LocatorError::EmptySelection),
            (state, SelectionMode::Radius { radius_km }) => {
                let province = state.province().unwrap_or_default();
                match province_centroid(&dataset.records, province) {
                    Some(center) => Ok(filter_within_radius(&dataset.records, center, radius_km)),
                    None => Ok(Vec::new()),
                }
            }
        }
    }
}
