use crate::models::RawStationRecord;
use crate::utils::coordinates::{haversine_distance, mean_center};

pub fn filter_by_province<'a>(
    records: &'a [RawStationRecord],
    province: &str,
) -> Vec<&'a RawStationRecord> {
    records.iter().filter(|r| r.is_in_province(province)).collect()
}

/// Rows whose derived province and district both match
pub fn filter_by_region<'a>(
    records: &'a [RawStationRecord],
    province: &str,
    district: &str,
) -> Vec<&'a RawStationRecord> {
    records
        .iter()
        .filter(|r| r.is_in_region(province, district))
        .collect()
}

/// Mean position of a province's chargers
pub fn province_centroid(records: &[RawStationRecord], province: &str) -> Option<(f64, f64)> {
    mean_center(
        records
            .iter()
            .filter(|r| r.is_in_province(province))
            .map(|r| (r.latitude, r.longitude)),
    )
}

/// Rows within `radius_km` (inclusive) of `center`
pub fn filter_within_radius(
    records: &[RawStationRecord],
    center: (f64, f64),
    radius_km: f64,
) -> Vec<&RawStationRecord> {
    records
        .iter()
        .filter(|r| haversine_distance(center.0, center.1, r.latitude, r.longitude) <= radius_km)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charger(address: &str, lat: f64, lon: f64) -> RawStationRecord {
        RawStationRecord::new(format!("{},{}", lat, lon), lat, lon, address.to_string())
    }

    fn records() -> Vec<RawStationRecord> {
        vec![
            charger("서울특별시 서초구 반포대로 58", 37.4837, 127.0324),
            charger("서울특별시 강남구 테헤란로 152", 37.5000, 127.0364),
            charger("서울특별시 서초구 남부순환로 2433", 37.4860, 127.0090),
            charger("부산광역시 해운대구 우동", 35.1631, 129.1635),
        ]
    }

    #[test]
    fn test_filter_by_region() {
        let records = records();
        let selected = filter_by_region(&records, "서울특별시", "서초구");

        assert_eq!(selected.len(), 2);
        assert!(selected
            .iter()
            .all(|r| r.province.as_deref() == Some("서울특별시")
                && r.district.as_deref() == Some("서초구")));
        assert_eq!(filter_by_province(&records, "서울특별시").len(), 3);
        assert!(filter_by_region(&records, "부산광역시", "서초구").is_empty());
    }

    #[test]
    fn test_radius_around_province_centroid() {
        let records = records();
        let center = province_centroid(&records, "서울특별시").unwrap();

        assert!((center.0 - 37.4899).abs() < 0.001);

        let nearby = filter_within_radius(&records, center, 5.0);
        assert_eq!(nearby.len(), 3);
        assert!(nearby.iter().all(|r| r.is_in_province("서울특별시")));

        assert!(province_centroid(&records, "제주특별자치도").is_none());
    }
}
