use crate::error::{LocatorError, Result};
use crate::utils::constants::{KR_MAX_LAT, KR_MAX_LON, KR_MIN_LAT, KR_MIN_LON};

/// Parse a single decimal coordinate, tolerating surrounding whitespace
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();
    let value = trimmed.parse::<f64>().map_err(|_| {
        LocatorError::CoordinateParse(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    if !value.is_finite() {
        return Err(LocatorError::CoordinateParse(format!(
            "Non-finite coordinate value: '{}'",
            coord_str
        )));
    }

    Ok(value)
}

/// Split a combined "lat,lon" field into its two numeric parts
///
/// # Examples
/// ```
/// use ev_station_locator::utils::coordinates::parse_lat_lon;
///
/// let (lat, lon) = parse_lat_lon("37.50,127.00").unwrap();
/// assert!((lat - 37.50).abs() < 1e-9);
/// assert!((lon - 127.00).abs() < 1e-9);
/// ```
pub fn parse_lat_lon(combined: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = combined.split(',').collect();

    if parts.len() != 2 {
        return Err(LocatorError::CoordinateParse(format!(
            "Invalid lat/lon format: '{}'. Expected format: 'LAT,LON'",
            combined
        )));
    }

    let latitude = parse_coordinate(parts[0])?;
    let longitude = parse_coordinate(parts[1])?;

    Ok((latitude, longitude))
}

/// Check the continental Korea bounding box (all bounds exclusive)
pub fn is_within_korea_bounds(latitude: f64, longitude: f64) -> bool {
    latitude > KR_MIN_LAT && latitude < KR_MAX_LAT && longitude > KR_MIN_LON && longitude < KR_MAX_LON
}

/// Calculate the distance between two points using the Haversine formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of a set of points, `None` when there are no points
pub fn mean_center<I>(points: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut count = 0usize;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;

    for (lat, lon) in points {
        count += 1;
        lat_sum += lat;
        lon_sum += lon;
    }

    if count == 0 {
        None
    } else {
        Some((lat_sum / count as f64, lon_sum / count as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lat_lon() {
        let (lat, lon) = parse_lat_lon("37.50,127.00").unwrap();
        assert!((lat - 37.50).abs() < 0.000001);
        assert!((lon - 127.00).abs() < 0.000001);

        let (lat, lon) = parse_lat_lon(" 35.1796 , 129.0756 ").unwrap();
        assert!((lat - 35.1796).abs() < 0.000001);
        assert!((lon - 129.0756).abs() < 0.000001);
    }

    #[test]
    fn test_invalid_lat_lon() {
        assert!(parse_lat_lon("37.50").is_err());
        assert!(parse_lat_lon("37.50,127.00,1").is_err());
        assert!(parse_lat_lon("abc,127.00").is_err());
        assert!(parse_lat_lon(",").is_err());
        assert!(parse_lat_lon("NaN,127.0").is_err());
    }

    #[test]
    fn test_korea_bounds() {
        assert!(is_within_korea_bounds(37.5665, 126.9780)); // Seoul
        assert!(is_within_korea_bounds(33.4996, 126.5312)); // Jeju
        assert!(!is_within_korea_bounds(91.0, 200.0));
        assert!(!is_within_korea_bounds(33.0, 127.0)); // Edge is exclusive
        assert!(!is_within_korea_bounds(37.0, 132.0));
    }

    #[test]
    fn test_haversine_distance() {
        // Seoul to Busan
        let distance = haversine_distance(37.5665, 126.9780, 35.1796, 129.0756);
        assert!((distance - 325.0).abs() < 10.0);
    }

    #[test]
    fn test_mean_center() {
        let center = mean_center(vec![(37.0, 127.0), (38.0, 128.0)]).unwrap();
        assert!((center.0 - 37.5).abs() < 0.000001);
        assert!((center.1 - 127.5).abs() < 0.000001);
        assert!(mean_center(Vec::new()).is_none());
    }
}
