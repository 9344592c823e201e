/// Default CSV partitions
pub const DEFAULT_URL1: &str =
    "https://raw.githubusercontent.com/ZackWoo05/Sehwa/main/chargerinfo_part1.csv";
pub const DEFAULT_URL2: &str =
    "https://raw.githubusercontent.com/ZackWoo05/Sehwa/main/chargerinfo_part2.csv";

/// Normalized column names (trimmed, lowercased)
pub const COL_LAT_LON: &str = "위도경도";
pub const COL_ADDRESS: &str = "주소";
pub const COL_STATION_NAME: &str = "충전소명";
pub const COL_CHARGER_TYPE: &str = "충전기타입";
pub const COL_CHARGER_ID: &str = "충전기id";
pub const COL_FACILITY_MAJOR: &str = "시설구분(대)";
pub const COL_FACILITY_MINOR: &str = "시설구분(소)";

/// Columns that must all be present before stations are grouped
pub const GROUPING_COLUMNS: [&str; 6] = [
    COL_CHARGER_TYPE,
    COL_CHARGER_ID,
    COL_STATION_NAME,
    COL_ADDRESS,
    COL_FACILITY_MAJOR,
    COL_FACILITY_MINOR,
];

/// Continental Korea geographic bounds (exclusive)
pub const KR_MIN_LAT: f64 = 33.0;
pub const KR_MAX_LAT: f64 = 39.0;
pub const KR_MIN_LON: f64 = 124.0;
pub const KR_MAX_LON: f64 = 132.0;

/// Map defaults (Sehwa High School, Seoul)
pub const FALLBACK_CENTER_LAT: f64 = 37.5009;
pub const FALLBACK_CENTER_LON: f64 = 126.9872;
pub const DEFAULT_ZOOM: u8 = 13;

/// Selection defaults
pub const PLACEHOLDER_OPTION: &str = "선택 안 함";
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Cache and network defaults
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Session keys
pub const SESSION_PROVINCE_KEY: &str = "selected_province";
pub const SESSION_DISTRICT_KEY: &str = "selected_district";

/// Config file looked up in the working directory when no --config is given
pub const DEFAULT_CONFIG_FILE: &str = "ev-station-locator.toml";
pub const ENV_PREFIX: &str = "EV_LOCATOR";
