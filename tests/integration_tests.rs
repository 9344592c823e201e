use ev_station_locator::config::Settings;
use ev_station_locator::error::LocatorError;
use ev_station_locator::models::MapView;
use ev_station_locator::processors::aggregate;
use ev_station_locator::readers::{load_combined_data, FileSource};
use ev_station_locator::session::{RegionSelector, SelectionMode, SessionStore};
use ev_station_locator::utils::constants::PLACEHOLDER_OPTION;
use ev_station_locator::writers::JsonWriter;
use ev_station_locator::Locator;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = " 충전소명 , 충전기ID ,충전기타입,주소,위도경도,시설구분(대),시설구분(소)";

fn write_partition(dir: &Path, name: &str, rows: &[&str]) -> String {
    let mut body = String::from(HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write partition");
    path.to_string_lossy().to_string()
}

fn fixture(dir: &Path) -> (String, String) {
    let part1 = write_partition(
        dir,
        "chargerinfo_part1.csv",
        &[
            "세화고,01,DC콤보,서울특별시 서초구 남부순환로 2433,\"37.50,127.00\",교육문화시설,학교",
            "세화고,02,AC완속,서울특별시 서초구 남부순환로 2433,\"37.50,127.00\",교육문화시설,학교",
            "세화고,03,DC콤보,서울특별시 서초구 남부순환로 2433,\"37.50,127.00\",교육문화시설,학교",
            "코엑스,04,AC완속,서울특별시 강남구 영동대로 513,\"37.51,127.06\",상업시설,쇼핑몰",
            "바다위,05,AC완속,서울특별시 서초구 어딘가,\"91.0,200.0\",기타,기타",
        ],
    );
    let part2 = write_partition(
        dir,
        "chargerinfo_part2.csv",
        &[
            "양재역,06,DC차데모,서울특별시 서초구 강남대로 262,\"37.48,127.03\",공공시설,주차장",
            "해운대,07,DC콤보,부산광역시 해운대구 우동,\"35.16,129.16\",휴게시설,휴게소",
            "좌표오류,08,AC완속,부산광역시 해운대구 중동,\"abc,def\",기타,기타",
        ],
    );
    (part1, part2)
}

#[test]
fn test_load_combined_data_from_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (part1, part2) = fixture(temp_dir.path());

    let dataset = load_combined_data(FileSource, &part1, &part2).unwrap();

    // 8 rows, one outside the bounding box, one unparseable
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.report.total_rows, 8);
    assert_eq!(dataset.report.out_of_bounds, 1);
    assert_eq!(dataset.report.coordinate_parse_failures, 1);
    assert!(dataset.records.iter().all(|r| r.latitude > 33.0
        && r.latitude < 39.0
        && r.longitude > 124.0
        && r.longitude < 132.0));

    // url1 rows first
    assert_eq!(dataset.records[0].station_name, "세화고");
    assert_eq!(dataset.records[4].station_name, "양재역");

    let first = &dataset.records[0];
    assert_eq!(first.province.as_deref(), Some("서울특별시"));
    assert_eq!(first.district.as_deref(), Some("서초구"));
    assert_eq!(first.charger_id, "01");
}

#[test]
fn test_missing_address_column_yields_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("no_address.csv");
    std::fs::write(&path, "충전소명,위도경도\n세화고,\"37.50,127.00\"\n").unwrap();
    let path = path.to_string_lossy().to_string();

    let result = load_combined_data(FileSource, &path, &path);
    assert!(matches!(result, Err(LocatorError::MissingColumn { .. })));
}

#[test]
fn test_region_selection_and_aggregation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (part1, part2) = fixture(temp_dir.path());
    let dataset = load_combined_data(FileSource, &part1, &part2).unwrap();

    let selector = RegionSelector::new();
    let mut session = SessionStore::new();

    assert_eq!(
        selector.province_options(&dataset),
        vec![PLACEHOLDER_OPTION, "부산광역시", "서울특별시"]
    );

    selector
        .select_province(&dataset, &mut session, "서울특별시")
        .unwrap();
    selector
        .select_district(&dataset, &mut session, "서초구")
        .unwrap();

    let records = selector
        .selected_records(&dataset, &session, SelectionMode::District)
        .unwrap();
    let expected = dataset
        .records
        .iter()
        .filter(|r| r.province.as_deref() == Some("서울특별시") && r.district.as_deref() == Some("서초구"))
        .count();
    assert_eq!(records.len(), expected);

    let groups = aggregate(records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].station_name, "세화고");
    assert_eq!(groups[0].charger_types, "AC완속, DC콤보");
    assert_eq!(groups[0].charger_count, 3);
    assert_eq!(groups[1].station_name, "양재역");

    selector
        .select_province(&dataset, &mut session, "부산광역시")
        .unwrap();
    assert_eq!(
        selector.selected_records(&dataset, &session, SelectionMode::District).err().map(|e| e.is_benign()),
        Some(true)
    );
}

#[test]
fn test_locator_end_to_end_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (part1, part2) = fixture(temp_dir.path());

    let settings = Settings::default()
        .with_overrides(Some(part1), Some(part2), None)
        .unwrap();
    let mut locator = Locator::new(settings, FileSource);
    let (dataset, error) = locator.dataset();
    assert!(error.is_none());

    let mut session = SessionStore::new();
    let selector = locator.selector().clone();
    selector
        .select_province(&dataset, &mut session, "서울특별시")
        .unwrap();

    let render = locator
        .render(
            &dataset,
            &session,
            SelectionMode::Radius { radius_km: 10.0 },
        )
        .unwrap();
    assert_eq!(render.groups.len(), 3);

    let output_path = temp_dir.path().join("output").join("map.json");
    JsonWriter::new().write_view(&render.view, &output_path).unwrap();
    assert!(output_path.exists());

    let restored: MapView =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(restored.markers.len(), render.view.markers.len());
    assert_eq!(restored.markers[0].tooltip, "세화고");
    assert!((restored.center.0 - render.view.center.0).abs() < 1e-9);
    assert_eq!(restored.total_chargers(), 5);
}

#[test]
fn test_unreachable_source_degrades_to_empty() {
    let settings = Settings::default()
        .with_overrides(
            Some("/no/such/part1.csv".to_string()),
            Some("/no/such/part2.csv".to_string()),
            None,
        )
        .unwrap();
    let mut locator = Locator::new(settings, FileSource);

    let (dataset, error) = locator.dataset();
    assert!(dataset.is_empty());
    assert!(matches!(error, Some(LocatorError::Io(_))));
    assert_eq!(
        RegionSelector::new().province_options(&dataset),
        vec![PLACEHOLDER_OPTION]
    );
}
