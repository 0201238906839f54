use canteen_core::dataset::{load_dataset, parse_jsonl};
use canteen_core::keyword::KeywordIndex;
use canteen_core::report::dataset_report;
use canteen_core::{LoadError, Point};
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_json_array_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("stalls.json");
    fs::write(
        &file,
        r#"[
            {"Canteen": " Canteen 1 ", "Stall": "Noodles", "Keywords": "Chinese, Noodles", "Price": 4.5, "Location": "10, 20"},
            {"canteen": "Canteen 1", "stall": "Rice", "keywords": "Rice", "price": 3}
        ]"#,
    )
    .unwrap();

    let data = load_dataset(&file).expect("load");
    assert_eq!(data.stalls().len(), 2);
    assert_eq!(data.stalls()[0].canteen, "Canteen 1");
    assert_eq!(data.location_of("Canteen 1"), Some(Point::new(10, 20)));
}

#[test]
fn loads_every_file_in_a_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("a.jsonl"),
        "{\"Canteen\": \"Canteen 2\", \"Stall\": \"Grill\", \"Keywords\": \"Western\", \"Price\": 6, \"Location\": \"5,5\"}\n\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("b.json"),
        r#"{"Canteen": "Canteen 10", "Stall": "Tea", "Keywords": "Drinks", "Price": 1.5, "Location": "9,9"}"#,
    )
    .unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let data = load_dataset(tmp.path()).expect("load dir");
    assert_eq!(data.stalls().len(), 2);
    assert_eq!(data.canteen_names(), vec!["Canteen 2", "Canteen 10"]);
}

#[test]
fn duplicate_stalls_keep_first_row() {
    let data = parse_jsonl(
        r#"{"Canteen": "A1", "Stall": "Same", "Keywords": "Halal", "Price": 2, "Location": "1,1"}
{"Canteen": "A1", "Stall": "Same", "Keywords": "Western", "Price": 9}"#,
    )
    .unwrap();
    assert_eq!(data.stalls().len(), 1);
    assert_eq!(data.stalls()[0].keywords, "Halal");
    assert_eq!(KeywordIndex::build(&data).vocabulary(), &["Halal"]);
}

#[test]
fn duplicate_row_does_not_leave_an_empty_canteen() {
    let data = parse_jsonl(
        r#"{"Canteen": "A1", "Stall": "Same", "Keywords": "Halal", "Price": 2, "Location": "1,1"}
{"Canteen": "B2", "Stall": "Same", "Keywords": "Western", "Price": 9, "Location": "500,500"}"#,
    )
    .unwrap();
    assert_eq!(data.canteen_count(), 1);
    assert_eq!(data.canteen_names(), vec!["A1"]);
    assert_eq!(data.location_of("B2"), None);
    let nearest = canteen_core::nearest::nearest_canteens(&data, Point::new(499, 499), 5);
    assert_eq!(nearest.len(), 1);
    assert_eq!(nearest[0].canteen, "A1");
}

#[test]
fn rejects_stall_without_keywords() {
    let err = parse_jsonl(
        r#"{"Canteen": "A1", "Stall": "Tagged", "Keywords": "Western", "Price": 2, "Location": "1,1"}
{"Canteen": "A1", "Stall": "Untagged", "Keywords": "  ", "Price": 3}"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::MissingKeywords { ref stall } if stall == "Untagged"));

    let err = parse_jsonl(r#"{"Canteen": "A1", "Stall": "Untagged", "Price": 3, "Location": "1,1"}"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
}

#[test]
fn rejects_malformed_location() {
    let err = parse_jsonl(r#"{"Canteen": "A1", "Stall": "S", "Keywords": "K", "Price": 2, "Location": "north"}"#).unwrap_err();
    assert!(matches!(err, LoadError::InvalidLocation { ref value, .. } if value == "north"));
}

#[test]
fn rejects_canteen_without_any_location() {
    let err = parse_jsonl(r#"{"Canteen": "A1", "Stall": "S", "Keywords": "K", "Price": 2}"#).unwrap_err();
    assert!(matches!(err, LoadError::MissingLocation(ref c) if c == "A1"));
}

#[test]
fn rejects_negative_price() {
    let err = parse_jsonl(r#"{"Canteen": "A1", "Stall": "S", "Keywords": "K", "Price": -2, "Location": "1,1"}"#).unwrap_err();
    assert!(matches!(err, LoadError::InvalidPrice { .. }));
}

#[test]
fn missing_path_is_reported() {
    let tmp = TempDir::new().unwrap();
    let err = load_dataset(&tmp.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, LoadError::NoDataset(_)));
}

#[test]
fn report_lists_every_section() {
    let data = parse_jsonl(
        r#"{"Canteen": "Canteen 2", "Stall": "Grill", "Keywords": "Western", "Price": 6, "Location": "5,5"}"#,
    )
    .unwrap();
    let report = dataset_report(&data);
    assert!(report.contains("Keyword Data"));
    assert!(report.contains("Grill (Western)"));
    assert!(report.contains("Grill - S$6.00"));
    assert!(report.contains("Canteen 2 - X: 5, Y: 5"));
}
