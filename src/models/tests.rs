use crate::models::paste::*;
use std::collections::HashMap;

fn sample_record() -> PasteRecord {
    let mut files = HashMap::new();
    files.insert("config.yml".to_string(), "key: value".to_string());
    files.insert("latest.log".to_string(), "booted".to_string());
    PasteRecord::new(
        "plotsquared".to_string(),
        files,
        vec!["config.yml".to_string(), "latest.log".to_string()],
    )
}

#[test]
fn serialized_record_omits_id() {
    let record = sample_record();
    let raw = serde_json::to_string(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("id").is_none());
    assert!(value.get("files").is_some());
    assert!(value["timestamp"].is_i64());
}

#[test]
fn roundtrip_preserves_file_order() {
    let record = sample_record();
    let raw = serde_json::to_string(&record).unwrap();
    let parsed: PasteRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        parsed.file_names,
        vec!["config.yml".to_string(), "latest.log".to_string()]
    );
    assert_eq!(parsed.files.len(), 2);
    assert_eq!(parsed.files["config.yml"], "key: value");
    assert_eq!(parsed.application_id, "plotsquared");
}

#[test]
fn timestamp_accepts_number_string_and_absence() {
    let numeric: PasteRecord =
        serde_json::from_str(r#"{"files":{},"file_names":[],"timestamp":1500000000000}"#).unwrap();
    assert_eq!(numeric.timestamp.display(), "1500000000000");

    let text: PasteRecord =
        serde_json::from_str(r#"{"files":{},"file_names":[],"created":"2019-01-01"}"#).unwrap();
    assert_eq!(text.timestamp.display(), "2019-01-01");

    let absent: PasteRecord = serde_json::from_str(r#"{"files":{},"file_names":[]}"#).unwrap();
    assert_eq!(absent.timestamp.display(), "");
}

#[test]
fn generated_ids_are_lowercase_hex() {
    let id = generate_paste_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    assert_ne!(id, generate_paste_id());
}

#[test]
fn application_allow_list_is_case_insensitive() {
    assert!(is_valid_application("plotsquared"));
    assert!(is_valid_application("PlotSquared"));
    assert!(is_valid_application("KVANTUM"));
    assert!(!is_valid_application("unknown"));
    assert!(!is_valid_application(""));
}
