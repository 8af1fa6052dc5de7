use crate::config::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn write_records(contents: &str) -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, contents).unwrap();
    temp_file
}

#[test]
fn test_config_from_lookup_defaults() {
    let config = SyncConfig::from_lookup(lookup(&[
        (API_TOKEN_VAR, "test_token"),
        (ZONE_ID_VAR, "zone123"),
    ]))
    .unwrap();

    assert_eq!(config.api_token, "test_token");
    assert_eq!(config.zone_id, "zone123");
    assert_eq!(config.api_base, "https://api.cloudflare.com/client/v4");
    assert_eq!(config.records_path, Path::new("records.yaml"));
    assert_eq!(config.ns_target, "ns1.yandexcloud.kz");
    assert_eq!(config.ttl, 3600);
    assert_eq!(config.comment, "proxied to yandex dns");
}

#[test]
fn test_config_overrides() {
    let config = SyncConfig::from_lookup(lookup(&[
        (API_TOKEN_VAR, "test_token"),
        (ZONE_ID_VAR, "zone123"),
        (API_BASE_VAR, "http://localhost:8080"),
        (RECORDS_FILE_VAR, "/etc/nssync/records.yaml"),
    ]))
    .unwrap();

    assert_eq!(config.api_base, "http://localhost:8080");
    assert_eq!(config.records_path, Path::new("/etc/nssync/records.yaml"));
}

#[test]
fn test_missing_token_is_fatal() {
    let err = SyncConfig::from_lookup(lookup(&[(ZONE_ID_VAR, "zone123")])).unwrap_err();
    assert!(err
        .to_string()
        .contains("CLOUDFLARE_API_TOKEN and ZONE_ID must be set"));
}

#[test]
fn test_missing_zone_is_fatal() {
    let result = SyncConfig::from_lookup(lookup(&[(API_TOKEN_VAR, "test_token")]));
    assert!(result.is_err());
}

#[test]
fn test_empty_values_count_as_missing() {
    let result = SyncConfig::from_lookup(lookup(&[
        (API_TOKEN_VAR, ""),
        (ZONE_ID_VAR, "zone123"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_load_records() {
    let file = write_records(
        r#"
records:
  - name: "www"
  - name: "api.example.com"
"#,
    );

    let records = load_records(file.path()).unwrap();
    let names: Vec<&str> = records.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["www", "api.example.com"]);
}

#[test]
fn test_missing_records_key_is_empty() {
    let file = write_records("other: 1\n");
    assert!(load_records(file.path()).unwrap().records.is_empty());
}

#[test]
fn test_empty_file_is_empty() {
    let file = write_records("");
    assert!(load_records(file.path()).unwrap().records.is_empty());
}

#[test]
fn test_empty_record_name_is_rejected() {
    let file = write_records("records:\n  - name: \"\"\n");
    assert!(load_records(file.path()).is_err());
}

#[test]
fn test_invalid_records_file() {
    let file = write_records("records:\n  - nam: www\n");
    assert!(load_records(file.path()).is_err());
}

#[test]
fn test_missing_records_file() {
    let err = load_records(Path::new("/nonexistent/records.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read records file"));
}

#[test]
fn test_blank_or_dot_record_names_are_rejected() {
    for name in [" ", ".", " .. ", "ww w"] {
        let file = write_records(&format!("records:\n  - name: \"{}\"\n", name));
        let err = load_records(file.path()).unwrap_err();
        assert!(
            format!("{:#}", err).contains("Invalid records file"),
            "accepted {:?}",
            name
        );
    }
}

#[test]
fn test_dotted_record_names_are_accepted() {
    let file = write_records("records:\n  - name: \"www.\"\n  - name: \"a.b\"\n");
    assert_eq!(load_records(file.path()).unwrap().records.len(), 2);
}
