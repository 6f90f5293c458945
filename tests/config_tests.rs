// Config loading and validation tests

use std::path::PathBuf;

use telemetry_digest::config::AppConfig;
use telemetry_digest::reports::ReportKind;

const VALID_CONFIG: &str = r#"
[format]
precision = 2
missing = "NA"

[[report]]
kind = "cpu-load"
input = "logs/cpu-load-data.txt"
output = "out/cpu.csv"

[[report]]
kind = "network"
input = "logs/network-data.txt"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.format.precision, Some(2));
    assert_eq!(config.format.missing, "NA");
    assert!(!config.format.show);
    assert_eq!(config.reports.len(), 2);
    assert_eq!(config.reports[0].kind, ReportKind::CpuLoad);
    assert_eq!(config.reports[0].output_path(), PathBuf::from("out/cpu.csv"));
    assert_eq!(config.reports[1].kind, ReportKind::Network);
    assert_eq!(
        config.reports[1].output_path(),
        PathBuf::from("network-summary.csv")
    );
}

#[test]
fn test_config_format_defaults_when_omitted() {
    let config = AppConfig::load_from_str(
        r#"
[[report]]
kind = "file-change"
input = "files.txt"
"#,
    )
    .expect("valid");
    assert_eq!(config.format.precision, None);
    assert_eq!(config.format.missing, "");
    assert_eq!(config.format.precision_for(ReportKind::FileChange), 2);
}

#[test]
fn test_config_validation_rejects_no_reports() {
    let err = AppConfig::load_from_str("[format]\nprecision = 2\n").unwrap_err();
    assert!(err.to_string().contains("[[report]]"));
}

#[test]
fn test_config_validation_rejects_large_precision() {
    let bad = VALID_CONFIG.replace("precision = 2", "precision = 12");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("format.precision"));
}

#[test]
fn test_config_validation_rejects_empty_input() {
    let bad = VALID_CONFIG.replace("input = \"logs/network-data.txt\"", "input = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report[1].input"));
}

#[test]
fn test_config_validation_rejects_empty_output() {
    let bad = VALID_CONFIG.replace("output = \"out/cpu.csv\"", "output = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report[0].output"));
}

#[test]
fn test_config_validation_rejects_shared_output() {
    let bad = VALID_CONFIG.replace("output = \"out/cpu.csv\"", "output = \"network-summary.csv\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report[1].output"));
}

#[test]
fn test_config_validation_rejects_unknown_kind() {
    let bad = VALID_CONFIG.replace("kind = \"network\"", "kind = \"disk-io\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_unknown_field() {
    let bad = VALID_CONFIG.replace("missing = \"NA\"", "missing = \"NA\"\ncolour = true");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_explicit_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("digest.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load(Some(path.as_path())).expect("load from path");
    assert_eq!(config.reports.len(), 2);
}

#[test]
fn test_config_load_missing_file_names_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load(None);
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.format.missing, "NA");
    assert_eq!(config.reports[0].input, PathBuf::from("logs/cpu-load-data.txt"));
}
