// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证 默认值 → 配置文件 → 环境变量 的覆写顺序与校验
// ==========================================

use community_roster::config::{config_keys, ConfigError, ConfigManager, ConfigSource, EngineConfig};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes()).expect("Failed to write config");
    file
}

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(r#"{ "header_scan_rows": 8, "cache_capacity": 4 }"#);

    let manager = ConfigManager::load_with_env(Some(file.path()), env(&[])).unwrap();
    assert_eq!(manager.config().header_scan_rows, 8);
    assert_eq!(manager.config().cache_capacity, 4);
    assert_eq!(manager.config().fuzzy_threshold, 0.6);
    assert_eq!(manager.source(), &ConfigSource::File(file.path().to_path_buf()));
}

#[test]
fn test_env_overrides_file() {
    let file = write_config(r#"{ "fuzzy_threshold": 0.7 }"#);

    let manager = ConfigManager::load_with_env(
        Some(file.path()),
        env(&[
            (config_keys::ENV_FUZZY_THRESHOLD, "0.8"),
            (config_keys::ENV_MAX_UPLOAD_MB, "5"),
            (config_keys::ENV_CACHE, "off"),
        ]),
    )
    .unwrap();

    let config = manager.config();
    assert_eq!(config.fuzzy_threshold, 0.8);
    assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    assert!(!config.cache_enabled);
}

#[test]
fn test_invalid_env_value_rejected() {
    let result = ConfigManager::load_with_env(
        None,
        env(&[(config_keys::ENV_MAX_UPLOAD_MB, "lots")]),
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    let result = ConfigManager::load_with_env(None, env(&[(config_keys::ENV_CACHE, "maybe")]));
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_out_of_range_file_value_rejected() {
    let file = write_config(r#"{ "community_ratio_threshold": 2.0 }"#);
    let result = ConfigManager::load_with_env(Some(file.path()), env(&[]));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { ref key, .. }) if key == "community_ratio_threshold"
    ));
}

#[test]
fn test_malformed_json_rejected() {
    let file = write_config("{ not json");
    let result = ConfigManager::load_with_env(Some(file.path()), env(&[]));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_explicit_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let result = ConfigManager::load_with_env(Some(&missing), env(&[]));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_snapshot_round_trips() {
    let manager = ConfigManager::default();
    let snapshot = manager.get_config_snapshot().unwrap();
    let parsed: EngineConfig = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(&parsed, manager.config());
}
