// Configuration loading and validation

use pis::config::*;
use std::io::Write;

#[test]
fn test_empty_document_is_default_config() {
    let config = Config::from_yaml_with_env("").unwrap();
    assert_eq!(config.server.port, ServerConfig::default().port);
    assert_eq!(config.editor, EditorConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_config_deserializes() {
    let yaml = r#"
server:
  address: "0.0.0.0"
  port: 3000
logging:
  level: "pis=debug,info"
  format: json
auth:
  enabled: true
  secret: "test-secret"
  algorithm: HS256
gallery:
  locales: ["en", "zh-CN"]
  default_locale: en
  share_link_max_age_secs: 3600
editor:
  capacity_message: "Maximum reached"
  photographer_name: "Aki"
style_presets:
  - id: studio-warm
    name: Studio Warm
    category: portrait
    brightness: 1.05
    sepia: 0.1
notifications:
  default_page_size: 10
  max_page_size: 50
audit_log:
  enabled: true
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.auth.enabled);
    assert_eq!(config.gallery.default_locale, "en");
    assert_eq!(config.gallery.share_link_max_age_secs, Some(3600));
    assert_eq!(config.editor.capacity_message, "Maximum reached");
    assert_eq!(config.editor.default_margin, 5);
    assert_eq!(config.notifications.max_page_size, 50);

    let registry = config.preset_registry();
    assert!(registry.get("studio-warm").is_some());
    assert!(registry.get("japanese-fresh").is_some());
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("PIS_TEST_JWT_SECRET", "from-env");
    let yaml = r#"
auth:
  enabled: true
  secret: "${PIS_TEST_JWT_SECRET}"
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.auth.secret, "from-env");
    std::env::remove_var("PIS_TEST_JWT_SECRET");
}

#[test]
fn test_missing_env_var_is_an_error() {
    let yaml = "auth:\n  secret: \"${PIS_TEST_UNSET_VARIABLE}\"\n";
    let err = Config::from_yaml_with_env(yaml).unwrap_err();
    assert!(err.contains("PIS_TEST_UNSET_VARIABLE"));
}

#[test]
fn test_enabled_auth_requires_secret() {
    let mut config = Config::default();
    config.auth.enabled = true;
    config.auth.secret = String::new();
    assert!(config.validate().unwrap_err().contains("secret"));
}

#[test]
fn test_default_locale_must_be_supported() {
    let mut config = Config::default();
    config.gallery.default_locale = "fr".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_duplicate_style_preset_rejected() {
    let yaml = r#"
style_presets:
  - id: warm
    name: Warm
    brightness: 1.1
  - id: warm
    name: Warm Again
    contrast: 1.1
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert!(config.validate().unwrap_err().contains("warm"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let mut config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  port: 4100").unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 4100);

    assert!(Config::from_file("/nonexistent/pis.yaml").is_err());
}
