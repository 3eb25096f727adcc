//! Tests for configuration validation

use laundry_board::config::BoardConfig;
use std::time::Duration;

#[test]
fn test_board_config_validation() {
    let valid = BoardConfig {
        sweep_interval_secs: 30,
        grace_period_secs: 300,
        min_loads: 1,
        max_loads: 10,
        audit_capacity: 64,
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_board_config_invalid_interval() {
    let invalid = BoardConfig {
        sweep_interval_secs: 0,
        ..BoardConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_board_config_invalid_min_loads() {
    let invalid = BoardConfig {
        min_loads: 0,
        ..BoardConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_board_config_inverted_load_range() {
    let invalid = BoardConfig {
        min_loads: 5,
        max_loads: 4,
        ..BoardConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_zero_grace_period_is_allowed() {
    let cfg = BoardConfig {
        grace_period_secs: 0,
        ..BoardConfig::default()
    };
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.sweep_policy().grace_period, Duration::ZERO);
}

#[test]
fn test_board_config_from_json() {
    let json = r#"{
        "sweep_interval_secs": 15,
        "grace_period_secs": 120,
        "min_loads": 1,
        "max_loads": 6,
        "audit_capacity": 32
    }"#;

    let config = BoardConfig::from_json_str(json).unwrap();
    assert_eq!(config.max_loads, 6);
    assert_eq!(config.sweep_policy().interval, Duration::from_secs(15));
    assert_eq!(config.sweep_policy().grace_period, Duration::from_secs(120));
}

#[test]
fn test_board_config_from_partial_json() {
    let config = BoardConfig::from_json_str(r#"{ "max_loads": 3 }"#).unwrap();
    assert_eq!(config.max_loads, 3);
    assert_eq!(config.sweep_interval_secs, 30);
}

#[test]
fn test_board_config_from_bad_json() {
    assert!(BoardConfig::from_json_str("not json").is_err());
    assert!(BoardConfig::from_json_str(r#"{ "sweep_interval_secs": 0 }"#).is_err());
}

#[test]
fn test_board_config_interval_upper_bound() {
    let at_cap = BoardConfig {
        sweep_interval_secs: 24 * 60 * 60,
        ..BoardConfig::default()
    };
    assert!(at_cap.validate().is_ok());

    let over = BoardConfig {
        sweep_interval_secs: u64::MAX,
        ..BoardConfig::default()
    };
    assert!(over.validate().is_err());
    assert!(BoardConfig::from_json_str(r#"{ "sweep_interval_secs": 18446744073709551615 }"#).is_err());
}

#[test]
fn test_board_config_grace_period_upper_bound() {
    let over = BoardConfig {
        grace_period_secs: 7 * 24 * 60 * 60 + 1,
        ..BoardConfig::default()
    };
    assert!(over.validate().is_err());
}

#[test]
fn test_env_interval_overflow_is_rejected() {
    let max = u64::MAX.to_string();
    let err = BoardConfig::from_lookup(|k| (k == "BOARD_SWEEP_INTERVAL_SECS").then(|| max.clone()))
        .unwrap_err();
    assert!(err.to_string().contains("sweep_interval_secs"));
}
