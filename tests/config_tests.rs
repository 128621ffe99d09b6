// Host-side tests for indicator configuration.

use folio_core::constants::*;
use folio_core::{ConfigError, IndicatorConfig};
use std::time::Duration;

#[test]
fn default_config_is_valid() {
    let cfg = IndicatorConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.route, "/works");
    assert_eq!(cfg.caption, "View Works");
    assert_eq!(cfg.label_quiet, Duration::from_millis(900));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(DAMPING > 0.0 && DAMPING < 1.0);
    assert!(VELOCITY_DECAY <= DAMPING);
    assert!(EXCITATION > 0.0);
    assert!(NOISE_FLOOR > 0.0 && NOISE_FLOOR < MAX_SAMPLE_DELTA);
    assert!(OFFSET_LIMIT > 0.0 && ROTATION_LIMIT > 0.0);
    assert!(AMBIENT_IDLE_OPACITY < AMBIENT_ACTIVE_OPACITY);
    assert!(AMBIENT_IDLE_SPEED < AMBIENT_ACTIVE_SPEED);
    assert!(AMBIENT_WINDOW < LABEL_QUIET);
    assert!(AMBIENT_COUNT <= MAX_AMBIENT_ELEMENTS);
}

#[test]
fn overrides_apply_and_validate() {
    let cfg = IndicatorConfig::default()
        .with_overrides([
            ("damping", "0.5"),
            ("velocity-decay", "0.25"),
            ("label-quiet-ms", "1200"),
            ("ambient-count", "3"),
            ("entrance", "false"),
            ("route", " /projects "),
            ("caption", "Projects"),
        ])
        .unwrap();
    assert_eq!(cfg.damping, 0.5);
    assert_eq!(cfg.velocity_decay, 0.25);
    assert_eq!(cfg.label_quiet, Duration::from_millis(1200));
    assert_eq!(cfg.ambient_count, 3);
    assert!(!cfg.entrance);
    assert_eq!(cfg.route, "/projects");
    assert_eq!(cfg.caption, "Projects");
}

#[test]
fn unknown_key_is_rejected() {
    let err = IndicatorConfig::default()
        .with_overrides([("springiness", "3")])
        .unwrap_err();
    assert_eq!(err, ConfigError::UnknownKey("springiness".into()));
}

#[test]
fn unparsable_value_is_rejected() {
    let err = IndicatorConfig::default()
        .with_overrides([("damping", "soft")])
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "damping"));
    assert_eq!(err.to_string(), "invalid value `soft` for `damping`");
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases: [(&str, &str, &str); 9] = [
        ("damping", "1.0", "damping"),
        ("damping", "NaN", "damping"),
        ("excitation", "0", "excitation"),
        ("velocity-decay", "0.95", "velocity_decay"),
        ("noise-floor", "-1", "noise_floor"),
        ("rest-amplitude", "0", "rest_amplitude"),
        ("rest-velocity", "-1", "rest_velocity"),
        ("label-quiet-ms", "0", "label_quiet"),
        ("ambient-count", "1000", "ambient_count"),
    ];
    for (key, value, field) in cases {
        match IndicatorConfig::default().with_overrides([(key, value)]) {
            Err(ConfigError::OutOfRange { field: f, .. }) => assert_eq!(f, field, "{key}={value}"),
            other => panic!("{key}={value}: expected OutOfRange, got {other:?}"),
        }
    }
}

#[test]
fn empty_route_is_rejected() {
    let cfg = IndicatorConfig {
        route: "  ".into(),
        ..IndicatorConfig::default()
    };
    assert!(cfg.validate().is_err());
}
