use super::*;

#[test]
fn default_matches_stock_schedule() {
    let cfg = AnnotatorConfig::default();
    assert_eq!(cfg.initial_scans_ms, vec![500, 1000, 1500, 2000, 2500, 3000, 4000, 5000, 7000, 10_000]);
    assert_eq!(cfg.mutation_rescans_ms, vec![100, 500]);
    assert!(cfg.observe_mutations);
    assert_eq!(cfg.log_level, LogLevel::Warn);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(AnnotatorConfig::from_json("{}").unwrap(), AnnotatorConfig::default());
}

#[test]
fn overrides_are_applied() {
    let cfg = AnnotatorConfig::from_json(
        r#"{"initial_scans_ms":[250],"mutation_rescans_ms":[],"observe_mutations":false,"log_level":"debug"}"#,
    )
    .unwrap();
    assert_eq!(cfg.initial_scans_ms, vec![250]);
    assert!(cfg.mutation_rescans_ms.is_empty());
    assert!(!cfg.observe_mutations);
    assert_eq!(cfg.log_level, LogLevel::Debug);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = AnnotatorConfig::from_json(r#"{"log_level":"trace"}"#).unwrap();
    assert_eq!(cfg.log_level, LogLevel::Trace);
    assert_eq!(cfg.mutation_rescans_ms, vec![100, 500]);
}

#[test]
fn unknown_level_is_rejected() {
    let err = AnnotatorConfig::from_json(r#"{"log_level":"loud"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn unknown_field_is_rejected() {
    let err = AnnotatorConfig::from_json(r#"{"scan_ms":[1]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn overlong_delay_is_rejected() {
    let err = AnnotatorConfig::from_json(r#"{"mutation_rescans_ms":[100, 60001]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::DelayTooLong { field: "mutation_rescans_ms", value: 60_001, max: 60_000 }));
    assert_eq!(err.to_string(), "mutation_rescans_ms delay 60001ms exceeds the 60000ms limit");
}

#[test]
fn limit_itself_is_allowed() {
    assert!(AnnotatorConfig::from_json(r#"{"initial_scans_ms":[60000]}"#).is_ok());
}

#[test]
fn level_names() {
    for (level, name) in [
        (LogLevel::Error, "error"),
        (LogLevel::Warn, "warn"),
        (LogLevel::Info, "info"),
        (LogLevel::Debug, "debug"),
        (LogLevel::Trace, "trace"),
    ] {
        assert_eq!(level.as_str(), name);
        assert_eq!(serde_json::to_value(level).unwrap(), serde_json::json!(name));
    }
}
