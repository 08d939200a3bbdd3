#![cfg(feature = "serde")]

use decider_core::{EngineConfig, ExecutionStatus};

#[test]
fn engine_config_defaults_missing_fields() {
    let config: EngineConfig = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(config, EngineConfig::default());

    let config: EngineConfig =
        serde_json::from_str(r#"{"max_task_levels": 4}"#).expect("deserialize");
    assert_eq!(config.max_task_levels, 4);
}

#[test]
fn execution_status_json_roundtrip() {
    for status in [
        ExecutionStatus::None,
        ExecutionStatus::Running,
        ExecutionStatus::Success,
        ExecutionStatus::Failed,
    ] {
        let json = serde_json::to_string(&status).expect("serialize");
        let back: ExecutionStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, status);
    }
}
