use insight_core::{ConfigError, CoreError, ErrorExt, TaskApiError, ViewError};

#[test]
fn test_error_codes() {
    let api_error = CoreError::TaskApi(TaskApiError::RequestTimeout);
    assert_eq!(api_error.error_code(), "TASK_API");

    let view_error = CoreError::View(ViewError::InvalidTransition {
        from: "form".to_string(),
        to: "result".to_string(),
    });
    assert_eq!(view_error.error_code(), "VIEW");

    let config_error = CoreError::Config(ConfigError::ValidationFailed {
        reason: "empty".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let input_error = CoreError::InvalidInput {
        message: "keyword".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");
}

#[test]
fn test_nested_error_codes() {
    assert_eq!(
        TaskApiError::StartRejected { status_code: 500 }.error_code(),
        "TASK_START_REJECTED"
    );
    assert_eq!(
        TaskApiError::StatusUnavailable { status_code: 502 }.error_code(),
        "TASK_STATUS_UNAVAILABLE"
    );
}

#[test]
fn test_user_friendly_messages() {
    let api_error = CoreError::TaskApi(TaskApiError::StartRejected { status_code: 500 });
    let message = api_error.user_friendly_message();
    assert!(message.contains("HTTP 500"));

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "poll_interval_ms".to_string(),
        value: "0".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("poll_interval_ms"));

    let input_error = CoreError::InvalidInput {
        message: "请输入关键词！".to_string(),
    };
    assert_eq!(input_error.user_friendly_message(), "请输入关键词！");
}

#[test]
fn test_conversions() {
    let error: CoreError = TaskApiError::RequestTimeout.into();
    assert!(matches!(error, CoreError::TaskApi(TaskApiError::RequestTimeout)));

    let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: CoreError = parse_error.into();
    assert_eq!(error.error_code(), "SERIALIZATION");
}

#[test]
fn test_logging_returns_the_same_error() {
    let error = CoreError::TaskApi(TaskApiError::StatusUnavailable { status_code: 503 });
    let logged = error.log_error();
    assert!(std::ptr::eq(logged, &error));
    assert_eq!(error.log_warn().error_code(), "TASK_API");
}
