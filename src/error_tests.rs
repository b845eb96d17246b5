//! Tests for SuggestError type

use super::*;

#[test]
fn test_transport_error_display() {
    let error = SuggestError::Transport("connection refused".to_string());
    let msg = error.to_string();
    assert!(msg.contains("Transport error"));
    assert!(msg.contains("connection refused"));
}

#[test]
fn test_api_error_display() {
    let error = SuggestError::Api {
        code: "badvalue".to_string(),
        info: "Unrecognized value for parameter \"type\"".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("badvalue"));
    assert!(msg.contains("Unrecognized value"));
}

#[test]
fn test_parse_error_display() {
    let error = SuggestError::Parse("expected value at line 1".to_string());
    assert!(error.to_string().contains("Parse error"));
}

#[test]
fn test_cancelled_display() {
    assert_eq!(SuggestError::Cancelled.to_string(), "Lookup cancelled");
}

#[test]
fn test_io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test error");
    let err = SuggestError::from(io_err);
    assert!(matches!(err, SuggestError::Io(_)));
    assert!(err.to_string().contains("test error"));
}

#[test]
fn test_error_debug() {
    let debug_str = format!("{:?}", SuggestError::Cancelled);
    assert!(debug_str.contains("Cancelled"));
}
