use sqlsplit::{SplitError, SplitOptions, split_file};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sqlsplit_{}_{name}", std::process::id()))
}

#[test]
fn test_defaults() {
    let options = SplitOptions::default();
    assert!(options.strip_comments);
    assert_eq!(options.delimiter, ";");
    assert!(options.delimiter_directive);
    assert_eq!(options.max_depth, 256);
}

#[test]
fn test_from_json_partial_object() {
    let options = SplitOptions::from_json(serde_json::json!({
        "strip_comments": false,
        "delimiter": "$$"
    }))
    .unwrap();

    assert!(!options.strip_comments);
    assert_eq!(options.delimiter, "$$");
    // Missing keys keep their defaults
    assert!(options.delimiter_directive);
    assert_eq!(options.max_depth, 256);
}

#[test]
fn test_from_json_rejects_non_object() {
    let result = SplitOptions::from_json(serde_json::json!(["strip_comments"]));
    match result {
        Err(SplitError::InvalidOptions(message)) => assert!(message.contains("object")),
        other => panic!("Expected InvalidOptions error, got: {other:?}"),
    }
}

#[test]
fn test_from_json_rejects_wrong_types() {
    let result = SplitOptions::from_json(serde_json::json!({ "max_depth": "deep" }));
    assert!(matches!(result, Err(SplitError::Json(_))));
}

#[test]
fn test_from_json_rejects_empty_delimiter() {
    let result = SplitOptions::from_json(serde_json::json!({ "delimiter": "" }));
    assert!(matches!(result, Err(SplitError::InvalidOptions(_))));
}

#[test]
fn test_from_file() {
    let path = temp_path("options.json");
    fs::write(&path, r#"{ "delimiter_directive": false, "max_depth": 8 }"#).unwrap();

    let options = SplitOptions::from_file(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(!options.delimiter_directive);
    assert_eq!(options.max_depth, 8);
    assert!(options.strip_comments);
}

#[test]
fn test_from_file_missing() {
    let path = temp_path("missing.json");
    let result = SplitOptions::from_file(path.to_str().unwrap());
    assert!(matches!(result, Err(SplitError::Io(_))));
}

#[test]
fn test_from_file_malformed_json() {
    let path = temp_path("malformed.json");
    fs::write(&path, "{ not json").unwrap();

    let result = SplitOptions::from_file(path.to_str().unwrap());
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(SplitError::Json(_))));
}

#[test]
fn test_options_round_trip_through_json() {
    let options = SplitOptions::default()
        .with_delimiter("//")
        .with_max_depth(16)
        .with_strip_comments(false);
    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(SplitOptions::from_json(json).unwrap(), options);
}

#[test]
fn test_split_file() {
    let path = temp_path("script.sql");
    fs::write(&path, "-- migration\nCREATE TABLE t (id INT);\nINSERT INTO t VALUES (1);\n").unwrap();

    let statements = split_file(path.to_str().unwrap(), &SplitOptions::default()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        statements,
        vec!["CREATE TABLE t (id INT)", "INSERT INTO t VALUES (1)"]
    );
}

#[test]
fn test_split_file_missing() {
    let path = temp_path("missing.sql");
    let result = split_file(path.to_str().unwrap(), &SplitOptions::default());
    assert!(matches!(result, Err(SplitError::Io(_))));
}

#[test]
fn test_from_json_rejects_unknown_keys() {
    // A misspelled key must not silently fall back to the defaults
    let result = SplitOptions::from_json(serde_json::json!({ "strip_comment": false }));
    match result {
        Err(SplitError::Json(err)) => assert!(err.to_string().contains("strip_comment")),
        other => panic!("Expected Json error, got: {other:?}"),
    }
}

#[test]
fn test_zero_max_depth_rejected() {
    let result = SplitOptions::from_json(serde_json::json!({ "max_depth": 0 }));
    match result {
        Err(SplitError::InvalidOptions(message)) => assert!(message.contains("max_depth")),
        other => panic!("Expected InvalidOptions error, got: {other:?}"),
    }

    assert!(SplitOptions::default().with_max_depth(1).validate().is_ok());
    assert!(SplitOptions::default().with_max_depth(0).validate().is_err());
}
