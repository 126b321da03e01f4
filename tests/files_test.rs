//! Loading configuration and requests from files

use enumerator::{EngineConfig, Enumerator, Error, Mode, Request};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_config() {
    let file = file_with(".yaml", "input_limit: 8\nseed: 42\n");
    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(
        config,
        EngineConfig {
            input_limit: 8,
            seed: Some(42),
            ..EngineConfig::default()
        }
    );
}

#[test]
fn test_load_json_config_is_validated() {
    let file = file_with(".json", r#"{"sample_runs": 10, "min_valid_samples": 20}"#);
    assert!(matches!(EngineConfig::load(file.path()), Err(Error::Config(_))));
}

#[test]
fn test_missing_file() {
    let err = EngineConfig::load(std::path::Path::new("/nonexistent/engine.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_and_run_request() {
    let file = file_with(
        ".yaml",
        r#"
input: "1, 2, 3, 4, 5"
mode: combination
length: 3
conditions:
  - condition: contains
    arg: "5"
  - condition: sum
    arg: "10"
    comparison: less
    negate: true
"#,
    );
    let request = Request::load(file.path()).unwrap();
    assert_eq!(request.mode, Mode::Combination);
    assert_eq!(request.conditions.len(), 2);

    let result = Enumerator::default().run(&request).unwrap();
    // 145 235 245 345
    assert_eq!(result.count, Some(4));
    assert_eq!(
        result.request,
        "combinations of length 3 from '1, 2, 3, 4, 5' where contains '5' and not sum less than 10"
    );
}

#[test]
fn test_load_json_request_with_defaults() {
    let file = file_with(".json", r#"{"input": "aab", "length": 3}"#);
    let request = Request::load(file.path()).unwrap();
    assert_eq!(request, Request::new("aab", Mode::Permutation, 3));
    assert_eq!(Enumerator::default().run(&request).unwrap().count, Some(3));
}

#[test]
fn test_bad_request_file() {
    let file = file_with(".yaml", "input: abc\nlength: two\n");
    assert!(matches!(Request::load(file.path()), Err(Error::Yaml(_))));
}

#[test]
fn test_result_serialises() {
    let mut session = Enumerator::default();
    let result = session.run(&Request::new("abc", Mode::Permutation, 2)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["count"], 6);
    assert_eq!(json["id"], 0);
    assert_eq!(json["is_approximation"], false);
}
