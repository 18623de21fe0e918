//! Unit tests for error construction and classification.

use rstest::rstest;

use super::ConfigError;

#[rstest]
fn key_not_found_is_classified() {
    let err = ConfigError::key_not_found("a.b");
    assert!(err.is_key_not_found());
    assert_eq!(err.to_string(), "key not found: 'a.b'");
}

#[rstest]
#[case(ConfigError::construction("no layers"))]
#[case(ConfigError::InvalidDepth)]
#[case(ConfigError::InvalidBooleanLiteral { key: "k".into(), value: "maybe".into() })]
fn other_errors_are_not_missing_keys(#[case] err: ConfigError) {
    assert!(!err.is_key_not_found());
}

#[rstest]
fn file_error_reports_path() {
    let err = ConfigError::file(
        camino::Utf8Path::new("out/db/host"),
        std::io::Error::other("denied"),
    );
    let text = err.to_string();
    assert!(text.contains("out/db/host"), "unexpected message: {text}");
    assert!(text.contains("denied"), "unexpected message: {text}");
}

#[rstest]
fn shared_key_not_found_keeps_key() {
    let err = ConfigError::key_not_found_arc("x");
    assert!(matches!(&*err, ConfigError::KeyNotFound { key } if key == "x"));
}

#[rstest]
fn into_config_wraps_errors_and_keeps_values() {
    use crate::{ConfigResult, ConfigResultExt};

    let ok: ConfigResult<u8> = Ok::<_, ConfigError>(3).into_config();
    assert!(matches!(ok, Ok(3)));
    let err: ConfigResult<u8> = Err(ConfigError::InvalidDepth).into_config();
    assert!(matches!(err, Err(e) if matches!(*e, ConfigError::InvalidDepth)));
}
