//! Error Extension Tests

use nsc_domain::error::{Error, Result};
use nsc_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_context_maps_to_infrastructure() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).context("failed to read file");

    match result {
        Err(Error::Infrastructure { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Infrastructure error, got {:?}", other),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(7);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 7);

    let err: std::result::Result<u8, io::Error> = Err(io::Error::other("boom"));
    let result = err.with_context(|| format!("step {}", 3));
    assert!(matches!(result, Err(Error::Infrastructure { ref message, .. }) if message.starts_with("step 3")));
}

#[test]
fn test_config_context_maps_to_configuration() {
    let parse_error = "x".parse::<u16>().unwrap_err();

    let result: Result<u16> = Err(parse_error).config_context("invalid port");

    assert!(matches!(result, Err(Error::Configuration { .. })));
}
