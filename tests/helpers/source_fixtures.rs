//! Fixture documents.

use std::path::PathBuf;

use smithy_ir::{Resolution, resolve};

/// Directory holding the `.smithy` fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read one fixture by file name.
pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()))
}

/// Resolve an inline document, failing the test on an internal error.
pub fn resolve_source(source: &str) -> Resolution {
    resolve(source, "test.smithy").expect("resolution must not hit an internal error")
}

/// Resolve a fixture by file name.
pub fn resolve_fixture(name: &str) -> Resolution {
    resolve(&fixture(name), name).expect("resolution must not hit an internal error")
}

/// Wrap shape statements in a minimal document.
pub fn document(body: &str) -> String {
    format!("$version: \"2\"\nnamespace test.ns\n{body}\n")
}
