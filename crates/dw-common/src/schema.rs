//! Schema versioning for JSON outputs.

/// Current schema version for all JSON outputs.
///
/// Follows semver: breaking field changes bump MAJOR, additive optional
/// fields bump MINOR.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Check whether a serialized payload's schema version can be consumed by
/// this build (same major version).
pub fn is_compatible(version: &str) -> bool {
    major(SCHEMA_VERSION) == major(version)
}

fn major(version: &str) -> u32 {
    version
        .split('.')
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0)
}
