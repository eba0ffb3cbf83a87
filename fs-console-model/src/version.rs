//! Server version helpers

/// Version assumed when a server cannot report one
pub const DEFAULT_API_VERSION: &str = "0.0";

/// Normalize a reported API version to its comparison prefix.
///
/// Only the first three characters take part in comparisons ("1.6.2"
/// normalizes to "1.6"); anything shorter, absent, or oddly encoded
/// normalizes to [`DEFAULT_API_VERSION`].
#[must_use]
pub fn normalized_api_version(version: Option<&str>) -> &str {
    version
        .and_then(|v| v.get(..3))
        .unwrap_or(DEFAULT_API_VERSION)
}

/// Whether a reported version meets a reference version.
///
/// The comparison is lexicographic on the normalized prefixes, so "1.10"
/// orders below "1.6". The management station has never shipped a two-digit
/// minor, and the console matches its ordering exactly.
#[must_use]
pub fn version_at_least(version: Option<&str>, reference: &str) -> bool {
    normalized_api_version(version) >= normalized_api_version(Some(reference))
}

/// Management API version spoken by a given console UI version, `""` for
/// unknown UI versions.
#[must_use]
pub fn api_version_from_ui_version(ui_version: &str) -> &'static str {
    match ui_version {
        "4.1" => "1.0",
        "4.2" => "1.1",
        "4.3" => "1.2",
        "4.4" => "1.3",
        "4.5" => "1.4",
        "4.6" => "1.5",
        "5.0" => "1.6",
        _ => "",
    }
}
