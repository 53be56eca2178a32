//! User-Agent string for export requests.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/dbexport";

/// Default User-Agent for export requests (identifies the tool).
#[must_use]
pub(crate) fn default_export_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("dbexport/{version} (+{PROJECT_UA_URL})")
}
