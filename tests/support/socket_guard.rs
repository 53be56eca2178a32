//! Guard for tests that need a localhost listener (wiremock or raw TCP).
//!
//! Sandboxed builders often forbid binding sockets. Such tests are skipped
//! with a note on stderr, unless `DBEXPORT_REQUIRE_SOCKET_TESTS` is set, in
//! which case they fail instead.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const REQUIRE_SOCKET_TESTS_ENV: &str = "DBEXPORT_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKET_TESTS_ENV).is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|accepted| value.eq_ignore_ascii_case(accepted))
    })
}

/// Returns `true` when the calling test should return early.
#[allow(dead_code)]
#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    let Err(bind_error) = TcpListener::bind("127.0.0.1:0") else {
        return false;
    };

    let caller = Location::caller();
    let note = format!(
        "cannot bind 127.0.0.1 for {}:{} ({bind_error})",
        caller.file(),
        caller.line()
    );
    assert!(
        !sockets_required(),
        "{note}; unset {REQUIRE_SOCKET_TESTS_ENV} to skip instead"
    );
    eprintln!("skipping: {note}; set {REQUIRE_SOCKET_TESTS_ENV}=1 to fail instead");
    true
}

/// Starts a mock server, or returns `None` when sockets are unavailable.
#[allow(dead_code)]
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        return None;
    }
    Some(MockServer::start().await)
}
