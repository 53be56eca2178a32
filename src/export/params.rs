//! Connection parameters and endpoint construction.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::constants::{DEFAULT_AUTH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME, EXPORT_PATH};
use super::error::ExportError;

/// Supported connection schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = ExportError;

    /// Only the exact lowercase values `http` and `https` are accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ExportError::configuration(other)),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved connection parameters for one export.
///
/// The scheme is kept as the raw configured string so that an unsupported
/// value is reported by the export itself, after the destination is opened.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Connection scheme, expected to be `http` or `https`.
    pub scheme: String,
    /// Database server host.
    pub host: String,
    /// Database server port.
    pub port: String,
    /// Credentials in `user:pass` form.
    pub auth: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            auth: DEFAULT_AUTH.to_string(),
        }
    }
}

// Manual impl so the password never reaches a log line through `{:?}`.
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth", &redact_auth(&self.auth))
            .finish()
    }
}

impl ConnectionParams {
    /// Creates parameters from their parts.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port: port.into(),
            auth: auth.into(),
        }
    }

    /// Validates the configured scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] for anything but `http`/`https`.
    pub fn scheme(&self) -> Result<Scheme, ExportError> {
        self.scheme.parse()
    }

    /// Builds `{scheme}://{auth}@{host}:{port}/export`.
    ///
    /// The credentials are split on the first `:` and percent-encoded into
    /// the URL authority, so reserved characters in a password survive.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] for an unsupported scheme and
    /// [`ExportError::Connection`] when host, port or credentials do not form
    /// a valid URL.
    pub fn endpoint_url(&self) -> Result<Url, ExportError> {
        let scheme = self.scheme()?;
        let raw = format!("{scheme}://{}:{}{EXPORT_PATH}", self.host, self.port);
        let mut url = Url::parse(&raw).map_err(|e| {
            ExportError::connection(self.redacted_endpoint(), format!("invalid endpoint: {e}"))
        })?;

        if !self.auth.is_empty() {
            let (username, password) = split_auth(&self.auth);
            url.set_username(username)
                .and_then(|()| url.set_password(password))
                .map_err(|()| {
                    ExportError::connection(
                        self.redacted_endpoint(),
                        "credentials cannot be embedded in endpoint",
                    )
                })?;
        }

        Ok(url)
    }

    /// Renders the endpoint with the password masked, for logs and errors.
    #[must_use]
    pub fn redacted_endpoint(&self) -> String {
        let userinfo = if self.auth.is_empty() {
            String::new()
        } else {
            format!("{}@", redact_auth(&self.auth))
        };
        format!(
            "{}://{userinfo}{}:{}{EXPORT_PATH}",
            self.scheme, self.host, self.port
        )
    }
}

fn split_auth(auth: &str) -> (&str, Option<&str>) {
    match auth.split_once(':') {
        Some((username, password)) => (username, Some(password)),
        None => (auth, None),
    }
}

fn redact_auth(auth: &str) -> String {
    match split_auth(auth) {
        (username, Some(_)) => format!("{username}:***"),
        (username, None) => username.to_string(),
    }
}
