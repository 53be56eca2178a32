//! Constants for the export module (endpoint, headers, defaults, buffer sizing).

/// Path of the export endpoint on the database server.
pub const EXPORT_PATH: &str = "/export";

/// Content type announced on the export request.
pub const EXPORT_CONTENT_TYPE: &str = "application/octet-stream";

/// Capacity of the write buffer reused across body chunks (64 KiB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Default credentials in `user:pass` form.
pub const DEFAULT_AUTH: &str = "root:root";

/// Default connection scheme.
pub const DEFAULT_SCHEME: &str = "https";

/// Default database server host.
pub const DEFAULT_HOST: &str = "surreal.io";

/// Default database server port.
pub const DEFAULT_PORT: &str = "80";
