//! Shared constants for the paste service.

use std::time::Duration;

/// Default API port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum upload body size accepted by the API layer.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Minimum delay between accepted uploads from one client address.
pub const WRITE_THROTTLE_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Number of parsed paste records kept in memory in front of the store.
pub const PASTE_CACHE_CAPACITY: usize = 5;

/// How long a cached paste stays fresh after its last access.
pub const PASTE_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Applications allowed to create pastes (matched case-insensitively).
pub const VALID_APPLICATIONS: &[&str] = &[
    "plotsquared",
    "fastasyncworldedit",
    "incendopermissions",
    "kvantum",
];

/// Substitution tokens for redacted IPv4 addresses. None of these may
/// themselves look like a dotted quad or the redaction loop would never
/// terminate.
pub const REDACTION_TOKENS: &[&str] = &[
    "anonymized",
    "hidden",
    "masked",
    "redacted",
    "scrubbed",
    "unavailable",
];
