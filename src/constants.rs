// src/constants.rs
//
// Application-wide constants. Each one documents where it is used.

/// Base URL of the card store when nothing else is configured.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Port the mock store listens on by default.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_SERVE_PORT: u16 = 3000;

/// File backing the mock store by default.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_DB_PATH: &str = "db.json";

/// How long a success/failure notice stays visible.
///
/// Used in: `application/notice.rs`, `infrastructure/config.rs`
pub const NOTICE_DISMISS_AFTER_MS: u64 = 3000;

/// Store endpoint for card records.
///
/// Used in: `infrastructure/http.rs`, `infrastructure/server.rs`
pub const CARDS_PATH: &str = "/memoryCards";

/// Store endpoint for credential checks.
///
/// Used in: `infrastructure/http.rs`, `infrastructure/server.rs`
pub const AUTH_PATH: &str = "/auth";

/// Delay in milliseconds after writing the HTML file before returning.
///
/// The browser needs a moment to pick the file up before the temp
/// directory may be cleaned up.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
