use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "TriageCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the triage service base URL.
pub const API_URL_ENV: &str = "TRIAGECARE_API_URL";

/// Default triage service base URL (local development server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,triagecare_client=debug"
}

/// Get the application data directory
/// ~/TriageCare/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("TriageCare")
}

/// Get the directory holding the persisted session entries
pub fn session_dir() -> PathBuf {
    app_data_dir().join("session")
}

/// Resolve the triage service base URL from the environment,
/// falling back to the local default.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}
