//! TriageCare client core.
//!
//! The state-bearing half of a symptom-triage client: persisted session
//! state with role-gated navigation, the assessment submission workflow,
//! patient history and doctor roster fetching, and the prescription
//! draft editor. A UI shell drives these types; no rendering lives here.

pub mod api; // HTTP boundary: TriageApi trait + blocking ApiClient
pub mod assessment; // Assessment form + submission state machine
pub mod config;
pub mod editor; // Prescription draft editor (checkout/commit)
pub mod history; // Patient assessment history view
pub mod models; // Wire/domain types
pub mod roster; // Doctor roster + single-expand view state
pub mod routes; // Role-gated navigation guard
pub mod session; // Persisted session store

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a client shell. Respects `RUST_LOG`, falling
/// back to the crate default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
