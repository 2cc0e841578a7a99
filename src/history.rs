//! Patient assessment history view.
//!
//! The simplest fetch workflow: `Loading → Loaded | Failed`. A failure
//! shows a static message with no automatic retry; an empty history is
//! distinguished from a blank area so the view can show its "no
//! assessments yet" affordance.

use crate::api::TriageApi;
use crate::models::HistoryEntry;

const LOAD_FAILED: &str = "Failed to load history";

/// Where the history fetch stands.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Loading,
    Loaded(Vec<HistoryEntry>),
    Failed(String),
}

/// Read-only view of one patient's past assessments.
pub struct PatientHistoryView {
    state: HistoryState,
}

impl PatientHistoryView {
    pub fn new() -> Self {
        Self {
            state: HistoryState::Loading,
        }
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// The fetched entries, in the server's order.
    pub fn entries(&self) -> &[HistoryEntry] {
        match &self.state {
            HistoryState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    /// Loaded and empty — the view renders its "no history" message.
    pub fn is_empty(&self) -> bool {
        matches!(&self.state, HistoryState::Loaded(entries) if entries.is_empty())
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            HistoryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Fetch the history for one patient.
    pub fn load(&mut self, api: &dyn TriageApi, token: &str, patient_id: &str) {
        self.state = HistoryState::Loading;
        match api.patient_history(token, patient_id) {
            Ok(entries) => {
                tracing::debug!(patient = patient_id, count = entries.len(), "history loaded");
                self.state = HistoryState::Loaded(entries);
            }
            Err(err) => {
                tracing::warn!(patient = patient_id, "history load failed: {err}");
                self.state = HistoryState::Failed(LOAD_FAILED.to_string());
            }
        }
    }
}

impl Default for PatientHistoryView {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
