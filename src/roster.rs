//! Doctor roster workflow.
//!
//! Fetches the authenticated doctor's assigned patients with their full
//! histories, and owns the per-patient expand/collapse view state. At
//! most one patient is expanded at a time: the expanded id is a single
//! `Option`, so multi-expand is unrepresentable.
//!
//! Prescription edits are handed off to [`PrescriptionEditor`]; after a
//! successful save the roster re-fetches instead of patching its cached
//! copy, so it never diverges from the server's view.

use crate::api::TriageApi;
use crate::editor::PrescriptionEditor;
use crate::models::{PatientRosterEntry, Prescription};

const LOAD_FAILED: &str = "Failed to load patients";

/// Where the roster fetch stands.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterState {
    Loading,
    Loaded(Vec<PatientRosterEntry>),
    Failed(String),
}

/// The doctor's assigned patients plus expand/collapse state.
pub struct DoctorRoster {
    state: RosterState,
    /// The single expanded patient, if any.
    expanded: Option<String>,
}

impl DoctorRoster {
    pub fn new() -> Self {
        Self {
            state: RosterState::Loading,
            expanded: None,
        }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// The fetched roster, in the server's order.
    pub fn patients(&self) -> &[PatientRosterEntry] {
        match &self.state {
            RosterState::Loaded(patients) => patients,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RosterState::Failed(message) => Some(message),
            _ => None,
        }
    }

    // ── Fetch ────────────────────────────────────────────

    /// Fetch all patients assigned to the authenticated doctor.
    /// Expand state survives a reload.
    pub fn load(&mut self, api: &dyn TriageApi, token: &str) {
        self.state = RosterState::Loading;
        match api.doctor_patients(token) {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "roster loaded");
                self.state = RosterState::Loaded(patients);
            }
            Err(err) => {
                tracing::warn!("roster load failed: {err}");
                self.state = RosterState::Failed(LOAD_FAILED.to_string());
            }
        }
    }

    /// Re-fetch after the editor saved, picking up the authoritative
    /// server copy of the edited prescription.
    pub fn refresh_after_save(&mut self, api: &dyn TriageApi, token: &str) {
        self.load(api, token);
    }

    // ── Expand/collapse ──────────────────────────────────

    /// Toggle one patient's history panel. Expanding a second patient
    /// implicitly collapses the first.
    pub fn toggle_expand(&mut self, patient_id: &str) {
        if self.expanded.as_deref() == Some(patient_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(patient_id.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, patient_id: &str) -> bool {
        self.expanded.as_deref() == Some(patient_id)
    }

    // ── Prescription editing ─────────────────────────────

    /// The prescription attached to one history entry, if that entry has
    /// one. This is what the "edit" affordance reads.
    pub fn prescription_for(&self, assessment_id: &str) -> Option<&Prescription> {
        self.patients()
            .iter()
            .flat_map(|p| &p.history)
            .find(|entry| entry.assessment_id == assessment_id)
            .and_then(|entry| entry.prescription.as_ref())
    }

    /// Open a prescription editor over a detached copy of one entry's
    /// prescription. The roster itself never mutates prescriptions.
    pub fn begin_edit(&self, assessment_id: &str) -> Option<PrescriptionEditor> {
        self.prescription_for(assessment_id)
            .map(PrescriptionEditor::checkout)
    }
}

impl Default for DoctorRoster {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
