//! Prescription draft editor.
//!
//! Checkout/commit: the editor is constructed from a prescription and
//! immediately takes a deep value copy as its working draft, so no draft
//! mutation can ever reach the caller's copy. `save` commits the draft to
//! the server and closes the editor; `cancel` discards unconditionally.
//! A failed save keeps the draft so the doctor's edits survive a retry.
//!
//! No field validation happens here — empty medication fields are
//! permitted and saved as-is.

use crate::api::{ApiError, TriageApi};
use crate::models::{Medication, Prescription};

const SAVE_FAILED: &str = "Failed to update prescription";

/// Which free-text field of a medication to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationField {
    Name,
    Dosage,
    Frequency,
    Duration,
}

/// Errors from draft operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("No medication at index {0}")]
    IndexOutOfBounds(usize),
    #[error("The editor has been closed")]
    Closed,
    #[error(transparent)]
    Api(#[from] ApiError),
}

struct Draft {
    medications: Vec<Medication>,
    instructions: String,
}

// ═══════════════════════════════════════════════════════════
// PrescriptionEditor
// ═══════════════════════════════════════════════════════════

/// An open (or already closed) editing session over one prescription.
///
/// `draft: None` means closed — after a successful save or a cancel.
/// Closing is idempotent; operations on a closed editor return
/// `EditorError::Closed` and mutate nothing.
pub struct PrescriptionEditor {
    prescription_id: String,
    draft: Option<Draft>,
    error: Option<String>,
}

impl PrescriptionEditor {
    /// Open an editor over a deep copy of `source`. The source is never
    /// touched again; the caller may keep displaying it.
    pub fn checkout(source: &Prescription) -> Self {
        Self {
            prescription_id: source.prescription_id.clone(),
            draft: Some(Draft {
                medications: source.medications.clone(),
                instructions: source.instructions.clone(),
            }),
            error: None,
        }
    }

    pub fn prescription_id(&self) -> &str {
        &self.prescription_id
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The draft medication list; empty once the editor is closed.
    pub fn medications(&self) -> &[Medication] {
        match &self.draft {
            Some(d) => &d.medications,
            None => &[],
        }
    }

    pub fn instructions(&self) -> &str {
        self.draft.as_ref().map_or("", |d| d.instructions.as_str())
    }

    /// The retained error from the last failed save.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Draft mutations (pure local until save) ──────────

    /// Replace one field of the medication at `index`.
    pub fn update_medication_field(
        &mut self,
        index: usize,
        field: MedicationField,
        value: &str,
    ) -> Result<(), EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;
        let med = draft
            .medications
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfBounds(index))?;
        let slot = match field {
            MedicationField::Name => &mut med.name,
            MedicationField::Dosage => &mut med.dosage,
            MedicationField::Frequency => &mut med.frequency,
            MedicationField::Duration => &mut med.duration,
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Append an all-empty medication to the end of the list.
    pub fn add_medication(&mut self) -> Result<(), EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;
        draft.medications.push(Medication::empty());
        Ok(())
    }

    /// Remove the medication at `index`; remaining entries keep their
    /// relative order. Removing the last entry leaves an empty list.
    pub fn remove_medication(&mut self, index: usize) -> Result<(), EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;
        if index >= draft.medications.len() {
            return Err(EditorError::IndexOutOfBounds(index));
        }
        draft.medications.remove(index);
        Ok(())
    }

    /// Replace the free-text instructions.
    pub fn update_instructions(&mut self, value: &str) -> Result<(), EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;
        draft.instructions = value.to_string();
        Ok(())
    }

    // ── Commit / discard ─────────────────────────────────

    /// Commit the draft to the server.
    ///
    /// Success closes the editor; the caller must re-fetch its roster to
    /// pick up the authoritative copy. Failure keeps the draft intact
    /// and records a displayable error, so the edits can be retried.
    pub fn save(&mut self, api: &dyn TriageApi, token: &str) -> Result<(), EditorError> {
        let draft = self.draft.as_ref().ok_or(EditorError::Closed)?;
        match api.update_prescription(
            token,
            &self.prescription_id,
            &draft.medications,
            &draft.instructions,
        ) {
            Ok(()) => {
                tracing::info!(prescription = %self.prescription_id, "prescription saved");
                self.draft = None;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(prescription = %self.prescription_id, "prescription save failed: {err}");
                self.error = Some(err.user_message(SAVE_FAILED));
                Err(err.into())
            }
        }
    }

    /// Discard the draft. No confirmation, idempotent.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.error = None;
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
