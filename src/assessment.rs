//! Assessment submission workflow.
//!
//! Form fields are free text the way a UI delivers them; units are typed
//! enums so an out-of-domain unit is unrepresentable. Submission runs
//! `Editing → Submitting → Succeeded | Failed`; a failure keeps the form
//! and its error message so the same submission can be retried, success
//! is terminal until the user navigates away.

use crate::api::{ApiError, TriageApi};
use crate::models::{AssessmentInput, AssessmentResult, HeightUnit, WeightUnit};

/// Generic message when the server did not say why submission failed.
const SUBMIT_FAILED: &str = "Assessment submission failed";

// ═══════════════════════════════════════════════════════════
// Form
// ═══════════════════════════════════════════════════════════

/// Raw form state. Numeric fields stay text until submission; the unit
/// selects are already constrained by their types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentForm {
    pub weight: String,
    pub weight_unit: WeightUnit,
    pub height: String,
    pub height_unit: HeightUnit,
    pub age: String,
    pub symptoms: String,
}

/// Why a form failed to parse into an `AssessmentInput`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Weight must be a number")]
    InvalidWeight,
    #[error("Height must be a number")]
    InvalidHeight,
    #[error("Age must be a whole number")]
    InvalidAge,
    #[error("At least one symptom is required")]
    NoSymptoms,
}

/// Split a comma-separated symptoms field: trim each entry, drop empties,
/// keep order and duplicates.
pub fn parse_symptoms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AssessmentForm {
    /// Validate and convert into the submission payload.
    pub fn parse(&self, patient_id: &str) -> Result<AssessmentInput, AssessmentError> {
        let weight: f64 = self
            .weight
            .trim()
            .parse()
            .map_err(|_| AssessmentError::InvalidWeight)?;
        let height: f64 = self
            .height
            .trim()
            .parse()
            .map_err(|_| AssessmentError::InvalidHeight)?;
        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| AssessmentError::InvalidAge)?;
        let symptoms = parse_symptoms(&self.symptoms);
        if symptoms.is_empty() {
            return Err(AssessmentError::NoSymptoms);
        }
        Ok(AssessmentInput {
            patient_id: patient_id.to_string(),
            weight,
            weight_unit: self.weight_unit,
            height,
            height_unit: self.height_unit,
            age,
            symptoms,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Workflow
// ═══════════════════════════════════════════════════════════

/// Where one submission attempt stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Editing,
    Submitting,
    /// Terminal: the result screen replaces the form.
    Succeeded(AssessmentResult),
    /// Back to editing, error retained for display.
    Failed(String),
}

/// The assessment form plus its submission state machine.
pub struct AssessmentWorkflow {
    pub form: AssessmentForm,
    state: SubmitState,
}

impl AssessmentWorkflow {
    pub fn new() -> Self {
        Self {
            form: AssessmentForm::default(),
            state: SubmitState::Editing,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// The submit control is enabled only here: not while a submission
    /// is in flight, and not from the terminal result screen.
    pub fn can_submit(&self) -> bool {
        !matches!(
            self.state,
            SubmitState::Submitting | SubmitState::Succeeded(_)
        )
    }

    /// The retained error, when the last attempt failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The result, once submission succeeded.
    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.state {
            SubmitState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Submit the current form for `patient_id`.
    ///
    /// One submission in flight at a time; a call while the control
    /// should be disabled is ignored. No automatic retry on failure.
    pub fn submit(&mut self, api: &dyn TriageApi, token: &str, patient_id: &str) {
        if !self.can_submit() {
            tracing::warn!("submit ignored: submission in flight or already succeeded");
            return;
        }

        let input = match self.form.parse(patient_id) {
            Ok(input) => input,
            Err(e) => {
                self.state = SubmitState::Failed(e.to_string());
                return;
            }
        };

        self.state = SubmitState::Submitting;
        match api.submit_assessment(token, &input) {
            Ok(result) => {
                tracing::info!(prescription = %result.prescription.prescription_id, "assessment succeeded");
                self.state = SubmitState::Succeeded(result);
            }
            Err(err) => {
                tracing::warn!("assessment submission failed: {err}");
                self.state = SubmitState::Failed(fail_message(&err));
            }
        }
    }
}

impl Default for AssessmentWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

fn fail_message(err: &ApiError) -> String {
    err.user_message(SUBMIT_FAILED)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{assessment_result, MockApi};

    fn filled_form() -> AssessmentForm {
        AssessmentForm {
            weight: "70".into(),
            weight_unit: WeightUnit::Kg,
            height: "175".into(),
            height_unit: HeightUnit::Cm,
            age: "30".into(),
            symptoms: "fever, cough".into(),
        }
    }

    #[test]
    fn symptoms_split_trim_and_drop_empties() {
        assert_eq!(
            parse_symptoms("headache, fever, , cough"),
            vec!["headache", "fever", "cough"]
        );
        assert_eq!(parse_symptoms(""), Vec::<String>::new());
        assert_eq!(parse_symptoms(" , ,"), Vec::<String>::new());
        // Order and duplicates preserved
        assert_eq!(parse_symptoms("cough,fever,cough"), vec!["cough", "fever", "cough"]);
    }

    #[test]
    fn form_parses_into_input() {
        let input = filled_form().parse("p-1").unwrap();
        assert_eq!(input.patient_id, "p-1");
        assert_eq!(input.weight, 70.0);
        assert_eq!(input.height, 175.0);
        assert_eq!(input.age, 30);
        assert_eq!(input.symptoms, vec!["fever", "cough"]);
    }

    #[test]
    fn form_rejects_malformed_fields() {
        let mut form = filled_form();
        form.weight = "heavy".into();
        assert_eq!(form.parse("p-1"), Err(AssessmentError::InvalidWeight));

        let mut form = filled_form();
        form.height = "".into();
        assert_eq!(form.parse("p-1"), Err(AssessmentError::InvalidHeight));

        let mut form = filled_form();
        form.age = "30.5".into();
        assert_eq!(form.parse("p-1"), Err(AssessmentError::InvalidAge));

        let mut form = filled_form();
        form.symptoms = " , ".into();
        assert_eq!(form.parse("p-1"), Err(AssessmentError::NoSymptoms));
    }

    #[test]
    fn happy_path_reaches_succeeded_with_nonempty_medications() {
        let api = MockApi::new();
        api.push_assessment(Ok(assessment_result()));

        let mut workflow = AssessmentWorkflow::new();
        workflow.form = filled_form();
        assert!(workflow.can_submit());

        workflow.submit(&api, "tok", "p-1");

        let result = workflow.result().expect("expected Succeeded");
        assert!(!result.prescription.medications.is_empty());
        assert_eq!(api.call_count("submit_assessment"), 1);
        // Terminal: no submit-again from the result screen.
        assert!(!workflow.can_submit());
        workflow.submit(&api, "tok", "p-1");
        assert_eq!(api.call_count("submit_assessment"), 1);
    }

    #[test]
    fn server_message_surfaces_verbatim_on_failure() {
        let api = MockApi::new();
        api.push_assessment(Err(ApiError::Server {
            status: 400,
            message: "Symptoms must be a non-empty list".into(),
        }));

        let mut workflow = AssessmentWorkflow::new();
        workflow.form = filled_form();
        workflow.submit(&api, "tok", "p-1");

        assert_eq!(workflow.error(), Some("Symptoms must be a non-empty list"));
    }

    #[test]
    fn missing_server_message_falls_back_to_generic() {
        let api = MockApi::new();
        api.push_assessment(Err(ApiError::Connection("http://localhost:5000".into())));

        let mut workflow = AssessmentWorkflow::new();
        workflow.form = filled_form();
        workflow.submit(&api, "tok", "p-1");

        assert_eq!(workflow.error(), Some("Assessment submission failed"));
    }

    #[test]
    fn failure_returns_to_editing_and_allows_retry() {
        let api = MockApi::new();
        api.push_assessment(Err(ApiError::Timeout(30)));
        api.push_assessment(Ok(assessment_result()));

        let mut workflow = AssessmentWorkflow::new();
        workflow.form = filled_form();

        workflow.submit(&api, "tok", "p-1");
        assert!(workflow.error().is_some());
        // Form contents survive the failure.
        assert_eq!(workflow.form, filled_form());
        assert!(workflow.can_submit());

        workflow.submit(&api, "tok", "p-1");
        assert!(workflow.result().is_some());
        assert_eq!(api.call_count("submit_assessment"), 2);
    }

    #[test]
    fn invalid_form_fails_without_calling_the_api() {
        let api = MockApi::new();

        let mut workflow = AssessmentWorkflow::new();
        workflow.form = filled_form();
        workflow.form.symptoms = "".into();
        workflow.submit(&api, "tok", "p-1");

        assert_eq!(workflow.error(), Some("At least one symptom is required"));
        assert_eq!(api.call_count("submit_assessment"), 0);
    }
}
