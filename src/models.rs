//! Wire and domain types for the triage service.
//!
//! Field spellings follow the server's JSON exactly (`patientID`,
//! `assessmentDate`, ...); serde renames bridge to Rust naming. All types
//! are plain value types — cloning a `Prescription` yields a fully
//! independent copy, which the prescription editor relies on.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Role & Principal
// ═══════════════════════════════════════════════════════════

/// The role a session is authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    /// Wire/storage spelling of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }

    /// Parse a stored role string. Unknown values yield `None` — the
    /// session store treats them as an absent session.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "patient" => Some(Self::Patient),
            "doctor" => Some(Self::Doctor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient's profile record as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A doctor's profile record as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    #[serde(rename = "doctorID")]
    pub doctor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

/// The authenticated entity behind a session. The active variant is fixed
/// for the lifetime of the session.
///
/// Untagged: the server sends a plain record; `email` vs `specialization`
/// discriminates the variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Principal {
    Patient(PatientProfile),
    Doctor(DoctorProfile),
}

impl Principal {
    /// The role this principal variant corresponds to.
    pub fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Doctor(_) => Role::Doctor,
        }
    }

    /// The server-issued identifier (patient or doctor ID).
    pub fn id(&self) -> &str {
        match self {
            Self::Patient(p) => &p.patient_id,
            Self::Doctor(d) => &d.doctor_id,
        }
    }

    pub fn first_name(&self) -> &str {
        match self {
            Self::Patient(p) => &p.first_name,
            Self::Doctor(d) => &d.first_name,
        }
    }

    pub fn last_name(&self) -> &str {
        match self {
            Self::Patient(p) => &p.last_name,
            Self::Doctor(d) => &d.last_name,
        }
    }
}

/// What a successful login yields: the bearer token plus who logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub principal: Principal,
    pub role: Role,
}

// ═══════════════════════════════════════════════════════════
// Assessment input
// ═══════════════════════════════════════════════════════════

/// Weight unit — the form control restricts input to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        })
    }
}

/// Height unit — the form control restricts input to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

impl std::fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cm => "cm",
            Self::Inches => "inches",
        })
    }
}

/// The payload of one assessment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub age: u32,
    pub symptoms: Vec<String>,
}

// ═══════════════════════════════════════════════════════════
// Prescriptions & results
// ═══════════════════════════════════════════════════════════

/// One medication line in a prescription. All fields are free text;
/// no cross-field validation happens client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl Medication {
    /// A medication with all fields empty — what the editor appends.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            dosage: String::new(),
            frequency: String::new(),
            duration: String::new(),
        }
    }
}

/// A server-owned prescription. The client only ever mutates a detached
/// clone of it inside the prescription editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "prescriptionID")]
    pub prescription_id: String,
    pub medications: Vec<Medication>,
    pub instructions: String,
}

/// The visit assignment returned with a prescription. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAssignment {
    pub doctor_name: String,
    pub specialization: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
}

/// What one submitted assessment yields. Immutable client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub prescription: Prescription,
    pub doctor_assignment: DoctorAssignment,
}

// ═══════════════════════════════════════════════════════════
// History & roster
// ═══════════════════════════════════════════════════════════

/// One row of a patient's assessment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "assessmentID")]
    pub assessment_id: String,
    /// As sent by the server (Python `isoformat()`); see [`Self::date`].
    pub assessment_date: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub age: u32,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub prescription: Option<Prescription>,
}

impl HistoryEntry {
    /// Parse the assessment date. Accepts RFC 3339 and the server's
    /// offset-less isoformat; `None` for anything else.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.assessment_date) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.assessment_date, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// One patient assigned to the authenticated doctor, with full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRosterEntry {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub assessment_count: u32,
    pub history: Vec<HistoryEntry>,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_storage_spelling() {
        assert_eq!(Role::parse("patient"), Some(Role::Patient));
        assert_eq!(Role::parse("doctor"), Some(Role::Doctor));
        assert_eq!(Role::parse(" doctor "), Some(Role::Doctor));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::Patient.as_str(), "patient");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        let role: Role = serde_json::from_str("\"patient\"").unwrap();
        assert_eq!(role, Role::Patient);
    }

    #[test]
    fn principal_discriminates_untagged_variants() {
        let patient: Principal = serde_json::from_str(
            r#"{"patientID":"p-1","firstName":"Ada","lastName":"Okafor","email":"ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(patient.role(), Role::Patient);
        assert_eq!(patient.id(), "p-1");
        assert_eq!(patient.first_name(), "Ada");

        let doctor: Principal = serde_json::from_str(
            r#"{"doctorID":"d-1","firstName":"Grace","lastName":"Lin","specialization":"General Medicine"}"#,
        )
        .unwrap();
        assert_eq!(doctor.role(), Role::Doctor);
        assert_eq!(doctor.id(), "d-1");
    }

    #[test]
    fn assessment_input_uses_server_field_spellings() {
        let input = AssessmentInput {
            patient_id: "p-7".into(),
            weight: 70.0,
            weight_unit: WeightUnit::Kg,
            height: 175.0,
            height_unit: HeightUnit::Cm,
            age: 30,
            symptoms: vec!["fever".into(), "cough".into()],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["patientID"], "p-7");
        assert_eq!(json["weightUnit"], "kg");
        assert_eq!(json["heightUnit"], "cm");
        assert_eq!(json["age"], 30);
        assert_eq!(json["symptoms"][1], "cough");
    }

    #[test]
    fn assessment_result_deserializes_from_server_shape() {
        let result: AssessmentResult = serde_json::from_str(
            r#"{
                "prescription": {
                    "prescriptionID": "rx-1",
                    "medications": [
                        {"name": "Paracetamol", "dosage": "500mg", "frequency": "3x daily", "duration": "5 days"}
                    ],
                    "instructions": "Take with food."
                },
                "doctorAssignment": {
                    "doctorName": "Dr. Grace Lin",
                    "specialization": "General Medicine",
                    "tokenID": "visit-42"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(result.prescription.prescription_id, "rx-1");
        assert_eq!(result.prescription.medications[0].name, "Paracetamol");
        assert_eq!(result.doctor_assignment.token_id, "visit-42");
    }

    #[test]
    fn history_entry_without_prescription_deserializes() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{
                "assessmentID": "a-1",
                "assessmentDate": "2026-08-01T09:30:00+00:00",
                "weight": 70.0,
                "weightUnit": "kg",
                "height": 175.0,
                "heightUnit": "cm",
                "age": 30,
                "symptoms": ["fever"]
            }"#,
        )
        .unwrap();
        assert!(entry.prescription.is_none());
        assert_eq!(entry.assessment_id, "a-1");
    }

    #[test]
    fn history_date_parses_rfc3339_and_bare_isoformat() {
        let mut entry: HistoryEntry = serde_json::from_str(
            r#"{
                "assessmentID": "a-1",
                "assessmentDate": "2026-08-01T09:30:00+00:00",
                "weight": 70.0,
                "weightUnit": "kg",
                "height": 175.0,
                "heightUnit": "cm",
                "age": 30,
                "symptoms": ["fever"]
            }"#,
        )
        .unwrap();
        assert!(entry.date().is_some());

        // Python isoformat() without an offset
        entry.assessment_date = "2026-08-01T09:30:00.123456".to_string();
        assert!(entry.date().is_some());

        entry.assessment_date = "yesterday".to_string();
        assert!(entry.date().is_none());
    }

    #[test]
    fn empty_medication_has_all_fields_blank() {
        let med = Medication::empty();
        assert!(med.name.is_empty());
        assert!(med.dosage.is_empty());
        assert!(med.frequency.is_empty());
        assert!(med.duration.is_empty());
    }

    #[test]
    fn unit_defaults_match_form_defaults() {
        assert_eq!(WeightUnit::default(), WeightUnit::Kg);
        assert_eq!(HeightUnit::default(), HeightUnit::Cm);
        assert_eq!(HeightUnit::Inches.to_string(), "inches");
        assert_eq!(WeightUnit::Lbs.to_string(), "lbs");
    }
}
