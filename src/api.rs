//! HTTP boundary to the triage service.
//!
//! `TriageApi` is the seam the workflows depend on; `ApiClient` is the
//! real implementation over a blocking reqwest client. Tests drive the
//! workflows through `testing::MockApi` instead.
//!
//! Every authenticated call carries the session token as a bearer
//! credential. Error bodies are the server's `{"message": ...}` records;
//! `ApiError::server_message` exposes that message verbatim so workflows
//! can surface it, with a workflow-specific generic fallback.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{
    AssessmentInput, AssessmentResult, HistoryEntry, LoginOutcome, Medication,
    PatientRosterEntry, Role,
};

/// Connect timeout for the underlying HTTP client.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default whole-request timeout. The workflows carry no timers of their
/// own; a request that exceeds this surfaces as an ordinary failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from triage service calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the triage service at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Malformed response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server-provided message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// The message a workflow should surface: the server's own words
    /// when present, else the workflow's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

// ═══════════════════════════════════════════════════════════
// TriageApi — the seam workflows depend on
// ═══════════════════════════════════════════════════════════

/// The triage service operations the client consumes.
pub trait TriageApi {
    /// Exchange credentials for a session. Issuance itself is the
    /// server's business; the client only consumes the outcome.
    fn login(&self, role: Role, email: &str, password: &str) -> Result<LoginOutcome, ApiError>;

    /// POST /api/assessments
    fn submit_assessment(
        &self,
        token: &str,
        input: &AssessmentInput,
    ) -> Result<AssessmentResult, ApiError>;

    /// GET /api/patients/{id}/history
    fn patient_history(&self, token: &str, patient_id: &str)
        -> Result<Vec<HistoryEntry>, ApiError>;

    /// GET /api/doctors/patients
    fn doctor_patients(&self, token: &str) -> Result<Vec<PatientRosterEntry>, ApiError>;

    /// PUT /api/prescriptions/{id} — replaces medications + instructions.
    fn update_prescription(
        &self,
        token: &str,
        prescription_id: &str,
        medications: &[Medication],
        instructions: &str,
    ) -> Result<(), ApiError>;
}

// ═══════════════════════════════════════════════════════════
// Wire envelopes
// ═══════════════════════════════════════════════════════════

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct PatientsEnvelope {
    patients: Vec<PatientRosterEntry>,
}

#[derive(Serialize)]
struct UpdatePrescriptionRequest<'a> {
    medications: &'a [Medication],
    instructions: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the server's `message` from an error body, if it is one of
/// the service's structured error records.
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

fn login_path(role: Role) -> &'static str {
    match role {
        Role::Patient => "/api/patients/login",
        Role::Doctor => "/api/doctors/login",
    }
}

// ═══════════════════════════════════════════════════════════
// ApiClient
// ═══════════════════════════════════════════════════════════

/// Blocking HTTP client for the triage service.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client against the base URL from the environment
    /// (`TRIAGECARE_API_URL`, defaulting to the local dev server).
    pub fn from_env() -> Self {
        Self::new(&config::api_base_url(), DEFAULT_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    /// Turn a response into `Ok(response)` or the server's error record.
    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::Server {
            status: status.as_u16(),
            message: parse_error_message(&body).unwrap_or_default(),
        })
    }
}

impl TriageApi for ApiClient {
    fn login(&self, role: Role, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        tracing::debug!(%role, "login request");
        let response = self
            .client
            .post(self.url(login_path(role)))
            .json(&LoginRequest { email, password })
            .send()
            .map_err(|e| self.transport_error(e))?;
        Self::check_status(response)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn submit_assessment(
        &self,
        token: &str,
        input: &AssessmentInput,
    ) -> Result<AssessmentResult, ApiError> {
        tracing::debug!(patient = %input.patient_id, symptoms = input.symptoms.len(), "submitting assessment");
        let response = self
            .client
            .post(self.url("/api/assessments"))
            .bearer_auth(token)
            .json(input)
            .send()
            .map_err(|e| self.transport_error(e))?;
        Self::check_status(response)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn patient_history(
        &self,
        token: &str,
        patient_id: &str,
    ) -> Result<Vec<HistoryEntry>, ApiError> {
        tracing::debug!(patient = patient_id, "fetching history");
        let response = self
            .client
            .get(self.url(&format!("/api/patients/{patient_id}/history")))
            .bearer_auth(token)
            .send()
            .map_err(|e| self.transport_error(e))?;
        let envelope: HistoryEnvelope = Self::check_status(response)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.history)
    }

    fn doctor_patients(&self, token: &str) -> Result<Vec<PatientRosterEntry>, ApiError> {
        tracing::debug!("fetching assigned patients");
        let response = self
            .client
            .get(self.url("/api/doctors/patients"))
            .bearer_auth(token)
            .send()
            .map_err(|e| self.transport_error(e))?;
        let envelope: PatientsEnvelope = Self::check_status(response)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.patients)
    }

    fn update_prescription(
        &self,
        token: &str,
        prescription_id: &str,
        medications: &[Medication],
        instructions: &str,
    ) -> Result<(), ApiError> {
        tracing::debug!(prescription = prescription_id, "updating prescription");
        let response = self
            .client
            .put(self.url(&format!("/api/prescriptions/{prescription_id}")))
            .bearer_auth(token)
            .json(&UpdatePrescriptionRequest {
                medications,
                instructions,
            })
            .send()
            .map_err(|e| self.transport_error(e))?;
        // The body (updated prescription or ack) is not consumed — the
        // roster re-fetches rather than trusting a returned copy.
        Self::check_status(response).map(|_| ())
    }
}

// ═══════════════════════════════════════════════════════════
// Test double + fixtures
// ═══════════════════════════════════════════════════════════


// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
