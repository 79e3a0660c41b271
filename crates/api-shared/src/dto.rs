//! Request and response schemas.
//!
//! Request bodies default missing string fields to `""` so the store can report them as
//! missing input (400) instead of the extractor failing first.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Plain `{message}` body used for confirmations and every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Diagnosis lookup
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    /// Case-insensitive substring; empty or missing returns the whole catalog.
    pub term: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisLookupItem {
    /// `"<term> (<system>)"`
    pub display: String,
    pub namaste_code: String,
    pub definition: String,
}

// ============================================================================
// Patients
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct RegisterReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct LoginReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    #[serde(rename = "patientName")]
    pub patient_name: Option<String>,
}

/// Patient as returned to callers; carries no credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub name: String,
    pub email: String,
    pub record: Vec<RecordEntryRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordEntryRes {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub diagnosis: String,
    pub code: String,
    /// `null` for legacy diagnoses.
    #[serde(rename = "NAMASTE_CODE")]
    pub namaste_code: Option<String>,
    #[serde(rename = "shortDefinition")]
    pub short_definition: String,
}

// ============================================================================
// Approvals
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveReq {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub namaste_code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApproveRes {
    pub message: String,
    pub patient: PatientRes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRes {
    pub id: u64,
    pub patient: String,
    pub date: String,
    pub reason: String,
    pub doctor: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
}

// ============================================================================
// Audit
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventRes {
    pub id: u64,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub actor: String,
    /// `NAMASTE_INGEST` or `PROBLEM_CREATE`.
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
}
