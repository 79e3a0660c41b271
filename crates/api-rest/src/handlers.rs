//! HTTP handlers.
//!
//! Handlers only translate between wire schemas and store operations; every rule lives in
//! `arogya-core`.

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use api_shared::{
    AppointmentRes, ApproveReq, AuditEventRes, ApproveRes, DiagnosisLookupItem, HealthRes, HealthService,
    HistoryParams, LoginReq, LookupParams, MessageRes, PatientRes, RecordEntryRes, RegisterReq,
};
use arogya_core::{Appointment, AuditEvent, CatalogEntry, PatientProfile, RecordEntry};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use fhir::CodeSystemResource;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/diagnosis-lookup",
    params(LookupParams),
    responses(
        (status = 200, description = "Matching catalog entries", body = [DiagnosisLookupItem])
    )
)]
/// Search the NAMASTE catalog
///
/// Case-insensitive substring match against term, code and definition. An empty or missing
/// `term` returns the whole catalog. Never fails.
#[axum::debug_handler]
pub async fn diagnosis_lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Json<Vec<DiagnosisLookupItem>> {
    let term = params.term.unwrap_or_default();
    let results = state
        .store()
        .catalog()
        .search(&term)
        .into_iter()
        .map(lookup_item)
        .collect();
    Json(results)
}

#[utoipa::path(
    post,
    path = "/api/patient-register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Patient registered", body = MessageRes),
        (status = 400, description = "Missing fields", body = MessageRes),
        (status = 409, description = "Email already registered", body = MessageRes)
    )
)]
/// Register a new patient
#[axum::debug_handler]
pub async fn patient_register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageRes>)> {
    let Json(req) = payload?;
    state.store().register(&req.name, &req.email, &req.password)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("Registration successful.")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/patient-login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated patient", body = PatientRes),
        (status = 401, description = "Invalid email or password", body = MessageRes)
    )
)]
/// Log a patient in
///
/// Returns the patient with their history; the password is never echoed back.
#[axum::debug_handler]
pub async fn patient_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginReq>, JsonRejection>,
) -> ApiResult<Json<PatientRes>> {
    let Json(req) = payload?;
    let profile = state.store().authenticate(&req.email, &req.password)?;
    Ok(Json(patient_res(profile)))
}

#[utoipa::path(
    get,
    path = "/api/patient-history",
    params(HistoryParams),
    responses(
        (status = 200, description = "Patient with history", body = PatientRes),
        (status = 404, description = "Patient not found", body = MessageRes)
    )
)]
/// Fetch a patient's history by display name
///
/// Names are not unique; the first registered patient with this exact name is returned.
#[axum::debug_handler]
pub async fn patient_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<PatientRes>> {
    let name = params.patient_name.unwrap_or_default();
    let profile = state.store().get_history(&name)?;
    Ok(Json(patient_res(profile)))
}

#[utoipa::path(
    post,
    path = "/api/approve-appointment",
    request_body = ApproveReq,
    responses(
        (status = 200, description = "Diagnosis appended", body = ApproveRes),
        (status = 400, description = "Missing fields", body = MessageRes),
        (status = 404, description = "Unknown code or patient", body = MessageRes)
    )
)]
/// Approve an appointment with a NAMASTE diagnosis
///
/// Appends the catalog diagnosis to the patient's history and closes their pending
/// appointments.
#[axum::debug_handler]
pub async fn approve_appointment(
    State(state): State<AppState>,
    payload: Result<Json<ApproveReq>, JsonRejection>,
) -> ApiResult<Json<ApproveRes>> {
    let Json(req) = payload?;
    let approval = state.store().approve(&req.patient_name, &req.namaste_code)?;
    Ok(Json(ApproveRes {
        message: approval.message,
        patient: patient_res(approval.patient),
    }))
}

#[utoipa::path(
    get,
    path = "/api/pending-appointments",
    responses(
        (status = 200, description = "Appointments awaiting approval", body = [AppointmentRes])
    )
)]
/// List pending appointments
#[axum::debug_handler]
pub async fn pending_appointments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AppointmentRes>>> {
    let pending = state.store().pending_appointments()?;
    Ok(Json(pending.into_iter().map(appointment_res).collect()))
}

#[utoipa::path(
    get,
    path = "/api/audit-log",
    responses(
        (status = 200, description = "Audit trail, oldest first", body = [AuditEventRes])
    )
)]
/// Read the audit trail
#[axum::debug_handler]
pub async fn audit_log(State(state): State<AppState>) -> ApiResult<Json<Vec<AuditEventRes>>> {
    let events = state.store().audit_log()?;
    Ok(Json(events.into_iter().map(audit_event_res).collect()))
}

#[utoipa::path(
    get,
    path = "/fhir/CodeSystem/namaste-ayush",
    responses(
        (status = 200, description = "FHIR CodeSystem resource", body = CodeSystemResource),
        (status = 404, description = "Catalog is empty", body = MessageRes)
    )
)]
/// Publish the catalog as a FHIR CodeSystem
#[axum::debug_handler]
pub async fn code_system(State(state): State<AppState>) -> ApiResult<Json<CodeSystemResource>> {
    let catalog = state.store().catalog();
    if catalog.is_empty() {
        return Err(ApiError::not_found("NAMASTE CodeSystem not yet loaded."));
    }
    let resource = catalog.code_system(state.cfg.namaste_system_uri())?;
    Ok(Json(resource))
}

// Conversion helpers

fn lookup_item(entry: &CatalogEntry) -> DiagnosisLookupItem {
    DiagnosisLookupItem {
        display: entry.display(),
        namaste_code: entry.code.clone(),
        definition: entry.definition.clone(),
    }
}

fn patient_res(profile: PatientProfile) -> PatientRes {
    PatientRes {
        name: profile.name,
        email: profile.email,
        record: profile.history.into_iter().map(record_entry_res).collect(),
    }
}

fn record_entry_res(entry: RecordEntry) -> RecordEntryRes {
    RecordEntryRes {
        date: entry.date.to_string(),
        diagnosis: entry.diagnosis_term,
        code: entry.code,
        namaste_code: entry.catalog_code,
        short_definition: entry.note,
    }
}

fn appointment_res(appointment: Appointment) -> AppointmentRes {
    AppointmentRes {
        id: appointment.id,
        patient: appointment.patient,
        date: appointment.date.to_string(),
        reason: appointment.reason,
        doctor: appointment.doctor,
        age: appointment.age,
        gender: appointment.gender,
        contact: appointment.contact,
    }
}

fn audit_event_res(event: AuditEvent) -> AuditEventRes {
    AuditEventRes {
        id: event.id,
        timestamp: event.timestamp.to_rfc3339(),
        actor: event.actor,
        action: event.action.to_string(),
        resource_type: event.resource_type,
        resource_id: event.resource_id,
    }
}
