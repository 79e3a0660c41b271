//! # API REST
//!
//! REST API implementation for the Arogya portal.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `arogya-core` for every business rule.

#![warn(rust_2018_idioms)]

mod error;
mod handlers;

pub use error::{ApiError, ApiResult};

use api_shared::{
    AppointmentRes, ApproveReq, AuditEventRes, ApproveRes, DiagnosisLookupItem, HealthRes, LoginReq,
    MessageRes, PatientRes, RecordEntryRes, RegisterReq,
};
use arogya_core::{CoreConfig, PatientStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
///
/// The store is constructed once at startup and injected here, so tests can hand in their own.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    store: Arc<PatientStore>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<PatientStore>) -> Self {
        Self { cfg, store }
    }

    pub fn store(&self) -> &PatientStore {
        &self.store
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::diagnosis_lookup,
        handlers::patient_register,
        handlers::patient_login,
        handlers::patient_history,
        handlers::approve_appointment,
        handlers::pending_appointments,
        handlers::audit_log,
        handlers::code_system,
    ),
    components(schemas(
        HealthRes,
        MessageRes,
        DiagnosisLookupItem,
        RegisterReq,
        LoginReq,
        PatientRes,
        RecordEntryRes,
        ApproveReq,
        ApproveRes,
        AppointmentRes,
        AuditEventRes,
        fhir::CodeSystemResource,
        fhir::codesystem::ConceptWire,
        fhir::codesystem::DesignationWire,
        fhir::codesystem::CodingWire,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with all portal routes, Swagger UI, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/diagnosis-lookup", get(handlers::diagnosis_lookup))
        .route("/api/patient-register", post(handlers::patient_register))
        .route("/api/patient-login", post(handlers::patient_login))
        .route("/api/patient-history", get(handlers::patient_history))
        .route(
            "/api/approve-appointment",
            post(handlers::approve_appointment),
        )
        .route(
            "/api/pending-appointments",
            get(handlers::pending_appointments),
        )
        .route("/api/audit-log", get(handlers::audit_log))
        .route(
            "/fhir/CodeSystem/namaste-ayush",
            get(handlers::code_system),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
