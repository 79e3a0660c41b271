//! # Arogya Core
//!
//! Core business logic for the Arogya clinic portal.
//!
//! This crate contains pure in-memory data operations:
//! - the NAMASTE coding catalog and its substring search
//! - the patient record store (registration, login, history, approvals)
//! - the pending appointment book closed out by approvals
//! - the append-only audit trail of ingests and approvals
//!
//! **No API concerns**: HTTP servers, request schemas and status codes belong in `api-rest`
//! or `api-shared`.

pub mod appointments;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
mod seed;
pub mod validation;

pub use appointments::{Appointment, AppointmentBook};
pub use audit::{AuditAction, AuditEvent, AuditLog};
pub use catalog::{Catalog, CatalogEntry};
pub use config::CoreConfig;
pub use constants::*;
pub use error::{PortalError, PortalResult};
pub use patient::{Approval, PatientProfile, PatientStore, RecordEntry};
