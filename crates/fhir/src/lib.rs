//! FHIR wire/boundary support for the Arogya terminology service.
//!
//! This crate provides **wire models** and **translation helpers** for publishing the coding
//! catalog as a FHIR `CodeSystem` resource:
//! - domain-level concept carriers ([`ConceptData`])
//! - a strict wire model that serialises to FHIR JSON
//!
//! This crate focuses on:
//! - FHIR semantic alignment (resource shape and field names)
//! - translation between domain primitives and wire structs
//!
//! It knows nothing about the catalog store itself; callers hand it flat concept data.

pub mod codesystem;

// Re-export facades
pub use codesystem::CodeSystem;

// Re-export public domain-level types
pub use codesystem::{CodeSystemResource, ConceptData};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
