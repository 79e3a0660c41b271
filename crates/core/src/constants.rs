//! Constants used throughout the Arogya core crate.
//!
//! This module keeps user-facing messages, configuration defaults and environment variable
//! names in one place.

/// Default REST listen address when `AROGYA_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default FHIR system URI for the NAMASTE code system.
pub const DEFAULT_NAMASTE_SYSTEM_URI: &str = "http://terminology.moh.gov.in/CodeSystem/NAMASTE";

/// Environment variable: REST listen address.
pub const ENV_REST_ADDR: &str = "AROGYA_REST_ADDR";

/// Environment variable: optional catalog file (`.csv` NAMASTE export or YAML).
pub const ENV_CATALOG_FILE: &str = "AROGYA_CATALOG_FILE";

/// Environment variable: whether to seed demo patients and appointments.
pub const ENV_SEED_DEMO_DATA: &str = "AROGYA_SEED_DEMO_DATA";

/// Environment variable: FHIR system URI for the code system.
pub const ENV_NAMASTE_SYSTEM_URI: &str = "NAMASTE_SYSTEM_URI";

/// Message returned when a registration is missing fields.
pub const MSG_REGISTRATION_FIELDS_REQUIRED: &str = "All fields are required for registration.";

/// Message returned when an approval is missing fields.
pub const MSG_APPROVAL_FIELDS_REQUIRED: &str = "Patient name and NAMASTE code are required.";

/// Prefix of the note attached to approved diagnoses.
pub const APPROVAL_NOTE_PREFIX: &str = "NAMASTE Code: ";

/// Audit actor for actions taken by the process itself, such as catalog ingest.
pub const AUDIT_ACTOR_SYSTEM: &str = "system";

/// Audit actor for approvals made through the portal.
pub const AUDIT_ACTOR_PORTAL: &str = "portal";

/// FHIR resource type recorded for approved diagnoses.
pub const AUDIT_RESOURCE_CONDITION: &str = "Condition";

/// FHIR resource type recorded for catalog ingests.
pub const AUDIT_RESOURCE_CODE_SYSTEM: &str = "CodeSystem";
