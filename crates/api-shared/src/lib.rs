//! # API Shared
//!
//! Shared wire definitions for the Arogya APIs.
//!
//! Contains:
//! - Request/response schemas (`dto` module) with their JSON field names
//! - Shared services like `HealthService`
//!
//! Field names follow the portal front end (`namasteCode`, `patientName`, `NAMASTE_CODE`, ...),
//! so these structs are the only place the JSON shape is defined.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
