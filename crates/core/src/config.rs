//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables;
//! binaries read them once and hand the parsed values to [`CoreConfig::new`].

use crate::catalog::Catalog;
use crate::constants::DEFAULT_NAMASTE_SYSTEM_URI;
use crate::patient::PatientStore;
use crate::{PortalError, PortalResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    catalog_file: Option<PathBuf>,
    seed_demo_data: bool,
    namaste_system_uri: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        catalog_file: Option<PathBuf>,
        seed_demo_data: bool,
        namaste_system_uri: String,
    ) -> PortalResult<Self> {
        if namaste_system_uri.trim().is_empty() {
            return Err(PortalError::InvalidInput(
                "namaste_system_uri cannot be empty".into(),
            ));
        }

        Ok(Self {
            catalog_file,
            seed_demo_data,
            namaste_system_uri,
        })
    }

    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }

    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    pub fn namaste_system_uri(&self) -> &str {
        &self.namaste_system_uri
    }

    /// Load the catalog this configuration points at.
    ///
    /// Uses the configured file (`.csv` NAMASTE export or YAML) when there is one, otherwise the
    /// built-in catalog.
    pub fn load_catalog(&self) -> PortalResult<Catalog> {
        match self.catalog_file() {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::seeded()),
        }
    }

    /// Build the patient store for this configuration around an already loaded catalog.
    pub fn build_store(&self, catalog: Arc<Catalog>) -> PatientStore {
        if self.seed_demo_data {
            PatientStore::seeded(catalog)
        } else {
            PatientStore::new(catalog)
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            seed_demo_data: true,
            namaste_system_uri: DEFAULT_NAMASTE_SYSTEM_URI.into(),
        }
    }
}

/// Parse the demo-data seeding flag from an optional string value.
///
/// If `value` is `None` or empty/whitespace, seeding is enabled.
pub fn seed_demo_data_from_env_value(value: Option<String>) -> PortalResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(true),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(PortalError::InvalidInput(format!(
            "invalid boolean for demo data seeding: {other}"
        ))),
    }
}

/// Parse the optional catalog file path; blank values mean "use the built-in catalog".
pub fn catalog_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse the FHIR system URI, falling back to the NAMASTE default when unset or blank.
pub fn namaste_system_uri_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMASTE_SYSTEM_URI.into())
}
