//! FHIR-aligned `CodeSystem` wire model and translation helpers.
//!
//! Responsibilities:
//! - Define a flat domain-level carrier for one coded concept
//! - Define the wire model that serialises to FHIR JSON
//! - Translate concept terms into a display value plus a traditional-name designation
//!
//! Notes:
//! - The resource is derived from the in-memory catalog on every request
//! - Concept order follows the order the caller supplies

use crate::{FhirError, FhirResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// Logical id of the published NAMASTE code system.
pub const CODE_SYSTEM_ID: &str = "namaste-ayush";

/// Computer-friendly name of the published code system.
pub const CODE_SYSTEM_NAME: &str = "NAMASTE_Ayush_Codes";

/// Business version of the published code system.
pub const CODE_SYSTEM_VERSION: &str = "1.0.0";

/// Language tag used for the traditional-name designation.
const TRADITIONAL_LANGUAGE: &str = "hi-IN";

/// Designation use code for the native-script term.
const TRADITIONAL_USE_CODE: &str = "traditional-name";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a single coded concept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptData {
    /// Concept code, e.g. `AYA0001`.
    pub code: String,
    /// Provenance system, e.g. `Ayurveda`.
    pub system: String,
    /// Display term, optionally followed by a native-script term in parentheses.
    pub term: String,
    /// Short free-text definition.
    pub definition: String,
}

// ============================================================================
// Wire types
// ============================================================================

/// FHIR `CodeSystem` resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeSystemResource {
    pub resource_type: String,
    pub id: String,
    pub url: String,
    pub version: String,
    pub name: String,
    pub status: String,
    pub content: String,
    pub count: usize,
    pub concept: Vec<ConceptWire>,
}

/// A single concept inside a `CodeSystem`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ConceptWire {
    pub code: String,
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub designation: Vec<DesignationWire>,
}

/// Additional representation of a concept (here: the native-script term).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DesignationWire {
    pub language: String,
    #[serde(rename = "use")]
    pub use_coding: CodingWire,
    pub value: String,
}

/// Minimal FHIR `Coding`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CodingWire {
    pub code: String,
}

// ============================================================================
// Facade
// ============================================================================

/// Facade for building and rendering `CodeSystem` resources.
pub struct CodeSystem;

impl CodeSystem {
    /// Build a `CodeSystem` resource from flat concept data.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] if `url` is blank or a concept has a blank code, and
    /// [`FhirError::Translation`] if two concepts share a code.
    pub fn build(url: &str, concepts: &[ConceptData]) -> FhirResult<CodeSystemResource> {
        if url.trim().is_empty() {
            return Err(FhirError::InvalidInput(
                "CodeSystem url cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut wire = Vec::with_capacity(concepts.len());
        for concept in concepts {
            if concept.code.trim().is_empty() {
                return Err(FhirError::InvalidInput(
                    "concept code cannot be empty".into(),
                ));
            }
            if !seen.insert(concept.code.as_str()) {
                return Err(FhirError::Translation(format!(
                    "duplicate concept code: {}",
                    concept.code
                )));
            }
            wire.push(concept_to_wire(concept));
        }

        Ok(CodeSystemResource {
            resource_type: "CodeSystem".into(),
            id: CODE_SYSTEM_ID.into(),
            url: url.to_string(),
            version: CODE_SYSTEM_VERSION.into(),
            name: CODE_SYSTEM_NAME.into(),
            status: "active".into(),
            content: "complete".into(),
            count: wire.len(),
            concept: wire,
        })
    }

    /// Build and render a `CodeSystem` resource as pretty-printed JSON.
    pub fn render(url: &str, concepts: &[ConceptData]) -> FhirResult<String> {
        let resource = Self::build(url, concepts)?;
        Ok(serde_json::to_string_pretty(&resource)?)
    }

    /// Parse a `CodeSystem` resource from JSON, rejecting other resource types.
    pub fn parse(json: &str) -> FhirResult<CodeSystemResource> {
        let resource: CodeSystemResource = serde_json::from_str(json)?;
        if resource.resource_type != "CodeSystem" {
            return Err(FhirError::InvalidInput(format!(
                "resourceType must be CodeSystem, got {}",
                resource.resource_type
            )));
        }
        if resource.count != resource.concept.len() {
            return Err(FhirError::Translation(format!(
                "count {} does not match {} concepts",
                resource.count,
                resource.concept.len()
            )));
        }
        Ok(resource)
    }
}

// ============================================================================
// Translation helpers
// ============================================================================

fn concept_to_wire(concept: &ConceptData) -> ConceptWire {
    let (english, traditional) = split_term(&concept.term);

    let designation = traditional
        .map(|value| DesignationWire {
            language: TRADITIONAL_LANGUAGE.into(),
            use_coding: CodingWire {
                code: TRADITIONAL_USE_CODE.into(),
            },
            value: value.to_string(),
        })
        .into_iter()
        .collect();

    let definition = if concept.definition.trim().is_empty() {
        None
    } else {
        Some(concept.definition.clone())
    };

    ConceptWire {
        code: concept.code.clone(),
        display: format!("[{}] {}", concept.system, english),
        definition,
        designation,
    }
}

/// Split `"Jwara (ज्वर)"` into `("Jwara", Some("ज्वर"))`.
///
/// Terms without a trailing parenthesised part are returned unchanged.
fn split_term(term: &str) -> (&str, Option<&str>) {
    let trimmed = term.trim();
    let Some(stripped) = trimmed.strip_suffix(')') else {
        return (trimmed, None);
    };
    match stripped.rfind(" (") {
        Some(idx) => {
            let english = stripped[..idx].trim();
            let native = stripped[idx + 2..].trim();
            if english.is_empty() || native.is_empty() {
                (trimmed, None)
            } else {
                (english, Some(native))
            }
        }
        None => (trimmed, None),
    }
}
