//! Append-only audit trail.
//!
//! Every terminology ingest and every problem (diagnosis) creation leaves one row here.
//! Rows are never edited or removed; ids increase from 1 in insertion order.

use chrono::{DateTime, Utc};
use std::fmt;

/// Kind of audited action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
    /// A catalog was loaded and published as the NAMASTE CodeSystem.
    NamasteIngest,
    /// A catalog diagnosis was appended to a patient's history.
    ProblemCreate,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::NamasteIngest => "NAMASTE_INGEST",
            AuditAction::ProblemCreate => "PROBLEM_CREATE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    /// Who performed the action.
    pub actor: String,
    pub action: AuditAction,
    /// FHIR resource type touched, e.g. `CodeSystem` or `Condition`.
    pub resource_type: String,
    pub resource_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row stamped with the current UTC time and return it.
    pub fn record(
        &mut self,
        actor: &str,
        action: AuditAction,
        resource_type: &str,
        resource_id: Option<String>,
    ) -> &AuditEvent {
        let event = AuditEvent {
            id: self.events.len() as u64 + 1,
            timestamp: Utc::now(),
            actor: actor.to_string(),
            action,
            resource_type: resource_type.to_string(),
            resource_id,
        };
        tracing::info!(
            "audit #{} {} {} {}",
            event.id,
            event.action,
            event.resource_type,
            event.resource_id.as_deref().unwrap_or("-")
        );
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
