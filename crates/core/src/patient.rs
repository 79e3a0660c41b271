//! Patient record store.
//!
//! Holds patient profiles and their append-only diagnosis histories, plus the pending
//! appointment book that approvals close out and the audit trail both of them write to.
//!
//! ## Identity
//!
//! - `email` is the login identity and is unique across the store.
//! - `name` is the lookup key for history and approvals. It is **not** unique; lookups return
//!   the first patient in registration order.
//!
//! ## Concurrency
//!
//! All mutable state sits behind a single `RwLock`. `register` and `approve` hold the write
//! lock for their whole check-then-mutate sequence, so uniqueness and append-only invariants
//! hold under concurrent callers. The catalog is immutable and read without locking.

use crate::appointments::{Appointment, AppointmentBook};
use crate::audit::{AuditAction, AuditEvent, AuditLog};
use crate::catalog::Catalog;
use crate::constants::{
    APPROVAL_NOTE_PREFIX, AUDIT_ACTOR_PORTAL, AUDIT_ACTOR_SYSTEM, AUDIT_RESOURCE_CODE_SYSTEM,
    AUDIT_RESOURCE_CONDITION, MSG_APPROVAL_FIELDS_REQUIRED, MSG_REGISTRATION_FIELDS_REQUIRED,
};
use crate::validation::require_all;
use crate::{PortalError, PortalResult};
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One diagnosis in a patient's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    pub date: NaiveDate,
    /// Term text copied from the catalog when the entry was written.
    pub diagnosis_term: String,
    /// Free-form code; legacy entries carry pre-catalog codes here.
    pub code: String,
    /// Catalog code, `None` for legacy diagnoses.
    pub catalog_code: Option<String>,
    pub note: String,
}

/// Opaque login secret.
///
/// Compared by exact equality. Swapping in a salted hash only changes [`Credential::matches`].
#[derive(Clone)]
pub(crate) struct Credential(String);

impl Credential {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A registered patient. Only the store can construct or mutate one.
#[derive(Clone, Debug)]
pub(crate) struct Patient {
    name: String,
    email: String,
    credential: Credential,
    history: Vec<RecordEntry>,
}

impl Patient {
    pub(crate) fn with_history(
        name: impl Into<String>,
        email: impl Into<String>,
        credential: Credential,
        history: Vec<RecordEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential,
            history,
        }
    }

    fn profile(&self) -> PatientProfile {
        PatientProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            history: self.history.clone(),
        }
    }
}

/// Public view of a patient. Never carries the credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientProfile {
    pub name: String,
    pub email: String,
    pub history: Vec<RecordEntry>,
}

/// Result of a successful approval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approval {
    /// Human-readable confirmation.
    pub message: String,
    /// Patient as it looks after the append.
    pub patient: PatientProfile,
    /// The appended entry.
    pub entry: RecordEntry,
    /// Number of pending appointments closed for this patient.
    pub appointments_closed: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    patients: Vec<Patient>,
    appointments: AppointmentBook,
    audit: AuditLog,
}

/// In-memory patient store bound to a catalog.
#[derive(Debug)]
pub struct PatientStore {
    catalog: Arc<Catalog>,
    state: RwLock<StoreState>,
}

impl PatientStore {
    /// Creates an empty store.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_records(catalog, Vec::new(), Vec::new())
    }

    /// Creates a store populated with the demo patients and pending appointments.
    pub fn seeded(catalog: Arc<Catalog>) -> Self {
        Self::with_records(
            catalog,
            crate::seed::demo_patients(),
            crate::seed::demo_appointments(),
        )
    }

    pub(crate) fn with_records(
        catalog: Arc<Catalog>,
        patients: Vec<Patient>,
        appointments: Vec<Appointment>,
    ) -> Self {
        let mut audit = AuditLog::new();
        audit.record(
            AUDIT_ACTOR_SYSTEM,
            AuditAction::NamasteIngest,
            AUDIT_RESOURCE_CODE_SYSTEM,
            Some(fhir::codesystem::CODE_SYSTEM_ID.to_string()),
        );

        Self {
            catalog,
            state: RwLock::new(StoreState {
                patients,
                appointments: AppointmentBook::new(appointments),
                audit,
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registers a new patient with an empty history.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if any field is empty
    /// - `DuplicateIdentity` if the email is already registered (exact match)
    pub fn register(
        &self,
        name: &str,
        email: &str,
        credential: &str,
    ) -> PortalResult<PatientProfile> {
        require_all(&[name, email, credential], MSG_REGISTRATION_FIELDS_REQUIRED)?;

        let mut state = self.write()?;
        if state.patients.iter().any(|p| p.email == email) {
            return Err(PortalError::DuplicateIdentity);
        }

        let patient = Patient::with_history(name, email, Credential::new(credential), Vec::new());
        let profile = patient.profile();
        state.patients.push(patient);

        tracing::info!("registered patient {} ({})", name, email);
        Ok(profile)
    }

    /// Checks an email/credential pair by exact equality.
    pub fn authenticate(&self, email: &str, credential: &str) -> PortalResult<PatientProfile> {
        let state = self.read()?;
        state
            .patients
            .iter()
            .find(|p| p.email == email && p.credential.matches(credential))
            .map(Patient::profile)
            .ok_or(PortalError::InvalidCredentials)
    }

    /// Returns the first patient registered under `name`.
    pub fn get_history(&self, name: &str) -> PortalResult<PatientProfile> {
        let state = self.read()?;
        state
            .patients
            .iter()
            .find(|p| p.name == name)
            .map(Patient::profile)
            .ok_or(PortalError::NotFound)
    }

    /// Attaches the catalog diagnosis `catalog_code` to the patient's history, dated today.
    ///
    /// Also closes every pending appointment booked under `patient_name` and records one
    /// `PROBLEM_CREATE` audit row.
    ///
    /// # Errors
    ///
    /// Checked in this order, before anything is mutated:
    /// - `InvalidInput` if either argument is empty
    /// - `CodeNotFound` if no catalog entry has exactly this code
    /// - `PatientNotFound` if no patient has this name
    pub fn approve(&self, patient_name: &str, catalog_code: &str) -> PortalResult<Approval> {
        self.approve_on(patient_name, catalog_code, Utc::now().date_naive())
    }

    fn approve_on(
        &self,
        patient_name: &str,
        catalog_code: &str,
        date: NaiveDate,
    ) -> PortalResult<Approval> {
        require_all(&[patient_name, catalog_code], MSG_APPROVAL_FIELDS_REQUIRED)?;

        let diagnosis = self
            .catalog
            .find(catalog_code)
            .ok_or(PortalError::CodeNotFound)?;

        let mut state = self.write()?;
        let patient = state
            .patients
            .iter_mut()
            .find(|p| p.name == patient_name)
            .ok_or(PortalError::PatientNotFound)?;

        let entry = RecordEntry {
            date,
            diagnosis_term: diagnosis.term.clone(),
            code: catalog_code.to_string(),
            catalog_code: Some(catalog_code.to_string()),
            note: format!("{APPROVAL_NOTE_PREFIX}{}", diagnosis.definition),
        };
        patient.history.push(entry.clone());
        let profile = patient.profile();

        state.audit.record(
            AUDIT_ACTOR_PORTAL,
            AuditAction::ProblemCreate,
            AUDIT_RESOURCE_CONDITION,
            Some(profile.email.clone()),
        );

        let appointments_closed = state.appointments.complete_for(patient_name);
        if appointments_closed > 0 {
            tracing::info!(
                "closed {} pending appointment(s) for {}",
                appointments_closed,
                patient_name
            );
        }

        tracing::info!(
            "NAMASTE diagnosis for {}: {} (code: {})",
            patient_name,
            diagnosis.term,
            catalog_code
        );

        Ok(Approval {
            message: format!(
                "NAMASTE diagnosis '{}' added for {}. Appointment marked complete.",
                diagnosis.term, patient_name
            ),
            patient: profile,
            entry,
            appointments_closed,
        })
    }

    /// All patients in registration order.
    pub fn list_patients(&self) -> PortalResult<Vec<PatientProfile>> {
        let state = self.read()?;
        Ok(state.patients.iter().map(Patient::profile).collect())
    }

    /// Appointments still awaiting approval.
    pub fn pending_appointments(&self) -> PortalResult<Vec<Appointment>> {
        let state = self.read()?;
        Ok(state.appointments.pending().to_vec())
    }

    /// Audit rows, oldest first.
    pub fn audit_log(&self) -> PortalResult<Vec<AuditEvent>> {
        let state = self.read()?;
        Ok(state.audit.events().to_vec())
    }

    fn read(&self) -> PortalResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| {
            tracing::error!("patient store lock poisoned");
            PortalError::StoreUnavailable
        })
    }

    fn write(&self) -> PortalResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| {
            tracing::error!("patient store lock poisoned");
            PortalError::StoreUnavailable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PatientStore {
        PatientStore::seeded(Arc::new(Catalog::seeded()))
    }

    fn empty() -> PatientStore {
        PatientStore::new(Arc::new(Catalog::seeded()))
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn register_then_authenticate() {
        let store = empty();
        let created = store
            .register("Meera Iyer", "meera@test.com", "s3cret")
            .expect("should register");
        assert_eq!(created.name, "Meera Iyer");
        assert!(created.history.is_empty());

        let profile = store
            .authenticate("meera@test.com", "s3cret")
            .expect("should authenticate");
        assert_eq!(profile.email, "meera@test.com");
    }

    #[test]
    fn authenticate_rejects_wrong_credential() {
        let store = empty();
        store.register("Meera Iyer", "meera@test.com", "s3cret").unwrap();

        for (email, credential) in [
            ("meera@test.com", "wrong"),
            ("meera@test.com", "S3CRET"),
            ("MEERA@test.com", "s3cret"),
            ("", ""),
        ] {
            let err = store.authenticate(email, credential).expect_err("should fail");
            assert!(matches!(err, PortalError::InvalidCredentials));
        }
    }

    #[test]
    fn register_rejects_empty_fields() {
        let store = empty();
        for (name, email, credential) in [
            ("", "a@test.com", "pw"),
            ("A", "", "pw"),
            ("A", "a@test.com", ""),
        ] {
            let err = store
                .register(name, email, credential)
                .expect_err("should reject");
            match err {
                PortalError::InvalidInput(msg) => {
                    assert_eq!(msg, MSG_REGISTRATION_FIELDS_REQUIRED)
                }
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
        assert!(store.list_patients().unwrap().is_empty());
    }

    #[test]
    fn register_accepts_whitespace_only_values() {
        let store = empty();
        let created = store
            .register(" ", "ws@test.com", " ")
            .expect("whitespace is content");
        assert_eq!(created.name, " ");
        assert!(store.authenticate("ws@test.com", " ").is_ok());
        assert!(store.authenticate("ws@test.com", "").is_err());
    }

    #[test]
    fn duplicate_email_leaves_existing_patient_untouched() {
        let store = seeded();
        let before = store.get_history("Ram Singh").unwrap();

        let err = store
            .register("Impostor", "ram@test.com", "other")
            .expect_err("should reject duplicate");
        assert!(matches!(err, PortalError::DuplicateIdentity));

        assert_eq!(store.get_history("Ram Singh").unwrap(), before);
        assert!(store.authenticate("ram@test.com", "password123").is_ok());
        assert!(store.authenticate("ram@test.com", "other").is_err());
        assert_eq!(store.list_patients().unwrap().len(), 10);
    }

    #[test]
    fn get_history_is_exact_and_returns_first_match() {
        let store = empty();
        store.register("Asha", "asha1@test.com", "pw").unwrap();
        store.register("Asha", "asha2@test.com", "pw").unwrap();

        let profile = store.get_history("Asha").unwrap();
        assert_eq!(profile.email, "asha1@test.com");

        assert!(matches!(
            store.get_history("asha"),
            Err(PortalError::NotFound)
        ));
    }

    #[test]
    fn approve_appends_exactly_one_entry() {
        let store = seeded();
        let before = store.get_history("Ram Singh").unwrap();
        assert_eq!(before.history.len(), 2);

        let approval = store
            .approve_on("Ram Singh", "AYA0001", day())
            .expect("should approve");

        let after = store.get_history("Ram Singh").unwrap();
        assert_eq!(after.history.len(), 3);
        assert_eq!(&after.history[..2], &before.history[..]);

        let last = after.history.last().unwrap();
        assert_eq!(last, &approval.entry);
        assert_eq!(last.catalog_code.as_deref(), Some("AYA0001"));
        assert_eq!(last.code, "AYA0001");
        assert_eq!(last.diagnosis_term, "Jwara (ज्वर)");
        assert_eq!(last.date, day());
        assert_eq!(
            last.note,
            "NAMASTE Code: Fever, a symptom of imbalance (Ayurveda)."
        );
        assert_eq!(
            approval.message,
            "NAMASTE diagnosis 'Jwara (ज्वर)' added for Ram Singh. Appointment marked complete."
        );
        assert_eq!(approval.patient, after);
    }

    #[test]
    fn approve_closes_pending_appointments() {
        let store = seeded();
        assert_eq!(store.pending_appointments().unwrap().len(), 2);

        let approval = store.approve("Ram Singh", "AYA0002").unwrap();
        assert_eq!(approval.appointments_closed, 1);

        let pending = store.pending_appointments().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].patient, "Priya Verma");

        let again = store.approve("Ram Singh", "AYA0002").unwrap();
        assert_eq!(again.appointments_closed, 0);
    }

    #[test]
    fn approve_with_unknown_code_leaves_history_unchanged() {
        let store = seeded();
        let before = store.get_history("Ram Singh").unwrap();

        let err = store
            .approve("Ram Singh", "AYA9999")
            .expect_err("should reject");
        assert!(matches!(err, PortalError::CodeNotFound));

        // substring of a real code is still not a match
        assert!(matches!(
            store.approve("Ram Singh", "AYA"),
            Err(PortalError::CodeNotFound)
        ));

        assert_eq!(store.get_history("Ram Singh").unwrap(), before);
        assert_eq!(store.pending_appointments().unwrap().len(), 2);
    }

    #[test]
    fn approve_with_unknown_patient_fails() {
        let store = seeded();
        let err = store
            .approve("Nobody", "AYA0001")
            .expect_err("should reject");
        assert!(matches!(err, PortalError::PatientNotFound));
    }

    #[test]
    fn approve_checks_code_before_patient() {
        let store = seeded();
        let err = store.approve("Nobody", "NOPE").expect_err("should reject");
        assert!(matches!(err, PortalError::CodeNotFound));
    }

    #[test]
    fn approve_rejects_empty_arguments() {
        let store = seeded();
        for (name, code) in [("", "AYA0001"), ("Ram Singh", ""), ("", "")] {
            let err = store.approve(name, code).expect_err("should reject");
            match err {
                PortalError::InvalidInput(msg) => assert_eq!(msg, MSG_APPROVAL_FIELDS_REQUIRED),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn approve_with_whitespace_name_looks_up_patient() {
        let store = seeded();
        let err = store.approve(" ", "AYA0001").expect_err("no such patient");
        assert!(matches!(err, PortalError::PatientNotFound));

        let err = store.approve("Ram Singh", " ").expect_err("no such code");
        assert!(matches!(err, PortalError::CodeNotFound));
    }

    #[test]
    fn new_store_records_catalog_ingest() {
        let events = empty().audit_log().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, AuditAction::NamasteIngest);
        assert_eq!(events[0].resource_type, "CodeSystem");
        assert_eq!(events[0].resource_id.as_deref(), Some("namaste-ayush"));
    }

    #[test]
    fn approval_adds_exactly_one_audit_row() {
        let store = seeded();
        let before = store.audit_log().unwrap();

        store.approve_on("Ram Singh", "AYA0001", day()).unwrap();

        let after = store.audit_log().unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);

        let row = after.last().unwrap();
        assert_eq!(row.action, AuditAction::ProblemCreate);
        assert_eq!(row.actor, "portal");
        assert_eq!(row.resource_type, "Condition");
        assert_eq!(row.resource_id.as_deref(), Some("ram@test.com"));
        assert_eq!(row.id, after.len() as u64);
    }

    #[test]
    fn failed_approval_and_registration_leave_audit_untouched() {
        let store = seeded();
        let before = store.audit_log().unwrap().len();

        assert!(store.approve("Ram Singh", "NOPE").is_err());
        assert!(store.approve("Nobody", "AYA0001").is_err());
        store.register("Meera", "meera@test.com", "pw").unwrap();

        assert_eq!(store.audit_log().unwrap().len(), before);
    }

    #[test]
    fn approve_targets_first_patient_with_shared_name() {
        let store = empty();
        store.register("Asha", "asha1@test.com", "pw").unwrap();
        store.register("Asha", "asha2@test.com", "pw").unwrap();

        store.approve("Asha", "UNI0004").unwrap();

        let patients = store.list_patients().unwrap();
        assert_eq!(patients[0].history.len(), 1);
        assert!(patients[1].history.is_empty());
    }

    #[test]
    fn history_snapshot_is_not_a_live_reference() {
        let store = seeded();
        let snapshot = store.get_history("Priya Verma").unwrap();
        store.approve("Priya Verma", "SID0003").unwrap();
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(store.get_history("Priya Verma").unwrap().history.len(), 2);
    }

    #[test]
    fn credential_debug_is_redacted() {
        let debug = format!("{:?}", Credential::new("password123"));
        assert!(!debug.contains("password123"));
    }

    #[test]
    fn concurrent_registrations_keep_emails_unique() {
        let store = Arc::new(empty());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .register(&format!("P{i}"), "same@test.com", "pw")
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.list_patients().unwrap().len(), 1);
    }
}
