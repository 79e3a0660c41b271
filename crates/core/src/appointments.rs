//! Pending appointment book.
//!
//! Approvals close out every pending appointment booked under the approved patient's name.
//! The book is owned by [`crate::patient::PatientStore`] and mutated under the same lock as
//! patient histories.

use chrono::NaiveDate;

/// A pending doctor appointment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appointment {
    pub id: u64,
    /// Patient display name; matched exactly against approvals.
    pub patient: String,
    pub date: NaiveDate,
    pub reason: String,
    pub doctor: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
}

#[derive(Clone, Debug, Default)]
pub struct AppointmentBook {
    pending: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new(pending: Vec<Appointment>) -> Self {
        Self { pending }
    }

    pub fn pending(&self) -> &[Appointment] {
        &self.pending
    }

    /// Remove every pending appointment for `patient`, returning how many were removed.
    pub fn complete_for(&mut self, patient: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|a| a.patient != patient);
        before - self.pending.len()
    }
}
