//! Demo data loaded when `AROGYA_SEED_DEMO_DATA` is enabled.
//!
//! Ten patients (all with the password `password123`) and two pending appointments.
//! Ram Singh's second entry is a legacy diagnosis without a catalog code.

use crate::appointments::Appointment;
use crate::patient::{Credential, Patient, RecordEntry};
use chrono::NaiveDate;

const DEMO_PASSWORD: &str = "password123";

// Typos land on `NaiveDate::MIN`, which the seed tests reject.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn coded(day: NaiveDate, term: &str, code: &str, catalog_code: &str, note: &str) -> RecordEntry {
    RecordEntry {
        date: day,
        diagnosis_term: term.into(),
        code: code.into(),
        catalog_code: Some(catalog_code.into()),
        note: note.into(),
    }
}

fn patient(name: &str, email: &str, history: Vec<RecordEntry>) -> Patient {
    Patient::with_history(name, email, Credential::new(DEMO_PASSWORD), history)
}

pub(crate) fn demo_patients() -> Vec<Patient> {
    const JWARA: &str = "Jwara (ज्वर)";
    const AMLAPITTA: &str = "Amlapitta (अम्लपित्त)";
    const GUNMAM: &str = "Gunmam (குன்மம்)";
    const NAZLA: &str = "Nazla (نزلہ)";
    const FEVER: &str = "Fever, coded using NAMASTE: AYA0001.";
    const HYPERACIDITY: &str = "Hyperacidity, coded using NAMASTE: AYA0002.";
    const MASS: &str = "Abdominal mass/Gaseous distension, coded using NAMASTE: SID0003.";
    const COLD: &str = "Common Cold/Catarrh, coded using NAMASTE: UNI0004.";

    vec![
        patient(
            "Ram Singh",
            "ram@test.com",
            vec![
                coded(date(2025, 9, 20), JWARA, "AAY.2.3.1", "AYA0001", FEVER),
                RecordEntry {
                    date: date(2025, 9, 10),
                    diagnosis_term: "Atisara".into(),
                    code: "AAY.2.3.2".into(),
                    catalog_code: None,
                    note: "Diarrhea, linked to impaired digestive function (Legacy Code).".into(),
                },
            ],
        ),
        patient(
            "Shyam Sharma",
            "shyam@test.com",
            vec![coded(date(2025, 9, 25), AMLAPITTA, "AAY.2.1.1", "AYA0002", HYPERACIDITY)],
        ),
        patient(
            "Priya Verma",
            "priya@test.com",
            vec![coded(date(2025, 10, 1), AMLAPITTA, "AAY.2.1.2", "AYA0002", HYPERACIDITY)],
        ),
        patient(
            "Rohan Gupta",
            "rohan@test.com",
            vec![coded(date(2025, 10, 5), JWARA, "AAY.2.3.3", "AYA0001", FEVER)],
        ),
        patient(
            "Fatima Khan",
            "fatima@test.com",
            vec![coded(date(2025, 10, 10), GUNMAM, "SID.3.1.1", "SID0003", MASS)],
        ),
        patient(
            "David Raj",
            "david@test.com",
            vec![coded(date(2025, 10, 15), NAZLA, "UNI.4.1.1", "UNI0004", COLD)],
        ),
        patient(
            "Anita Desai",
            "anita@test.com",
            vec![coded(date(2025, 10, 18), JWARA, "AAY.2.3.4", "AYA0001", FEVER)],
        ),
        patient(
            "Vikram Joshi",
            "vikram@test.com",
            vec![coded(date(2025, 10, 22), AMLAPITTA, "AAY.2.1.3", "AYA0002", HYPERACIDITY)],
        ),
        patient(
            "Sneha Nair",
            "sneha@test.com",
            vec![coded(date(2025, 10, 25), GUNMAM, "SID.3.1.2", "SID0003", MASS)],
        ),
        patient(
            "Anish Singh",
            "anish@test.com",
            vec![coded(date(2025, 10, 28), NAZLA, "UNI.4.1.2", "UNI0004", COLD)],
        ),
    ]
}

pub(crate) fn demo_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: 1,
            patient: "Ram Singh".into(),
            date: date(2025, 10, 1),
            reason: "Follow up for Jwara".into(),
            doctor: "Dr. Sharma".into(),
            age: 45,
            gender: "M".into(),
            contact: "98765-XXXXX".into(),
        },
        Appointment {
            id: 2,
            patient: "Priya Verma".into(),
            date: date(2025, 10, 2),
            reason: "New skin rash".into(),
            doctor: "Dr. Sharma".into(),
            age: 28,
            gender: "F".into(),
            contact: "99887-XXXXX".into(),
        },
    ]
}
