#![allow(dead_code)]

use chrono::{DateTime, Utc};
use flow_core::{Gender, Patient, PatientStatus, Severity, Study, StudyStatus};

pub fn at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .expect("Mốc thời gian mẫu không hợp lệ")
}

pub fn patient(id: &str, admitted: &str) -> Patient {
    Patient {
        id: id.to_string(),
        name: format!("Patient {id}"),
        age: 54,
        gender: Gender::F,
        diagnosis: "Chest pain".to_string(),
        severity: Severity::Urgent,
        insurance: None,
        room: Some("204".to_string()),
        phone: None,
        status: PatientStatus::Active,
        admission_time: at(admitted),
        assigned_to_doctor_at: None,
        first_study_requested_at: None,
        all_studies_completed_at: None,
        discharged_at: None,
        studies: Vec::new(),
        doctor_id: None,
        doctor: None,
    }
}

pub fn study(id: &str, patient_id: &str, status: StudyStatus, requested: &str) -> Study {
    Study {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        name: format!("Study {id}"),
        study_type: "lab".to_string(),
        status,
        has_alert: false,
        requested_at: at(requested),
        in_progress_at: None,
        completed_at: None,
        reviewed_at: None,
    }
}

/// Ca bệnh mẫu: một xét nghiệm có kết quả bất thường, đã được đọc.
pub fn reviewed_alert_case() -> Patient {
    let mut p = patient("p-1", "2024-01-01T10:00:00Z");
    p.assigned_to_doctor_at = Some(at("2024-01-01T10:10:00Z"));
    p.first_study_requested_at = Some(at("2024-01-01T10:20:00Z"));
    p.all_studies_completed_at = Some(at("2024-01-01T10:40:00Z"));

    let mut s = study("s-1", "p-1", StudyStatus::Completed, "2024-01-01T10:20:00Z");
    s.in_progress_at = Some(at("2024-01-01T10:25:00Z"));
    s.completed_at = Some(at("2024-01-01T10:40:00Z"));
    s.reviewed_at = Some(at("2024-01-01T10:45:00Z"));
    s.has_alert = true;
    p.studies.push(s);
    p
}
