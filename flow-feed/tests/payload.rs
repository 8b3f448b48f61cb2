use std::fs;

use chrono::{DateTime, Utc};
use flow_core::{patient_detail, FlowError, Stage, TimelineEventKind};
use flow_feed::{parse_patients_str, parse_patients_value};
use serde_json::json;

fn fixture() -> String {
    fs::read_to_string(format!(
        "{}/tests/data/ward_snapshot.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .expect("Không đọc được snapshot mẫu")
}

fn at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .expect("Mốc thời gian không hợp lệ")
}

#[test]
fn decodes_patients_and_resolves_doctors() {
    let patients = parse_patients_str(&fixture()).expect("snapshot hợp lệ");
    assert_eq!(patients.len(), 5);

    let ana = &patients[0];
    assert_eq!(ana.studies.len(), 2);
    assert_eq!(ana.insurance.as_deref(), Some("Medicare"));
    let doctor = ana.doctor.as_ref().expect("bác sĩ đã được gắn");
    assert_eq!(doctor.name, "Dr. Laura Vega");
    assert_eq!(doctor.specialty.as_deref(), Some("Internal Medicine"));

    let chen = &patients[2];
    assert_eq!(
        chen.doctor.as_ref().map(|doctor| doctor.specialty.clone()),
        Some(None)
    );
    assert!(patients[1].doctor.is_none());
}

#[test]
fn embedded_doctor_is_kept() {
    let payload = json!({
        "patients": [{
            "id": "p-1",
            "name": "Test",
            "age": 40,
            "gender": "M",
            "diagnosis": "Fever",
            "severity": "stable",
            "status": "active",
            "admissionTime": "2024-01-01T10:00:00Z",
            "doctorId": "d-1",
            "doctor": { "id": "d-1", "name": "Dr. Embedded" }
        }],
        "doctors": [{ "id": "d-1", "name": "Dr. From List" }]
    });

    let patients = parse_patients_value(&payload).expect("payload hợp lệ");
    assert_eq!(
        patients[0].doctor.as_ref().map(|doctor| doctor.name.as_str()),
        Some("Dr. Embedded")
    );
}

#[test]
fn unknown_doctor_reference_is_left_unresolved() {
    let payload = json!({
        "patients": [{
            "id": "p-1",
            "name": "Test",
            "age": 40,
            "gender": "F",
            "diagnosis": "Fever",
            "severity": "urgent",
            "status": "active",
            "admissionTime": "2024-01-01T10:00:00Z",
            "doctorId": "d-9"
        }],
        "doctors": [{ "id": "d-1", "name": "Dr. Laura Vega" }]
    });

    let patients = parse_patients_value(&payload).expect("payload hợp lệ");
    assert!(patients[0].doctor.is_none());
}

#[test]
fn payload_without_patients_is_missing_data() {
    let err = parse_patients_value(&json!({ "items": [] })).expect_err("thiếu patients");
    assert!(matches!(err, FlowError::MissingData));
}

#[test]
fn malformed_entry_reports_its_index() {
    let payload = json!({
        "patients": [{
            "id": "p-1",
            "name": "Test",
            "age": 40,
            "gender": "M",
            "diagnosis": "Fever",
            "severity": "mild",
            "status": "active",
            "admissionTime": "2024-01-01T10:00:00Z"
        }]
    });

    match parse_patients_value(&payload) {
        Err(FlowError::Parse(message)) => assert!(message.starts_with("patients[0]")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = parse_patients_str("{ not json").expect_err("JSON lỗi");
    assert!(matches!(err, FlowError::Parse(_)));
}

#[test]
fn detail_of_reviewed_patient() {
    let patients = parse_patients_str(&fixture()).expect("snapshot hợp lệ");
    let detail = patient_detail(&patients, "p-300", at("2024-01-01T11:00:00Z"))
        .expect("có bệnh nhân p-300");

    assert_eq!(detail.stage, Stage::InProgress);
    assert_eq!(detail.timeline[1].description, "Assigned to Dr. Sam Patel");

    let kinds: Vec<TimelineEventKind> = detail.timeline.iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TimelineEventKind::Admission,
            TimelineEventKind::DoctorAssigned,
            TimelineEventKind::StudyRequested,
            TimelineEventKind::StudyInProgress,
            TimelineEventKind::StudyCompleted,
            TimelineEventKind::AllCompleted,
            TimelineEventKind::StudyReviewed,
        ]
    );
    let durations: Vec<i64> = detail
        .timeline
        .iter()
        .map(|event| event.duration_minutes)
        .collect();
    assert_eq!(durations, vec![0, 5, 5, 10, 70, -15, 15]);

    assert_eq!(detail.stats.total_time, 240);
    assert_eq!(detail.stats.waiting_for_studies, 80);
    assert_eq!(detail.stats.waiting_for_review, 15);
    assert_eq!(detail.stats.studies_in_progress, 70);
    assert_eq!(detail.stats.average_study_time, 80);
}
