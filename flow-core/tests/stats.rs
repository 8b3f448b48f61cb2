mod common;

use common::{at, patient, reviewed_alert_case, study};
use flow_core::{compute_stats, PatientTimeStats, StudyStatus};

#[test]
fn reviewed_alert_case_stats() {
    let p = reviewed_alert_case();
    let stats = compute_stats(&p, &p.studies, at("2024-01-01T11:00:00Z"));

    assert_eq!(
        stats,
        PatientTimeStats {
            total_time: 60,
            waiting_for_studies: 20,
            waiting_for_review: 5,
            studies_in_progress: 15,
            average_study_time: 20,
        }
    );
}

#[test]
fn no_completed_studies_means_zero_average() {
    let mut p = patient("p-1", "2024-01-01T10:00:00Z");
    p.studies
        .push(study("s-1", "p-1", StudyStatus::Requested, "2024-01-01T10:15:00Z"));

    let stats = compute_stats(&p, &p.studies, at("2024-01-01T10:45:00Z"));
    assert_eq!(stats.average_study_time, 0);
    // Xét nghiệm đang chờ vẫn được tính tới `now`.
    assert_eq!(stats.waiting_for_studies, 30);
    assert_eq!(stats.waiting_for_review, 0);
    assert_eq!(stats.studies_in_progress, 0);
}

#[test]
fn single_completed_study_average() {
    let mut p = patient("p-1", "2024-01-01T10:00:00Z");
    let mut s = study("s-1", "p-1", StudyStatus::Completed, "2024-01-01T10:00:00Z");
    s.completed_at = Some(at("2024-01-01T10:30:00Z"));
    p.studies.push(s);

    let stats = compute_stats(&p, &p.studies, at("2024-01-01T11:00:00Z"));
    assert_eq!(stats.average_study_time, 30);
    // Chưa đọc kết quả: chờ tính tới `now`.
    assert_eq!(stats.waiting_for_review, 30);
}

#[test]
fn pending_studies_inflate_the_average() {
    let mut p = patient("p-1", "2024-01-01T10:00:00Z");
    let mut done = study("s-1", "p-1", StudyStatus::Completed, "2024-01-01T10:00:00Z");
    done.completed_at = Some(at("2024-01-01T10:20:00Z"));
    let waiting = study("s-2", "p-1", StudyStatus::PendingResult, "2024-01-01T10:00:00Z");
    p.studies = vec![done, waiting];

    let stats = compute_stats(&p, &p.studies, at("2024-01-01T10:45:00Z"));
    assert_eq!(stats.waiting_for_studies, 65);
    assert_eq!(stats.average_study_time, 65);
}

#[test]
fn discharge_closes_total_time() {
    let mut p = reviewed_alert_case();
    p.discharged_at = Some(at("2024-01-01T13:30:00Z"));

    let stats = compute_stats(&p, &p.studies, at("2024-01-02T09:00:00Z"));
    assert_eq!(stats.total_time, 210);
}

#[test]
fn monotonic_input_never_goes_negative() {
    let p = reviewed_alert_case();
    let stats = compute_stats(&p, &p.studies, at("2024-01-01T10:45:00Z"));
    assert!(stats.total_time >= 0);
    assert!(stats.waiting_for_studies >= 0);
    assert!(stats.waiting_for_review >= 0);
    assert!(stats.studies_in_progress >= 0);
}

#[test]
fn stats_serialize_in_camel_case() {
    let value = serde_json::to_value(PatientTimeStats::default()).expect("serialize");
    assert_eq!(value["averageStudyTime"], 0);
    assert_eq!(value["waitingForReview"], 0);
}
