//! Phân loại bệnh nhân vào một trong sáu cột của bảng kanban.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::duration_minutes;
use crate::model::{Patient, Study, StudyStatus};

/// Giai đoạn điều trị hiện tại. Thứ tự khai báo là thứ tự cột trên bảng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Admission,
    WaitingDoctor,
    InStudies,
    ResultsReady,
    InProgress,
    Discharge,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Admission,
        Stage::WaitingDoctor,
        Stage::InStudies,
        Stage::ResultsReady,
        Stage::InProgress,
        Stage::Discharge,
    ];

    /// Khóa dạng snake_case, trùng với giá trị serialize.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Admission => "admission",
            Stage::WaitingDoctor => "waiting_doctor",
            Stage::InStudies => "in_studies",
            Stage::ResultsReady => "results_ready",
            Stage::InProgress => "in_progress",
            Stage::Discharge => "discharge",
        }
    }

    /// Tiêu đề cột.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Admission => "Admission",
            Stage::WaitingDoctor => "Waiting for Doctor",
            Stage::InStudies => "In Studies",
            Stage::ResultsReady => "Results Ready",
            Stage::InProgress => "In Progress",
            Stage::Discharge => "Discharged",
        }
    }
}

/// Xác định giai đoạn theo chuỗi quy tắc có thứ tự; quy tắc đầu tiên khớp sẽ thắng.
pub fn classify_stage(patient: &Patient) -> Stage {
    if patient.is_discharged() {
        return Stage::Discharge;
    }
    if patient.assigned_to_doctor_at.is_none() {
        return Stage::Admission;
    }
    if patient.studies.is_empty() {
        return Stage::WaitingDoctor;
    }
    if patient.studies.iter().any(Study::is_pending) {
        return Stage::InStudies;
    }

    let all_completed = patient
        .studies
        .iter()
        .all(|study| study.status == StudyStatus::Completed);

    match (all_completed, patient.all_studies_completed_at) {
        (true, None) => Stage::ResultsReady,
        (true, Some(_)) => Stage::InProgress,
        // Không quy tắc nào khớp: mặc định là chờ bác sĩ.
        (false, _) => Stage::WaitingDoctor,
    }
}

/// Thời điểm bắt đầu giai đoạn hiện tại.
///
/// Trả về `None` khi đã xuất viện, hoặc khi ở `ResultsReady` mà không xét nghiệm nào
/// có `completed_at`.
pub fn stage_anchor(patient: &Patient) -> Option<DateTime<Utc>> {
    anchor_for(patient, classify_stage(patient))
}

/// Số phút bệnh nhân đã ở trong giai đoạn hiện tại tính tới `now`.
///
/// Với `ResultsReady` không có mốc hoàn thành nào, mốc được coi là epoch (1970) nên
/// kết quả rất lớn; bảng hiển thị dùng [`stage_anchor`] để tránh giá trị này.
pub fn time_in_stage(patient: &Patient, now: DateTime<Utc>) -> i64 {
    match classify_stage(patient) {
        Stage::Discharge => 0,
        stage => {
            let anchor = anchor_for(patient, stage).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            duration_minutes(anchor, now)
        }
    }
}

/// Chia bệnh nhân theo giai đoạn, giữ nguyên thứ tự đầu vào trong từng cột.
/// Luôn có đủ sáu khóa, kể cả cột rỗng.
pub fn group_by_stage(patients: &[Patient]) -> BTreeMap<Stage, Vec<&Patient>> {
    let mut groups: BTreeMap<Stage, Vec<&Patient>> =
        Stage::ALL.iter().map(|stage| (*stage, Vec::new())).collect();

    for patient in patients {
        groups
            .entry(classify_stage(patient))
            .or_default()
            .push(patient);
    }

    groups
}

fn anchor_for(patient: &Patient, stage: Stage) -> Option<DateTime<Utc>> {
    match stage {
        Stage::Admission => Some(patient.admission_time),
        Stage::WaitingDoctor => Some(
            patient
                .assigned_to_doctor_at
                .unwrap_or(patient.admission_time),
        ),
        Stage::InStudies => Some(
            patient
                .first_study_requested_at
                .unwrap_or(patient.admission_time),
        ),
        Stage::ResultsReady => latest_completion(patient),
        Stage::InProgress => Some(
            patient
                .all_studies_completed_at
                .unwrap_or(patient.admission_time),
        ),
        Stage::Discharge => None,
    }
}

fn latest_completion(patient: &Patient) -> Option<DateTime<Utc>> {
    patient
        .studies
        .iter()
        .filter_map(|study| study.completed_at)
        .max()
}
