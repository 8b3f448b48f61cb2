use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::duration_minutes;
use crate::model::{Patient, Study};

/// Các chỉ số thời gian tổng hợp, tính bằng phút.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientTimeStats {
    pub total_time: i64,
    pub waiting_for_studies: i64,
    pub waiting_for_review: i64,
    pub studies_in_progress: i64,
    pub average_study_time: i64,
}

/// Tổng hợp thời gian cho màn hình chi tiết bệnh nhân.
///
/// Các xét nghiệm chưa xong được tính tới `now`, nên giá trị tăng dần giữa các lần gọi.
/// `average_study_time` chia tổng thời gian chờ (kể cả xét nghiệm đang chờ) cho số
/// xét nghiệm đã có kết quả.
pub fn compute_stats(
    patient: &Patient,
    studies: &[Study],
    now: DateTime<Utc>,
) -> PatientTimeStats {
    let total_time = duration_minutes(
        patient.admission_time,
        patient.discharged_at.unwrap_or(now),
    );

    let waiting_for_studies: i64 = studies
        .iter()
        .map(|study| duration_minutes(study.requested_at, study.completed_at.unwrap_or(now)))
        .sum();

    let waiting_for_review: i64 = studies
        .iter()
        .filter_map(|study| {
            let completed_at = study.completed_at?;
            Some(duration_minutes(
                completed_at,
                study.reviewed_at.unwrap_or(now),
            ))
        })
        .sum();

    let studies_in_progress: i64 = studies
        .iter()
        .filter_map(|study| match (study.in_progress_at, study.completed_at) {
            (Some(started), Some(completed)) => Some(duration_minutes(started, completed)),
            _ => None,
        })
        .sum();

    let completed = studies
        .iter()
        .filter(|study| study.completed_at.is_some())
        .count() as i64;
    let average_study_time = if completed == 0 {
        0
    } else {
        waiting_for_studies.div_euclid(completed)
    };

    PatientTimeStats {
        total_time,
        waiting_for_studies,
        waiting_for_review,
        studies_in_progress,
        average_study_time,
    }
}
