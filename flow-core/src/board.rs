//! Mô hình hiển thị cho bảng kanban và màn hình chi tiết.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{duration_minutes, format_duration};
use crate::model::{Patient, Severity};
use crate::stage::{classify_stage, group_by_stage, stage_anchor, Stage};
use crate::stats::{compute_stats, PatientTimeStats};
use crate::timeline::{build_timeline, TimelineEvent};
use crate::FlowError;

/// Thẻ bệnh nhân trên bảng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardCard {
    pub patient_id: String,
    pub name: String,
    pub severity: Severity,
    pub room: Option<String>,
    pub diagnosis: String,
    /// `None` khi giai đoạn không có mốc bắt đầu hợp lệ.
    pub minutes_in_stage: Option<i64>,
    pub time_in_stage: String,
    pub studies_pending: usize,
    pub studies_completed: usize,
    pub has_alert: bool,
}

impl BoardCard {
    fn from_patient(patient: &Patient, now: DateTime<Utc>) -> Self {
        let minutes_in_stage = stage_anchor(patient).map(|anchor| duration_minutes(anchor, now));
        Self {
            patient_id: patient.id.clone(),
            name: patient.name.clone(),
            severity: patient.severity,
            room: patient.room.clone(),
            diagnosis: patient.diagnosis.clone(),
            minutes_in_stage,
            time_in_stage: minutes_in_stage
                .map(format_duration)
                .unwrap_or_else(|| "--".to_string()),
            studies_pending: patient.pending_studies(),
            studies_completed: patient.completed_studies(),
            has_alert: patient.has_alert(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardColumn {
    pub stage: Stage,
    pub label: String,
    pub cards: Vec<BoardCard>,
}

/// Toàn bộ bảng tại thời điểm `generated_at`, đủ sáu cột theo thứ tự.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<BoardColumn>,
}

impl BoardSnapshot {
    /// Truy cập cột theo giai đoạn.
    pub fn column(&self, stage: Stage) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.stage == stage)
    }

    pub fn total_patients(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }
}

/// Dữ liệu cho màn hình chi tiết một bệnh nhân.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDetail {
    pub patient: Patient,
    pub stage: Stage,
    pub minutes_in_stage: Option<i64>,
    pub timeline: Vec<TimelineEvent>,
    pub stats: PatientTimeStats,
}

/// Dựng bảng kanban từ snapshot bệnh nhân.
pub fn summarize_board(patients: &[Patient], now: DateTime<Utc>) -> BoardSnapshot {
    let columns = group_by_stage(patients)
        .into_iter()
        .map(|(stage, members)| BoardColumn {
            stage,
            label: stage.label().to_string(),
            cards: members
                .into_iter()
                .map(|patient| BoardCard::from_patient(patient, now))
                .collect(),
        })
        .collect();

    BoardSnapshot {
        generated_at: now,
        columns,
    }
}

/// Tra cứu bệnh nhân theo id và dựng timeline cùng thống kê thời gian.
pub fn patient_detail(
    patients: &[Patient],
    patient_id: &str,
    now: DateTime<Utc>,
) -> Result<PatientDetail, FlowError> {
    let patient = patients
        .iter()
        .find(|patient| patient.id == patient_id)
        .ok_or_else(|| FlowError::NotFound(patient_id.to_string()))?;

    Ok(PatientDetail {
        patient: patient.clone(),
        stage: classify_stage(patient),
        minutes_in_stage: stage_anchor(patient).map(|anchor| duration_minutes(anchor, now)),
        timeline: build_timeline(patient, &patient.studies),
        stats: compute_stats(patient, &patient.studies, now),
    })
}
