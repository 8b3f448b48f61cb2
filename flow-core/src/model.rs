//! Thực thể bệnh nhân, xét nghiệm và bác sĩ do nguồn dữ liệu bên ngoài cung cấp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
}

/// Mức độ nặng lâm sàng của bệnh nhân.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Urgent,
    Stable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Discharged,
}

/// Trạng thái của một chỉ định xét nghiệm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    Requested,
    PendingResult,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Một chỉ định xét nghiệm/chẩn đoán hình ảnh thuộc về đúng một bệnh nhân.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub id: String,
    pub patient_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub study_type: String,
    pub status: StudyStatus,
    /// Kết quả bất thường.
    #[serde(default)]
    pub has_alert: bool,
    pub requested_at: DateTime<Utc>,
    #[serde(default)]
    pub in_progress_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Study {
    /// Xét nghiệm chưa có kết quả (đã chỉ định hoặc đang chờ kết quả).
    pub fn is_pending(&self) -> bool {
        matches!(
            self.status,
            StudyStatus::Requested | StudyStatus::PendingResult
        )
    }
}

/// Snapshot bệnh nhân tại một thời điểm, kèm danh sách xét nghiệm theo thứ tự chèn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diagnosis: String,
    pub severity: Severity,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: PatientStatus,
    pub admission_time: DateTime<Utc>,
    #[serde(default)]
    pub assigned_to_doctor_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_study_requested_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_studies_completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discharged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub studies: Vec<Study>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub doctor: Option<Doctor>,
}

impl Patient {
    pub fn is_discharged(&self) -> bool {
        self.status == PatientStatus::Discharged
    }

    pub fn pending_studies(&self) -> usize {
        self.studies.iter().filter(|study| study.is_pending()).count()
    }

    pub fn completed_studies(&self) -> usize {
        self.studies
            .iter()
            .filter(|study| study.status == StudyStatus::Completed)
            .count()
    }

    /// Có ít nhất một kết quả bất thường.
    pub fn has_alert(&self) -> bool {
        self.studies.iter().any(|study| study.has_alert)
    }
}
