//! Logic lõi phân loại giai đoạn điều trị và dựng timeline bệnh nhân.
//!
//! Mọi hàm trong crate đều thuần: nhận snapshot bất biến, trả về dữ liệu dẫn xuất,
//! không đọc đồng hồ hệ thống và không thực hiện I/O.

use serde::{Deserialize, Serialize};

mod board;
mod duration;
mod model;
mod stage;
mod stats;
mod timeline;

pub use board::{
    patient_detail, summarize_board, BoardCard, BoardColumn, BoardSnapshot, PatientDetail,
};
pub use duration::{duration_minutes, format_duration};
pub use model::{Doctor, Gender, Patient, PatientStatus, Severity, Study, StudyStatus};
pub use stage::{classify_stage, group_by_stage, stage_anchor, time_in_stage, Stage};
pub use stats::{compute_stats, PatientTimeStats};
pub use timeline::{build_timeline, TimelineEvent, TimelineEventKind};

/// Chu kỳ làm mới mặc định của bảng (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Cấu hình cho lớp lấy dữ liệu định kỳ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowConfig {
    /// Khoảng thời gian giữa hai lần tải snapshot.
    pub poll_interval_ms: u64,
    /// Số lần tải lỗi liên tiếp trước khi bỏ snapshot cũ (0 = giữ mãi).
    pub max_retained_failures: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_retained_failures: 0,
        }
    }
}

/// Lỗi chung khi đọc hoặc tra cứu dữ liệu bệnh nhân.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Nguồn dữ liệu lỗi: {0}")]
    Source(String),
    #[error("Không tìm thấy bệnh nhân {0}")]
    NotFound(String),
    #[error("Lỗi khác: {0}")]
    Other(String),
}
