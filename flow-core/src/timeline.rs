//! Dựng lại chuỗi sự kiện lâm sàng của một bệnh nhân.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{duration_minutes, format_duration};
use crate::model::{Patient, Study};

/// Loại sự kiện trên timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Admission,
    DoctorAssigned,
    StudyRequested,
    StudyInProgress,
    StudyCompleted,
    StudyReviewed,
    AllCompleted,
    Discharge,
}

/// Một sự kiện trên timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Ghép từ id thực thể nguồn và loại sự kiện, ổn định giữa các lần render.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TimelineEventKind,
    pub title: String,
    pub description: String,
    /// Số phút kể từ sự kiện được phát ra ngay trước đó.
    pub duration_minutes: i64,
}

/// Mốc có mặt trong hồ sơ, chờ được gắn thời lượng.
struct Checkpoint {
    id: String,
    at: DateTime<Utc>,
    kind: TimelineEventKind,
    title: String,
    description: String,
}

impl Checkpoint {
    fn into_event(self, duration_minutes: i64) -> TimelineEvent {
        TimelineEvent {
            id: self.id,
            timestamp: self.at,
            kind: self.kind,
            title: self.title,
            description: self.description,
            duration_minutes,
        }
    }
}

/// Dựng timeline theo hai pha.
///
/// Pha 1 duyệt các mốc theo thứ tự kịch bản cố định (nhập viện, phân công bác sĩ, chỉ định
/// xét nghiệm, từng xét nghiệm theo `requested_at`, hoàn tất xét nghiệm, xuất viện) và tính
/// thời lượng so với mốc phát ra trước đó. Pha 2 sắp xếp ổn định theo thời gian, nên khi các
/// xét nghiệm xen kẽ nhau thời lượng vẫn phản ánh thứ tự phát ra chứ không phải thứ tự hiển thị.
pub fn build_timeline(patient: &Patient, studies: &[Study]) -> Vec<TimelineEvent> {
    let checkpoints = collect_checkpoints(patient, studies);

    let (mut events, _) = checkpoints.into_iter().fold(
        (Vec::new(), patient.admission_time),
        |(mut events, previous), checkpoint| {
            let at = checkpoint.at;
            events.push(checkpoint.into_event(duration_minutes(previous, at)));
            (events, at)
        },
    );

    events.sort_by_key(|event| event.timestamp);
    events
}

fn collect_checkpoints(patient: &Patient, studies: &[Study]) -> Vec<Checkpoint> {
    let mut checkpoints = vec![Checkpoint {
        id: format!("{}-admission", patient.id),
        at: patient.admission_time,
        kind: TimelineEventKind::Admission,
        title: "Patient admitted".to_string(),
        description: admission_description(patient),
    }];

    if let Some(at) = patient.assigned_to_doctor_at {
        let description = match &patient.doctor {
            Some(doctor) => match &doctor.specialty {
                Some(specialty) => format!("Assigned to {} ({specialty})", doctor.name),
                None => format!("Assigned to {}", doctor.name),
            },
            None => "Assigned to attending doctor".to_string(),
        };
        checkpoints.push(Checkpoint {
            id: format!("{}-doctor-assigned", patient.id),
            at,
            kind: TimelineEventKind::DoctorAssigned,
            title: "Doctor assigned".to_string(),
            description,
        });
    }

    if let Some(at) = patient.first_study_requested_at {
        checkpoints.push(Checkpoint {
            id: format!("{}-studies-requested", patient.id),
            at,
            kind: TimelineEventKind::StudyRequested,
            title: "Studies requested".to_string(),
            description: format!("{} requested", pluralize_studies(studies.len())),
        });
    }

    let mut ordered: Vec<&Study> = studies.iter().collect();
    ordered.sort_by_key(|study| study.requested_at);
    for study in ordered {
        checkpoints.extend(study_checkpoints(study));
    }

    if let Some(at) = patient.all_studies_completed_at {
        checkpoints.push(Checkpoint {
            id: format!("{}-all-completed", patient.id),
            at,
            kind: TimelineEventKind::AllCompleted,
            title: "All studies completed".to_string(),
            description: format!("{} ready for review", pluralize_results(studies.len())),
        });
    }

    if let Some(at) = patient.discharged_at {
        checkpoints.push(Checkpoint {
            id: format!("{}-discharge", patient.id),
            at,
            kind: TimelineEventKind::Discharge,
            title: "Patient discharged".to_string(),
            description: format!(
                "Total stay {}",
                format_duration(duration_minutes(patient.admission_time, at))
            ),
        });
    }

    checkpoints
}

fn study_checkpoints(study: &Study) -> Vec<Checkpoint> {
    let mut checkpoints = Vec::with_capacity(3);

    if let Some(at) = study.in_progress_at {
        checkpoints.push(Checkpoint {
            id: format!("{}-in-progress", study.id),
            at,
            kind: TimelineEventKind::StudyInProgress,
            title: format!("{} in progress", study.name),
            description: format!("{} study is being processed", study.study_type),
        });
    }

    if let Some(at) = study.completed_at {
        let description = if study.has_alert {
            "Abnormal result, requires attention".to_string()
        } else {
            "Result available".to_string()
        };
        checkpoints.push(Checkpoint {
            id: format!("{}-completed", study.id),
            at,
            kind: TimelineEventKind::StudyCompleted,
            title: format!("{} completed", study.name),
            description,
        });
    }

    if let Some(at) = study.reviewed_at {
        checkpoints.push(Checkpoint {
            id: format!("{}-reviewed", study.id),
            at,
            kind: TimelineEventKind::StudyReviewed,
            title: format!("{} reviewed", study.name),
            description: "Result reviewed by the doctor".to_string(),
        });
    }

    checkpoints
}

fn admission_description(patient: &Patient) -> String {
    match &patient.room {
        Some(room) => format!("Admitted with {} (room {room})", patient.diagnosis),
        None => format!("Admitted with {}", patient.diagnosis),
    }
}

fn pluralize_studies(count: usize) -> String {
    if count == 1 {
        "1 study".to_string()
    } else {
        format!("{count} studies")
    }
}

fn pluralize_results(count: usize) -> String {
    if count == 1 {
        "1 result".to_string()
    } else {
        format!("{count} results")
    }
}
