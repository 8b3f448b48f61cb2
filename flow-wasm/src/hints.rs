//! Gợi ý hiển thị (icon, màu) thuộc về lớp trình bày, không phải logic lõi.

use flow_core::{Stage, TimelineEventKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DisplayHint {
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn stage_hint(stage: Stage) -> DisplayHint {
    let (icon, color) = match stage {
        Stage::Admission => ("user-plus", "slate"),
        Stage::WaitingDoctor => ("clock", "amber"),
        Stage::InStudies => ("flask", "blue"),
        Stage::ResultsReady => ("file-check", "violet"),
        Stage::InProgress => ("stethoscope", "teal"),
        Stage::Discharge => ("log-out", "green"),
    };
    DisplayHint { icon, color }
}

pub fn event_hint(kind: TimelineEventKind) -> DisplayHint {
    let (icon, color) = match kind {
        TimelineEventKind::Admission => ("user-plus", "slate"),
        TimelineEventKind::DoctorAssigned => ("stethoscope", "teal"),
        TimelineEventKind::StudyRequested => ("clipboard-list", "blue"),
        TimelineEventKind::StudyInProgress => ("loader", "amber"),
        TimelineEventKind::StudyCompleted => ("flask", "violet"),
        TimelineEventKind::StudyReviewed => ("eye", "indigo"),
        TimelineEventKind::AllCompleted => ("check-circle", "teal"),
        TimelineEventKind::Discharge => ("log-out", "green"),
    };
    DisplayHint { icon, color }
}
