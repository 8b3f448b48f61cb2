//! Bridge WASM <-> JavaScript cho lớp trình bày bảng bệnh nhân.

use chrono::{DateTime, Utc};
use flow_core::{
    BoardSnapshot, FlowConfig, FlowError, Patient, Stage, Study, TimelineEventKind,
};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

mod hints;

pub use hints::{event_hint, stage_hint, DisplayHint};

#[derive(Deserialize)]
struct JsFlowConfig {
    #[serde(default)]
    poll_interval_ms: Option<u64>,
    #[serde(default)]
    max_retained_failures: Option<u32>,
}

impl From<JsFlowConfig> for FlowConfig {
    fn from(cfg: JsFlowConfig) -> Self {
        let mut base = FlowConfig::default();
        if let Some(interval) = cfg.poll_interval_ms {
            base.poll_interval_ms = interval;
        }
        if let Some(limit) = cfg.max_retained_failures {
            base.max_retained_failures = limit;
        }
        base
    }
}

#[wasm_bindgen]
pub fn classify_stage(patient: JsValue) -> Result<JsValue, JsValue> {
    let patient: Patient = read_value(patient, "bệnh nhân")?;
    to_js(&flow_core::classify_stage(&patient))
}

#[wasm_bindgen]
pub fn time_in_stage(patient: JsValue, now_ms: f64) -> Result<f64, JsValue> {
    let patient: Patient = read_value(patient, "bệnh nhân")?;
    let now = instant_from_millis(now_ms)?;
    Ok(flow_core::time_in_stage(&patient, now) as f64)
}

#[wasm_bindgen]
pub fn group_by_stage(patients: JsValue) -> Result<JsValue, JsValue> {
    let patients: Vec<Patient> = read_value(patients, "danh sách bệnh nhân")?;
    to_js(&flow_core::group_by_stage(&patients))
}

#[wasm_bindgen]
pub fn build_timeline(patient: JsValue, studies: JsValue) -> Result<JsValue, JsValue> {
    let patient: Patient = read_value(patient, "bệnh nhân")?;
    let studies: Vec<Study> = read_value(studies, "danh sách xét nghiệm")?;
    to_js(&flow_core::build_timeline(&patient, &studies))
}

#[wasm_bindgen]
pub fn compute_stats(
    patient: JsValue,
    studies: JsValue,
    now_ms: f64,
) -> Result<JsValue, JsValue> {
    let patient: Patient = read_value(patient, "bệnh nhân")?;
    let studies: Vec<Study> = read_value(studies, "danh sách xét nghiệm")?;
    let now = instant_from_millis(now_ms)?;
    to_js(&flow_core::compute_stats(&patient, &studies, now))
}

#[wasm_bindgen]
pub fn format_duration(minutes: i32) -> String {
    flow_core::format_duration(i64::from(minutes))
}

/// Kết quả trả về cho JS: bảng kanban kèm cấu hình đã gộp để lớp trình bày hẹn giờ làm mới.
#[derive(Serialize)]
struct JsBoardResponse {
    board: BoardSnapshot,
    config: FlowConfig,
}

/// Nhận nguyên payload `{ patients: [...] }` từ API và dựng bảng kanban.
#[wasm_bindgen]
pub fn summarize_board(
    payload: JsValue,
    now_ms: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload_value: serde_json::Value = read_value(payload, "payload")?;
    let patients = flow_feed::parse_patients_value(&payload_value)
        .map_err(|err| JsValue::from_str(&format_flow_error(err)))?;
    let now = instant_from_millis(now_ms)?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsFlowConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            FlowConfig::from(cfg)
        }
        None => FlowConfig::default(),
    };

    to_js(&JsBoardResponse {
        board: flow_core::summarize_board(&patients, now),
        config: cfg,
    })
}

#[wasm_bindgen]
pub fn stage_display_hint(stage: JsValue) -> Result<JsValue, JsValue> {
    let stage: Stage = read_value(stage, "giai đoạn")?;
    to_js(&stage_hint(stage))
}

#[wasm_bindgen]
pub fn event_display_hint(kind: JsValue) -> Result<JsValue, JsValue> {
    let kind: TimelineEventKind = read_value(kind, "loại sự kiện")?;
    to_js(&event_hint(kind))
}

fn read_value<T: for<'de> Deserialize<'de>>(value: JsValue, what: &str) -> Result<T, JsValue> {
    from_value(value).map_err(|err| JsValue::from_str(&format!("Không đọc được {what}: {err}")))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

fn instant_from_millis(now_ms: f64) -> Result<DateTime<Utc>, JsValue> {
    if !now_ms.is_finite() {
        return Err(JsValue::from_str("Mốc thời gian không hợp lệ"));
    }
    DateTime::<Utc>::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| JsValue::from_str("Mốc thời gian nằm ngoài phạm vi"))
}

fn format_flow_error(err: FlowError) -> String {
    format!("Flow error: {err}")
}
