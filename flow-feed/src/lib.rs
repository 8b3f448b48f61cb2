//! Decoding of the patient feed payload plus the polling collaborator that keeps the
//! dashboard supplied with fresh snapshots.

use std::collections::HashMap;

use flow_core::{Doctor, FlowError, Patient};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

mod poller;
mod source;

pub use poller::Poller;
pub use source::{FileSource, PatientSource};

/// Decode a `{ "patients": [...] }` payload from a JSON string.
pub fn parse_patients_str(payload: &str) -> Result<Vec<Patient>, FlowError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| FlowError::Parse(err.to_string()))?;
    parse_patients_value(&value)
}

/// Decode a `{ "patients": [...], "doctors": [...] }` payload from a `serde_json::Value`.
///
/// Patients that reference a doctor by `doctorId` without embedding it get the matching
/// entry from the optional `doctors` list attached.
pub fn parse_patients_value(payload: &Value) -> Result<Vec<Patient>, FlowError> {
    let entries = payload
        .get("patients")
        .and_then(Value::as_array)
        .ok_or(FlowError::MissingData)?;

    let mut patients = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Patient::deserialize(entry)
                .map_err(|err| FlowError::Parse(format!("patients[{index}]: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let doctors = parse_doctors(payload)?;
    for patient in &mut patients {
        attach_doctor(patient, &doctors);
        check_study_ownership(patient);
    }

    Ok(patients)
}

fn parse_doctors(payload: &Value) -> Result<HashMap<String, Doctor>, FlowError> {
    let Some(entries) = payload.get("doctors").and_then(Value::as_array) else {
        return Ok(HashMap::new());
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Doctor::deserialize(entry)
                .map(|doctor| (doctor.id.clone(), doctor))
                .map_err(|err| FlowError::Parse(format!("doctors[{index}]: {err}")))
        })
        .collect()
}

fn attach_doctor(patient: &mut Patient, doctors: &HashMap<String, Doctor>) {
    if patient.doctor.is_some() {
        return;
    }
    let Some(doctor_id) = patient.doctor_id.as_deref() else {
        return;
    };

    match doctors.get(doctor_id) {
        Some(doctor) => patient.doctor = Some(doctor.clone()),
        None if !doctors.is_empty() => {
            warn!(patient = %patient.id, doctor = doctor_id, "doctor reference not resolved");
        }
        None => {}
    }
}

fn check_study_ownership(patient: &Patient) {
    for study in &patient.studies {
        if study.patient_id != patient.id {
            warn!(
                patient = %patient.id,
                study = %study.id,
                owner = %study.patient_id,
                "study embedded under a different patient"
            );
        }
    }
}
