use std::fs;
use std::path::PathBuf;

use flow_core::{FlowError, Patient};

use crate::parse_patients_str;

/// Read side of the external data collaborator.
pub trait PatientSource {
    /// Fetch a fresh, self-consistent snapshot of every patient.
    fn fetch(&mut self) -> Result<Vec<Patient>, FlowError>;
}

/// Re-reads a JSON payload from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatientSource for FileSource {
    fn fetch(&mut self) -> Result<Vec<Patient>, FlowError> {
        let data = fs::read_to_string(&self.path)
            .map_err(|err| FlowError::Source(format!("{}: {err}", self.path.display())))?;
        parse_patients_str(&data)
    }
}
