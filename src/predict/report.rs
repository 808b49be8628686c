use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// What the intake wizard collects and the scorer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub severity: String,
}

impl SymptomReport {
    pub fn new(
        symptoms: Vec<String>,
        duration: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            symptoms,
            duration: duration.into(),
            severity: severity.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symptoms.is_empty() {
            return Err(Error::invalid_request("No symptoms provided"));
        }
        Ok(())
    }
}
