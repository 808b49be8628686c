use super::catalog::{DURATION_OPTIONS, SEVERITY_OPTIONS};
use crate::{Error, Result, client::RelayClient, predict::SymptomReport};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Anything that can score a finished intake on behalf of the wizard.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn predict(&self, report: &SymptomReport) -> Result<Value>;
}

#[async_trait]
impl PredictionBackend for RelayClient {
    async fn predict(&self, report: &SymptomReport) -> Result<Value> {
        RelayClient::predict(self, report).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectSymptoms,
    SelectDuration,
    SelectSeverity,
    ShowResults,
}

/// How the last submission ended. A failure is shown on the severity step
/// and can be retried with another `next`.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Prediction(Value),
    Failed(String),
}

#[derive(Debug)]
pub struct IntakeWizard {
    step: WizardStep,
    symptoms: Vec<String>,
    duration: Option<String>,
    severity: Option<String>,
    submitting: bool,
    outcome: Option<WizardOutcome>,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectSymptoms,
            symptoms: Vec::new(),
            duration: None,
            severity: None,
            submitting: false,
            outcome: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn outcome(&self) -> Option<&WizardOutcome> {
        self.outcome.as_ref()
    }

    /// Adds the symptom, or removes it if already selected. Selection order is kept.
    pub fn toggle_symptom(&mut self, symptom: &str) {
        if let Some(pos) = self.symptoms.iter().position(|s| s == symptom) {
            self.symptoms.remove(pos);
        } else {
            self.symptoms.push(symptom.to_string());
        }
    }

    pub fn select_duration(&mut self, duration: &str) -> Result<()> {
        if !DURATION_OPTIONS.contains(&duration) {
            return Err(Error::invalid_request(format!("Unknown duration: {}", duration)));
        }
        self.duration = Some(duration.to_string());
        Ok(())
    }

    pub fn select_severity(&mut self, severity: &str) -> Result<()> {
        if !SEVERITY_OPTIONS.contains(&severity) {
            return Err(Error::invalid_request(format!("Unknown severity: {}", severity)));
        }
        self.severity = Some(severity.to_string());
        Ok(())
    }

    /// Whether the "Next" action is enabled on the current step.
    pub fn can_advance(&self) -> bool {
        if self.submitting {
            return false;
        }
        match self.step {
            WizardStep::SelectSymptoms => !self.symptoms.is_empty(),
            WizardStep::SelectDuration => self.duration.is_some(),
            WizardStep::SelectSeverity => self.severity.is_some(),
            WizardStep::ShowResults => false,
        }
    }

    /// Moves forward. Leaving the severity step starts a submission and
    /// returns the report to send; the step only changes once `complete`
    /// reports success.
    pub fn next(&mut self) -> Result<Option<SymptomReport>> {
        if !self.can_advance() {
            return Err(self.invalid("Next"));
        }

        let old_step = self.step;
        let report = match self.step {
            WizardStep::SelectSymptoms => {
                self.step = WizardStep::SelectDuration;
                None
            }
            WizardStep::SelectDuration => {
                self.step = WizardStep::SelectSeverity;
                None
            }
            WizardStep::SelectSeverity => {
                self.submitting = true;
                self.outcome = None;
                Some(SymptomReport::new(
                    self.symptoms.clone(),
                    self.duration.clone().unwrap_or_default(),
                    self.severity.clone().unwrap_or_default(),
                ))
            }
            WizardStep::ShowResults => return Err(self.invalid("Next")),
        };

        if report.is_some() {
            info!("Submitting intake with {} symptoms", self.symptoms.len());
        } else {
            debug!("Wizard step: {:?} -> {:?}", old_step, self.step);
        }
        Ok(report)
    }

    pub fn back(&mut self) -> Result<()> {
        if self.submitting {
            return Err(self.invalid("Back"));
        }

        let previous = match self.step {
            WizardStep::SelectSymptoms => return Err(self.invalid("Back")),
            WizardStep::SelectDuration => WizardStep::SelectSymptoms,
            WizardStep::SelectSeverity => WizardStep::SelectDuration,
            WizardStep::ShowResults => WizardStep::SelectSeverity,
        };

        debug!("Wizard step: {:?} -> {:?}", self.step, previous);
        self.step = previous;
        self.outcome = None;
        Ok(())
    }

    /// Resolves the in-flight submission started by `next`.
    pub fn complete(&mut self, result: Result<Value>) -> Result<()> {
        if !self.submitting {
            return Err(self.invalid("Complete"));
        }
        self.submitting = false;

        match result {
            Ok(prediction) => {
                self.step = WizardStep::ShowResults;
                self.outcome = Some(WizardOutcome::Prediction(prediction));
            }
            Err(e) => {
                warn!("Prediction request failed: {}", e);
                let message = match e {
                    Error::Relay { message, .. } => message,
                    other => other.to_string(),
                };
                self.outcome = Some(WizardOutcome::Failed(message));
            }
        }
        Ok(())
    }

    /// Runs the final transition end to end: submit, call the backend once,
    /// and record the outcome.
    pub async fn submit(&mut self, backend: &dyn PredictionBackend) -> Result<&WizardOutcome> {
        if self.step != WizardStep::SelectSeverity {
            return Err(self.invalid("Submit"));
        }
        let report = self.next()?.ok_or_else(|| self.invalid("Submit"))?;

        let result = backend.predict(&report).await;
        self.complete(result)?;

        self.outcome
            .as_ref()
            .ok_or_else(|| Error::internal("submission finished without an outcome"))
    }

    pub fn reset(&mut self) {
        debug!("Wizard reset from {:?}", self.step);
        *self = Self::new();
    }

    fn invalid(&self, requested: &str) -> Error {
        Error::InvalidTransition {
            current: format!("{:?}", self.step),
            requested: requested.to_string(),
        }
    }
}
