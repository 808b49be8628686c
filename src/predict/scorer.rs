use super::{exchange::Exchange, report::SymptomReport};
use crate::{
    Error, Result,
    config::{ExchangeMode, ScorerConfig},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{process::Stdio, time::Duration};
use tokio::{process::Command, sync::Mutex};
use tracing::{debug, info, warn};

/// Produces an opaque prediction for a symptom report.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, report: &SymptomReport) -> Result<Value>;
}

/// Runs an external scoring program against a report file and reads back
/// the result file it writes.
pub struct ProcessScorer {
    config: ScorerConfig,
    shared_lock: Mutex<()>,
}

impl ProcessScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            shared_lock: Mutex::new(()),
        }
    }

    async fn run(&self, exchange: &Exchange<'_>, report: &SymptomReport) -> Result<Value> {
        let payload = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(exchange.input(), payload)
            .await
            .map_err(|e| {
                Error::storage(format!("failed to write {}: {}", exchange.input().display(), e))
            })?;
        debug!("Wrote symptom report to {}", exchange.input().display());

        self.invoke(exchange).await?;

        let bytes = tokio::fs::read(exchange.output())
            .await
            .map_err(|e| {
                Error::storage(format!("failed to read {}: {}", exchange.output().display(), e))
            })?;

        serde_json::from_slice(&bytes).map_err(|e| Error::malformed_result(e.to_string()))
    }

    async fn invoke(&self, exchange: &Exchange<'_>) -> Result<()> {
        let input = exchange.input().to_string_lossy().into_owned();
        let output = exchange.output().to_string_lossy().into_owned();
        let args: Vec<String> = self
            .config
            .args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect();

        let mut cmd = Command::new(&self.config.command);
        cmd.args(&args)
            .current_dir(&self.config.working_dir)
            .env("SCORER_INPUT", &input)
            .env("SCORER_OUTPUT", &output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Spawning scorer: {} {:?}", self.config.command, args);

        let run = cmd.output();
        let result = match self.config.timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
                .await
                .map_err(|_| {
                    Error::prediction_process(format!("scorer timed out after {}s", secs))
                })?,
            None => run.await,
        };

        let out = result.map_err(|e| {
            Error::prediction_process(format!(
                "failed to spawn {}: {}",
                self.config.command, e
            ))
        })?;

        if !out.stdout.is_empty() {
            debug!("Scorer stdout: {}", String::from_utf8_lossy(&out.stdout).trim_end());
        }

        if !out.status.success() {
            warn!(
                "Scorer exited with {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim_end()
            );
            return Err(Error::prediction_process(format!(
                "scorer exited with {}",
                out.status
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Scorer for ProcessScorer {
    async fn score(&self, report: &SymptomReport) -> Result<Value> {
        let exchange = match self.config.exchange {
            ExchangeMode::Shared => Exchange::shared(&self.config, &self.shared_lock).await?,
            ExchangeMode::Isolated => Exchange::isolated(&self.config)?,
        };

        let result = self.run(&exchange, report).await;
        if result.is_ok() {
            info!("Scorer produced a result for {} symptoms", report.symptoms.len());
        }
        result
    }
}
