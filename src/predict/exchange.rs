use crate::{Error, Result, config::ScorerConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Input/output file pair handed to the scoring program for one request.
///
/// A shared exchange holds the scorer's lock for its whole lifetime; an
/// isolated one owns a temporary directory that is removed on drop.
pub struct Exchange<'a> {
    input: PathBuf,
    output: PathBuf,
    _guard: ExchangeGuard<'a>,
}

enum ExchangeGuard<'a> {
    Shared(#[allow(dead_code)] MutexGuard<'a, ()>),
    Isolated(#[allow(dead_code)] TempDir),
}

impl<'a> Exchange<'a> {
    /// Fixed paths in the working directory, serialised through `lock`.
    pub async fn shared(config: &ScorerConfig, lock: &'a Mutex<()>) -> Result<Exchange<'a>> {
        let guard = lock.lock().await;
        let dir = absolute_dir(&config.working_dir)?;

        let exchange = Exchange {
            input: dir.join(&config.input_file),
            output: dir.join(&config.output_file),
            _guard: ExchangeGuard::Shared(guard),
        };

        // A result left behind by an earlier run must never be mistaken for ours.
        match tokio::fs::remove_file(&exchange.output).await {
            Ok(()) => debug!("Removed stale scorer output {}", exchange.output.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::storage(format!(
                    "failed to clear {}: {}",
                    exchange.output.display(),
                    e
                )));
            }
        }

        Ok(exchange)
    }

    /// A unique directory under the working directory for this request only.
    pub fn isolated(config: &ScorerConfig) -> Result<Exchange<'a>> {
        let dir = absolute_dir(&config.working_dir)?;
        let temp = tempfile::Builder::new()
            .prefix(".exchange-")
            .tempdir_in(&dir)
            .map_err(|e| Error::storage(format!("failed to create exchange dir: {}", e)))?;

        Ok(Exchange {
            input: temp.path().join(&config.input_file),
            output: temp.path().join(&config.output_file),
            _guard: ExchangeGuard::Isolated(temp),
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir)
        .map_err(|e| Error::storage(format!("invalid working dir {}: {}", dir.display(), e)))
}
