use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::debug;

use super::InputError;
use crate::core::{EngineConfig, StrategyInputs, StrategyReport, compute_strategies};

struct CachedReport {
    key: String,
    report: Arc<StrategyReport>,
}

/// Serializes recomputation so that at most one run per input snapshot is in
/// flight. Callers that arrive while a run for the same snapshot is underway
/// wait for it and share its report.
pub struct StrategyService {
    config: Arc<EngineConfig>,
    last: Mutex<Option<CachedReport>>,
    computations: AtomicU64,
}

impl StrategyService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
            last: Mutex::new(None),
            computations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of engine runs actually performed.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    pub async fn compute(&self, inputs: StrategyInputs) -> Result<Arc<StrategyReport>, InputError> {
        let key = serde_json::to_string(&inputs)?;

        let mut last = self.last.lock().await;
        if let Some(cached) = last.as_ref().filter(|c| c.key == key) {
            debug!("reusing report for unchanged inputs");
            return Ok(Arc::clone(&cached.report));
        }

        let config = Arc::clone(&self.config);
        let report =
            tokio::task::spawn_blocking(move || compute_strategies(&inputs, &config)).await?;
        self.computations.fetch_add(1, Ordering::Relaxed);

        let report = Arc::new(report);
        *last = Some(CachedReport {
            key,
            report: Arc::clone(&report),
        });
        Ok(report)
    }
}
