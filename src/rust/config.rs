use crate::classify::Thresholds;
use crate::errors::{PipelineError, PipelineResult};
use crate::loaders::DEFAULT_SIGNALP_TAG;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which outputs a sample run produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Full effector candidate selection
    #[default]
    Candidates,
    /// Only export the proteins with a reconciled signal peptide
    SignalPeptides,
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Candidate selection thresholds
    pub thresholds: Thresholds,
    /// InterProScan analysis name that carries SignalP predictions
    pub signalp_tag: String,
    /// Root directory for per-sample output folders
    pub output_dir: PathBuf,
    pub mode: RunMode,
    /// Number of samples processed in parallel
    pub num_threads: Option<usize>,
}

impl PipelineConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            thresholds: Thresholds::default(),
            signalp_tag: DEFAULT_SIGNALP_TAG.to_string(),
            output_dir,
            mode: RunMode::default(),
            num_threads: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> PipelineResult<()> {
        let t = &self.thresholds;
        if !t.effector_score_min.is_finite() || !(0.0..=1.0).contains(&t.effector_score_min) {
            return Err(PipelineError::Configuration {
                field: "effector_score_min".to_string(),
                message: format!("must be between 0 and 1, got {}", t.effector_score_min),
            });
        }

        if !t.molecular_weight_max_kda.is_finite() || t.molecular_weight_max_kda < 0.0 {
            return Err(PipelineError::Configuration {
                field: "molecular_weight_max_kda".to_string(),
                message: format!("must be a non-negative number, got {}", t.molecular_weight_max_kda),
            });
        }

        if self.signalp_tag.trim().is_empty() {
            return Err(PipelineError::Configuration {
                field: "signalp_tag".to_string(),
                message: "SignalP analysis tag must not be empty".to_string(),
            });
        }

        if self.num_threads == Some(0) {
            return Err(PipelineError::Configuration {
                field: "num_threads".to_string(),
                message: "Thread count must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the number of threads to use
    pub fn effective_thread_count(&self) -> usize {
        self.num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
    }
}

/// Configuration builder for more complex setups
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { config: PipelineConfig::new(output_dir.into()) }
    }

    pub fn effector_score_min(mut self, min: f64) -> Self {
        self.config.thresholds.effector_score_min = min;
        self
    }

    pub fn molecular_weight_max_kda(mut self, max: f64) -> Self {
        self.config.thresholds.molecular_weight_max_kda = max;
        self
    }

    pub fn cysteine_count_min(mut self, min: usize) -> Self {
        self.config.thresholds.cysteine_count_min = min;
        self
    }

    pub fn signalp_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.signalp_tag = tag.into();
        self
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the number of threads
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = Some(threads);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> PipelineResult<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
