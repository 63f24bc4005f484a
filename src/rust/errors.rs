use thiserror::Error;

use crate::types::InputSource;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required input: {input}")]
    MissingInput { input: InputSource },

    #[error("Malformed {input} input at row {row}: {reason}")]
    MalformedInput { input: InputSource, row: u64, reason: String },

    #[error("Unknown residue '{residue}' at position {position}")]
    UnknownResidue { residue: char, position: usize },

    #[error("Configuration error: {field} - {message}")]
    Configuration { field: String, message: String },

    #[error("Sample {sample}: {error}")]
    Sample { sample: String, error: Box<PipelineError> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Decompression error: {0}")]
    Compression(#[from] niffler::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    pub fn malformed(input: InputSource, row: u64, reason: impl Into<String>) -> Self {
        PipelineError::MalformedInput { input, row, reason: reason.into() }
    }

    /// Strips any sample wrapper and returns the underlying error.
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::Sample { error, .. } => error.root(),
            other => other,
        }
    }
}

/// Extension trait for Result to add context
pub trait PipelineResultExt<T> {
    /// Attach the name of the sample being processed
    fn in_sample(self, sample: &str) -> PipelineResult<T>;

    /// Add context with a field name
    fn with_field_context(self, field: &str, message: &str) -> PipelineResult<T>;
}

impl<T, E> PipelineResultExt<T> for Result<T, E>
where
    E: Into<PipelineError>,
{
    fn in_sample(self, sample: &str) -> PipelineResult<T> {
        self.map_err(|e| match Into::<PipelineError>::into(e) {
            // never nest two sample wrappers
            already @ PipelineError::Sample { .. } => already,
            other => PipelineError::Sample { sample: sample.to_string(), error: Box::new(other) },
        })
    }

    fn with_field_context(self, field: &str, message: &str) -> PipelineResult<T> {
        self.map_err(|e| PipelineError::Configuration {
            field: field.to_string(),
            message: format!("{}: {}", message, Into::<PipelineError>::into(e)),
        })
    }
}
