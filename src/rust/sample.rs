//! Locating the input files of one sample.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{PipelineError, PipelineResult};
use crate::types::InputSource;

const COMPRESSED_EXTENSIONS: [&str; 4] = ["gz", "bz2", "xz", "zst"];

/// Paths of the predictor outputs belonging to a single sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleInputs {
    pub name: String,
    pub proteins: PathBuf,
    pub interproscan: PathBuf,
    pub deepsig: PathBuf,
    /// Not needed when only signal peptides are extracted
    pub effectorp: Option<PathBuf>,
    pub cazymes: Option<PathBuf>,
}

impl SampleInputs {
    /// Finds the inputs in `dir` by file-name suffix; the sample is named
    /// after the directory.
    pub fn locate<P: AsRef<Path>>(dir: P) -> PipelineResult<Self> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PipelineError::Configuration {
                field: "sample".to_string(),
                message: format!("cannot name a sample after {}", dir.display()),
            })?;
        Self::locate_named(name, dir)
    }

    pub fn locate_named<P: AsRef<Path>>(name: impl Into<String>, dir: P) -> PipelineResult<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let required = |input: InputSource| -> PipelineResult<PathBuf> {
            find_input(&files, input)?.ok_or(PipelineError::MissingInput { input })
        };

        let inputs = Self {
            name: name.into(),
            proteins: required(InputSource::Proteins)?,
            interproscan: required(InputSource::InterProScan)?,
            deepsig: required(InputSource::DeepSig)?,
            effectorp: find_input(&files, InputSource::EffectorP)?,
            cazymes: find_input(&files, InputSource::Cazymes)?,
        };
        info!(sample = %inputs.name, dir = %dir.display(), "located sample inputs");
        Ok(inputs)
    }

    /// The EffectorP table, required for candidate selection
    pub fn require_effectorp(&self) -> PipelineResult<&Path> {
        self.effectorp
            .as_deref()
            .ok_or(PipelineError::MissingInput { input: InputSource::EffectorP })
    }
}

fn strip_compression(file_name: &str) -> &str {
    for ext in COMPRESSED_EXTENSIONS {
        if let Some(stem) = file_name.strip_suffix(ext).and_then(|s| s.strip_suffix('.')) {
            return stem;
        }
    }
    file_name
}

fn find_input(files: &[PathBuf], input: InputSource) -> PipelineResult<Option<PathBuf>> {
    let matches: Vec<&PathBuf> = files
        .iter()
        .filter(|path| {
            path.file_name()
                .map(|n| strip_compression(&n.to_string_lossy()).ends_with(input.file_suffix()))
                .unwrap_or(false)
        })
        .collect();

    match matches.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some((*single).clone())),
        _ => Err(PipelineError::Configuration {
            field: input.to_string(),
            message: format!("{} files match *{}", matches.len(), input.file_suffix()),
        }),
    }
}
