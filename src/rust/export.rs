//! Writing the per-sample results.
//!
//! Outputs are written to temporary files inside the destination directory
//! and only renamed into place once every file of the sample has been
//! written, so a failed run never leaves half-written results behind and a
//! re-run replaces the previous ones.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::classify::{Candidate, CandidateSet, DomainAnnotation};
use crate::errors::{PipelineError, PipelineResult, PipelineResultExt};
use crate::fasta::write_fasta_record;
use crate::protein::RecordSet;

/// Written in the domain column of candidates without any domain hit
pub const NO_DOMAIN_HITS: &str = "NONE";

/// Column names of the candidate report, matching [`CandidateRow`]
pub const REPORT_HEADER: [&str; 7] = [
    "protein_id",
    "signal_peptide",
    "effector_score",
    "cysteines",
    "molecular_weight_kda",
    "cazyme",
    "interproscan",
];

/// File names of one sample's outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub report: PathBuf,
    pub full_fasta: PathBuf,
    pub mature_fasta: PathBuf,
    pub signal_peptide_fasta: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(dir: P, sample: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            report: dir.join(format!("{}.candidates.tsv", sample)),
            full_fasta: dir.join(format!("{}.candidates.fasta", sample)),
            mature_fasta: dir.join(format!("{}.candidates.mature.fasta", sample)),
            signal_peptide_fasta: dir.join(format!("{}.proteinsWithSig.fasta", sample)),
        }
    }
}

/// One line of the candidate report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow<'a> {
    pub protein_id: &'a str,
    pub signal_peptide: &'static str,
    pub effector_score: f64,
    pub cysteines: usize,
    pub molecular_weight_kda: String,
    pub cazyme: String,
    pub interproscan: String,
}

impl<'a> From<&'a Candidate> for CandidateRow<'a> {
    fn from(candidate: &'a Candidate) -> Self {
        Self {
            protein_id: &candidate.id,
            signal_peptide: "SP",
            effector_score: candidate.effector_score,
            cysteines: candidate.mature.cysteine_count,
            molecular_weight_kda: format!("{:.3}", candidate.mature.molecular_weight_kda),
            cazyme: candidate.cazyme.to_string(),
            interproscan: format_domains(&candidate.domains),
        }
    }
}

/// Hits are joined with `;`, the fields of a hit with `|`.
pub fn format_domains(domains: &DomainAnnotation) -> String {
    match domains {
        DomainAnnotation::NoHits => NO_DOMAIN_HITS.to_string(),
        DomainAnnotation::Hits(hits) => hits
            .iter()
            .map(|hit| hit.fields().join("|"))
            .collect::<Vec<_>>()
            .join(";"),
    }
}

/// Output files staged next to their final location
struct StagedOutputs {
    staged: Vec<(NamedTempFile, PathBuf)>,
    dir: PathBuf,
}

impl StagedOutputs {
    fn new(dir: &Path) -> PipelineResult<Self> {
        fs::create_dir_all(dir).with_field_context("output_dir", "cannot create output directory")?;
        Ok(Self { staged: Vec::new(), dir: dir.to_path_buf() })
    }

    fn stage<F>(&mut self, target: PathBuf, write: F) -> PipelineResult<()>
    where
        F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> PipelineResult<()>,
    {
        let mut file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(&mut file);
            write(&mut writer)?;
            writer.flush()?;
        }
        self.staged.push((file, target));
        Ok(())
    }

    /// Moves every staged file into place. Unpersisted temporaries are
    /// removed when dropped.
    ///
    /// Targets are checked before the first rename, so a failure while
    /// writing or checking leaves the previous outputs untouched. The renames
    /// themselves happen one file at a time: an I/O failure between two of
    /// them can still leave a mix of old and new files.
    fn commit(self) -> PipelineResult<()> {
        for (_, target) in &self.staged {
            if target.is_dir() {
                return Err(PipelineError::Configuration {
                    field: "output_dir".to_string(),
                    message: format!("cannot replace directory {} with an output file", target.display()),
                });
            }
        }
        for (file, target) in self.staged {
            file.persist(&target).map_err(|e| e.error)?;
            debug!(path = %target.display(), "wrote output");
        }
        Ok(())
    }
}

/// Writes the report and both FASTA exports for a candidate set.
pub fn write_candidates<P: AsRef<Path>>(
    dir: P,
    sample: &str,
    candidates: &CandidateSet,
) -> PipelineResult<OutputPaths> {
    let paths = OutputPaths::new(&dir, sample);
    let mut outputs = StagedOutputs::new(dir.as_ref())?;

    outputs.stage(paths.report.clone(), |w| {
        let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').has_headers(false).from_writer(w);
        tsv.write_record(REPORT_HEADER)?;
        for candidate in candidates.iter() {
            tsv.serialize(CandidateRow::from(candidate))?;
        }
        tsv.flush()?;
        Ok(())
    })?;

    outputs.stage(paths.full_fasta.clone(), |w| {
        for candidate in candidates.iter() {
            write_fasta_record(w, &candidate.id, &candidate.sequence)?;
        }
        Ok(())
    })?;

    outputs.stage(paths.mature_fasta.clone(), |w| {
        for candidate in candidates.iter() {
            write_fasta_record(w, &candidate.id, &candidate.mature.sequence)?;
        }
        Ok(())
    })?;

    outputs.commit()?;
    Ok(paths)
}

/// Writes the full sequence of every protein with a reconciled signal peptide.
pub fn write_signal_peptide_proteins<P: AsRef<Path>>(
    dir: P,
    sample: &str,
    records: &RecordSet,
) -> PipelineResult<PathBuf> {
    let path = OutputPaths::new(&dir, sample).signal_peptide_fasta;
    let mut outputs = StagedOutputs::new(dir.as_ref())?;

    outputs.stage(path.clone(), |w| {
        for record in records.iter().filter(|r| r.has_signal_peptide()) {
            write_fasta_record(w, &record.id, &record.sequence)?;
        }
        Ok(())
    })?;

    outputs.commit()?;
    Ok(path)
}
