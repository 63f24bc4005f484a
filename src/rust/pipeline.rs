use std::collections::HashSet;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{error, info, info_span, warn};

use crate::classify::{classify, CandidateSet, Thresholds};
use crate::config::{PipelineConfig, RunMode};
use crate::errors::{PipelineError, PipelineResult, PipelineResultExt};
use crate::export::{write_candidates, write_signal_peptide_proteins};
use crate::fasta::read_proteins_file;
use crate::loaders::{load_file, LoadStats};
use crate::protein::RecordSet;
use crate::reconcile::{reconcile_and_analyze, reconcile_records, ReconcileStats};
use crate::sample::SampleInputs;
use crate::types::InputSource;

/// What happened to one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub sample: String,
    pub mode: RunMode,
    pub proteins: usize,
    pub with_signal_peptide: usize,
    pub skipped_unknown_residue: usize,
    /// Annotation rows naming identifiers absent from the sequence file
    pub unknown_ids: usize,
    /// `None` in signal-peptide mode
    pub candidates: Option<usize>,
    pub cazymes_supplied: bool,
    pub outputs: Vec<PathBuf>,
}

/// Reads every input of a sample and runs the decision steps, without
/// writing anything.
///
/// Returns the enriched record set, the candidates and the summary. The
/// candidate set is empty in signal-peptide mode.
pub fn analyze_sample(
    inputs: &SampleInputs,
    config: &PipelineConfig,
) -> PipelineResult<(RecordSet, CandidateSet, SampleSummary)> {
    let sample = inputs.name.as_str();
    info!(sample, "reading proteins file");
    let mut records = read_proteins_file(&inputs.proteins)?;
    info!(sample, proteins = records.len(), "processed proteins data");

    let mut loaded = LoadStats::default();
    let mut track = |input: InputSource, stats: LoadStats| {
        info!(sample, %input, rows = stats.rows, applied = stats.applied, "processed annotations");
        loaded.unknown_ids += stats.unknown_ids;
    };

    let tag = config.signalp_tag.as_str();
    track(InputSource::DeepSig, load_file(InputSource::DeepSig, &inputs.deepsig, &mut records, tag)?);
    track(
        InputSource::InterProScan,
        load_file(InputSource::InterProScan, &inputs.interproscan, &mut records, tag)?,
    );

    let mut summary = SampleSummary {
        sample: sample.to_string(),
        mode: config.mode,
        proteins: records.len(),
        with_signal_peptide: 0,
        skipped_unknown_residue: 0,
        unknown_ids: 0,
        candidates: None,
        cazymes_supplied: inputs.cazymes.is_some(),
        outputs: Vec::new(),
    };

    let (reconciled, candidates) = match config.mode {
        RunMode::SignalPeptides => (reconcile_records(&mut records), CandidateSet::default()),
        RunMode::Candidates => {
            let effectorp = inputs.require_effectorp()?;
            track(InputSource::EffectorP, load_file(InputSource::EffectorP, effectorp, &mut records, tag)?);
            match &inputs.cazymes {
                Some(path) => {
                    track(InputSource::Cazymes, load_file(InputSource::Cazymes, path, &mut records, tag)?)
                }
                None => warn!(sample, "no CAZyme input, CAZyme status reported as NA"),
            }

            let reconciled = reconcile_and_analyze(&mut records);
            let candidates = classify(&records, &config.thresholds);
            summary.candidates = Some(candidates.count());
            (reconciled, candidates)
        }
    };

    summary.with_signal_peptide = reconciled.with_signal_peptide;
    summary.skipped_unknown_residue = reconciled.skipped_unknown_residue.len();
    summary.unknown_ids = loaded.unknown_ids;
    log_reconciliation(sample, &reconciled);

    Ok((records, candidates, summary))
}

fn log_reconciliation(sample: &str, stats: &ReconcileStats) {
    info!(
        sample,
        with_signal_peptide = stats.with_signal_peptide,
        disagreements = stats.disagreements,
        "reconciled SignalP and DeepSig predictions"
    );
}

/// Runs one sample end to end and writes its outputs under
/// `<output_dir>/<sample>/`.
pub fn run_sample(inputs: &SampleInputs, config: &PipelineConfig) -> PipelineResult<SampleSummary> {
    let span = info_span!("sample", name = %inputs.name);
    let _guard = span.enter();

    write_sample(inputs, config).in_sample(&inputs.name)
}

fn write_sample(inputs: &SampleInputs, config: &PipelineConfig) -> PipelineResult<SampleSummary> {
    let (records, candidates, mut summary) = analyze_sample(inputs, config)?;
    let out_dir = config.output_dir.join(&inputs.name);

    match config.mode {
        RunMode::Candidates => {
            let paths = write_candidates(&out_dir, &inputs.name, &candidates)?;
            summary.outputs = vec![paths.report, paths.full_fasta, paths.mature_fasta];
        }
        RunMode::SignalPeptides => {
            summary.outputs = vec![write_signal_peptide_proteins(&out_dir, &inputs.name, &records)?];
        }
    }

    log_summary(&summary, &config.thresholds);
    Ok(summary)
}

fn log_summary(summary: &SampleSummary, thresholds: &Thresholds) {
    let sample = summary.sample.as_str();
    match summary.candidates {
        Some(candidates) => info!(
            sample,
            proteins = summary.proteins,
            with_signal_peptide = summary.with_signal_peptide,
            skipped_unknown_residue = summary.skipped_unknown_residue,
            effector_score_min = thresholds.effector_score_min,
            cysteine_count_min = thresholds.cysteine_count_min,
            molecular_weight_max_kda = thresholds.molecular_weight_max_kda,
            candidates,
            "effector candidate selection finished"
        ),
        None => info!(
            sample,
            proteins = summary.proteins,
            with_signal_peptide = summary.with_signal_peptide,
            "signal peptide extraction finished"
        ),
    }
    if summary.unknown_ids > 0 {
        warn!(sample, unknown_ids = summary.unknown_ids, "annotations referenced unknown proteins");
    }
}

/// Runs several samples in parallel. Each sample succeeds or fails on its
/// own; results come back in input order.
///
/// Sample names must be unique since each one owns `<output_dir>/<name>/`.
pub fn run_samples(
    samples: &[SampleInputs],
    config: &PipelineConfig,
) -> PipelineResult<Vec<PipelineResult<SampleSummary>>> {
    let mut names = HashSet::new();
    for inputs in samples {
        if !names.insert(inputs.name.as_str()) {
            return Err(PipelineError::Configuration {
                field: "sample".to_string(),
                message: format!(
                    "more than one sample is named {}, their outputs would share {}",
                    inputs.name,
                    config.output_dir.join(&inputs.name).display()
                ),
            });
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.effective_thread_count())
        .build()
        .map_err(|e| PipelineError::Configuration {
            field: "num_threads".to_string(),
            message: e.to_string(),
        })?;

    let results: Vec<PipelineResult<SampleSummary>> =
        pool.install(|| samples.par_iter().map(|inputs| run_sample(inputs, config)).collect());

    for result in &results {
        if let Err(err) = result {
            error!(error = %err, "sample failed");
        }
    }
    Ok(results)
}
