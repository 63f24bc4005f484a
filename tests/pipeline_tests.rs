mod common;

use std::fs;

use effectorseek::errors::PipelineError;
use effectorseek::types::InputSource;
use effectorseek::{
    analyze_sample, run_sample, run_samples, PipelineConfigBuilder, PipelineResult, RunMode,
    SampleInputs,
};
use tempfile::TempDir;

#[test]
fn test_candidate_selection_end_to_end() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let sample_dir = common::write_sample(temp_dir.path(), "B.cinerea", true);
    let output = temp_dir.path().join("out");
    let config = PipelineConfigBuilder::new(&output).build()?;

    let inputs = SampleInputs::locate(&sample_dir)?;
    let summary = run_sample(&inputs, &config)?;

    assert_eq!(summary.proteins, 6);
    assert_eq!(summary.with_signal_peptide, 5);
    assert_eq!(summary.skipped_unknown_residue, 1);
    assert_eq!(summary.candidates, Some(2));
    assert!(summary.cazymes_supplied);

    let report = fs::read_to_string(output.join("B.cinerea/B.cinerea.candidates.tsv"))?;
    let rows: Vec<Vec<&str>> = report.lines().skip(1).map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "EFF1");
    assert_eq!(rows[0][5], "Yes");
    assert!(rows[0][6].starts_with("SignalP_EUK|"));
    assert!(rows[0][6].contains(";Pfam|PF16541"));
    assert_eq!(rows[1][0], "EFF2");
    assert_eq!(rows[1][3], "4");
    assert_eq!(rows[1][5], "No");

    // EFF2 is cut at SignalP's site (18), not DeepSig's (20)
    let mature = fs::read_to_string(output.join("B.cinerea/B.cinerea.candidates.mature.fasta"))?;
    assert_eq!(mature, ">EFF1\nCCGVFRR\n>EFF2\nGGCCAACC\n");

    let full = fs::read_to_string(output.join("B.cinerea/B.cinerea.candidates.fasta"))?;
    assert!(full.starts_with(&format!(">EFF1\n{}CCGVFRR\n", common::SIGNAL_PEPTIDE)));
    Ok(())
}

#[test]
fn test_missing_cazymes_reports_na() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let sample_dir = common::write_sample(temp_dir.path(), "DLY-16-612", false);
    let config = PipelineConfigBuilder::new(temp_dir.path().join("out")).build()?;

    let inputs = SampleInputs::locate(&sample_dir)?;
    let (_, candidates, summary) = analyze_sample(&inputs, &config)?;

    assert!(!summary.cazymes_supplied);
    assert_eq!(candidates.count(), 2);
    assert!(candidates.iter().all(|c| c.cazyme.to_string() == "NA"));
    Ok(())
}

#[test]
fn test_relaxed_thresholds() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let sample_dir = common::write_sample(temp_dir.path(), "s", true);
    let config = PipelineConfigBuilder::new(temp_dir.path().join("out"))
        .effector_score_min(0.0)
        .cysteine_count_min(0)
        .build()?;

    let inputs = SampleInputs::locate(&sample_dir)?;
    let (_, candidates, _) = analyze_sample(&inputs, &config)?;

    // NOSP still lacks a SignalP prediction and BADAA cannot be weighed
    assert_eq!(candidates.ids(), vec!["EFF1", "EFF2", "LOWC", "NONEFF"]);
    Ok(())
}

#[test]
fn test_signal_peptide_mode() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let sample_dir = common::write_sample(temp_dir.path(), "SCD-16-611", false);
    fs::remove_file(sample_dir.join("SCD-16-611.effectorP.tsv"))?;
    let output = temp_dir.path().join("out");
    let config = PipelineConfigBuilder::new(&output).mode(RunMode::SignalPeptides).build()?;

    let inputs = SampleInputs::locate(&sample_dir)?;
    let summary = run_sample(&inputs, &config)?;
    assert_eq!(summary.candidates, None);
    assert_eq!(summary.with_signal_peptide, 5);

    let fasta = fs::read_to_string(output.join("SCD-16-611/SCD-16-611.proteinsWithSig.fasta"))?;
    let ids: Vec<_> = fasta.lines().filter_map(|l| l.strip_prefix('>')).collect();
    assert_eq!(ids, vec!["EFF1", "EFF2", "LOWC", "NONEFF", "BADAA"]);
    Ok(())
}

#[test]
fn test_malformed_row_fails_only_that_sample() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let good = common::write_sample(temp_dir.path(), "good", true);
    let bad = common::write_sample(temp_dir.path(), "bad", true);
    fs::write(bad.join("bad.deepsig.out"), "EFF1\tSignalPeptide\t0.99\n")?;
    let output = temp_dir.path().join("out");
    let config = PipelineConfigBuilder::new(&output).num_threads(2).build()?;

    let samples = vec![SampleInputs::locate(&good)?, SampleInputs::locate(&bad)?];
    let results = run_samples(&samples, &config)?;

    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert!(matches!(err, PipelineError::Sample { sample, .. } if sample == "bad"));
    assert!(matches!(
        err.root(),
        PipelineError::MalformedInput { input: InputSource::DeepSig, row: 1, .. }
    ));

    // No partial output for the failed sample
    assert!(!output.join("bad/bad.candidates.tsv").exists());
    assert!(output.join("good/good.candidates.tsv").exists());
    Ok(())
}

#[test]
fn test_rerun_replaces_outputs() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let sample_dir = common::write_sample(temp_dir.path(), "s", true);
    let output = temp_dir.path().join("out");
    let config = PipelineConfigBuilder::new(&output).build()?;
    let inputs = SampleInputs::locate(&sample_dir)?;

    run_sample(&inputs, &config)?;
    let first = fs::read_to_string(output.join("s/s.candidates.fasta"))?;
    run_sample(&inputs, &config)?;
    let second = fs::read_to_string(output.join("s/s.candidates.fasta"))?;

    assert_eq!(first, second);
    assert_eq!(second.matches('>').count(), 2);
    Ok(())
}

#[test]
fn test_duplicate_sample_names_are_rejected() -> PipelineResult<()> {
    let temp_dir = TempDir::new()?;
    let first = common::write_sample(&temp_dir.path().join("a"), "s", true);
    let second = common::write_sample(&temp_dir.path().join("b"), "s", true);
    let output = temp_dir.path().join("out");
    let config = PipelineConfigBuilder::new(&output).build()?;

    let samples = vec![SampleInputs::locate(&first)?, SampleInputs::locate(&second)?];
    let err = run_samples(&samples, &config).unwrap_err();

    assert!(matches!(err, PipelineError::Configuration { ref field, .. } if field == "sample"));
    assert!(!output.join("s").exists());
    Ok(())
}
