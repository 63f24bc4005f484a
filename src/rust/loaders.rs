//! Loaders for the per-protein facts produced by the upstream predictors.
//!
//! Each loader reads a whole tab-separated table, updates only the fields of
//! its own source, and reports what it did through [`LoadStats`]. Rows that
//! name an identifier missing from the sequence file are skipped with a
//! warning.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::errors::{PipelineError, PipelineResult};
use crate::io::{open_source, tsv_reader};
use crate::protein::{DomainHit, RecordSet};
use crate::types::{CazymeStatus, CleavageSite, InputSource};

/// Analysis name InterProScan uses for eukaryotic SignalP predictions
pub const DEFAULT_SIGNALP_TAG: &str = "SignalP_EUK";

pub const DEEPSIG_SIGNAL_LABEL: &str = "SignalPeptide";

pub const EFFECTOR_LABEL: &str = "Effector";

/// Counters reported by every loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read
    pub rows: usize,
    /// Rows that changed a record
    pub applied: usize,
    /// Rows skipped because the identifier is not in the sequence file
    pub unknown_ids: usize,
}

impl LoadStats {
    fn unknown(&mut self, input: InputSource, id: &str) {
        self.unknown_ids += 1;
        warn!(%input, protein = %id, "annotation for an identifier absent from the sequence file");
    }
}

fn row_number(record: &StringRecord, fallback: usize) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(fallback as u64)
}

/// Unwraps one row of a table, turning read and decode failures into
/// `MalformedInput` for `input` at the failing line.
fn decode_row(
    input: InputSource,
    row: csv::Result<StringRecord>,
    fallback: usize,
) -> PipelineResult<(StringRecord, u64)> {
    match row {
        Ok(record) => {
            let line = row_number(&record, fallback);
            Ok((record, line))
        }
        Err(err) => {
            let line = err.position().map(|p| p.line()).unwrap_or(fallback as u64);
            Err(PipelineError::malformed(input, line, err.to_string()))
        }
    }
}

fn require_columns(
    input: InputSource,
    record: &StringRecord,
    row: u64,
    needed: usize,
) -> PipelineResult<()> {
    if record.len() < needed {
        return Err(PipelineError::malformed(
            input,
            row,
            format!("expected at least {} columns, found {}", needed, record.len()),
        ));
    }
    Ok(())
}

fn parse_column<T: FromStr>(
    input: InputSource,
    record: &StringRecord,
    row: u64,
    column: usize,
) -> PipelineResult<T> {
    let raw = record.get(column).unwrap_or_default().trim();
    raw.parse().map_err(|_| {
        PipelineError::malformed(input, row, format!("column {} is not a valid number: '{}'", column + 1, raw))
    })
}

/// Loads the InterProScan table.
///
/// Every row is appended as a domain hit (columns 4 onwards). Rows whose
/// analysis column equals `signalp_tag` also set the SignalP cleavage site
/// from column 8; with several such rows the last one wins.
pub fn load_interproscan<R: Read>(
    reader: R,
    records: &mut RecordSet,
    signalp_tag: &str,
) -> PipelineResult<LoadStats> {
    const INPUT: InputSource = InputSource::InterProScan;
    let mut stats = LoadStats::default();

    for (idx, row) in tsv_reader(reader, false).records().enumerate() {
        let (row, line) = decode_row(INPUT, row, idx + 1)?;
        stats.rows += 1;
        require_columns(INPUT, &row, line, 4)?;

        let id = &row[0];
        let is_signalp = &row[3] == signalp_tag;
        let cleavage = if is_signalp {
            require_columns(INPUT, &row, line, 8)?;
            Some(CleavageSite::new(parse_column(INPUT, &row, line, 7)?))
        } else {
            None
        };

        let hit = DomainHit::new(row.iter().skip(3).map(str::to_string).collect());
        if !records.push_domain_hit(id, hit) {
            stats.unknown(INPUT, id);
            continue;
        }
        if let (Some(site), Some(record)) = (cleavage, records.get_mut(id)) {
            record.signalp_cleavage = site;
        }
        stats.applied += 1;
    }

    debug!(input = %INPUT, rows = stats.rows, applied = stats.applied, "loaded");
    Ok(stats)
}

/// Loads the DeepSig table: column 2 must read `SignalPeptide`, column 4 holds
/// the cleavage site. Other rows are ignored.
pub fn load_deepsig<R: Read>(reader: R, records: &mut RecordSet) -> PipelineResult<LoadStats> {
    const INPUT: InputSource = InputSource::DeepSig;
    let mut stats = LoadStats::default();

    for (idx, row) in tsv_reader(reader, false).records().enumerate() {
        let (row, line) = decode_row(INPUT, row, idx + 1)?;
        stats.rows += 1;
        require_columns(INPUT, &row, line, 2)?;
        if &row[1] != DEEPSIG_SIGNAL_LABEL {
            continue;
        }
        require_columns(INPUT, &row, line, 4)?;
        let site = CleavageSite::new(parse_column(INPUT, &row, line, 3)?);

        match records.get_mut(&row[0]) {
            Some(record) => {
                record.deepsig_cleavage = site;
                stats.applied += 1;
            }
            None => stats.unknown(INPUT, &row[0]),
        }
    }

    debug!(input = %INPUT, rows = stats.rows, applied = stats.applied, "loaded");
    Ok(stats)
}

/// Loads EffectorP predictions: only rows classified `Effector` set the
/// score, so non-effectors keep a score of 0.
pub fn load_effectorp<R: Read>(reader: R, records: &mut RecordSet) -> PipelineResult<LoadStats> {
    const INPUT: InputSource = InputSource::EffectorP;
    let mut stats = LoadStats::default();

    for (idx, row) in tsv_reader(reader, false).records().enumerate() {
        let (row, line) = decode_row(INPUT, row, idx + 1)?;
        stats.rows += 1;
        require_columns(INPUT, &row, line, 2)?;
        if &row[1] != EFFECTOR_LABEL {
            continue;
        }
        require_columns(INPUT, &row, line, 3)?;
        let score: f64 = parse_column(INPUT, &row, line, 2)?;

        match records.get_mut(&row[0]) {
            Some(record) => {
                record.effector_score = score;
                stats.applied += 1;
            }
            None => stats.unknown(INPUT, &row[0]),
        }
    }

    debug!(input = %INPUT, rows = stats.rows, applied = stats.applied, "loaded");
    Ok(stats)
}

/// Loads the dbCAN overview table (header row skipped).
///
/// Once this input is present every protein is at least `No`; listed
/// proteins become `Yes` when column 6 reports two or more agreeing tools.
pub fn load_cazymes<R: Read>(reader: R, records: &mut RecordSet) -> PipelineResult<LoadStats> {
    const INPUT: InputSource = InputSource::Cazymes;
    let mut stats = LoadStats::default();

    for record in records.iter_mut() {
        record.cazyme = CazymeStatus::No;
    }

    for (idx, row) in tsv_reader(reader, true).records().enumerate() {
        // +2: one for 1-based numbering, one for the header
        let (row, line) = decode_row(INPUT, row, idx + 2)?;
        stats.rows += 1;
        require_columns(INPUT, &row, line, 6)?;
        let hits: u32 = parse_column(INPUT, &row, line, 5)?;

        match records.get_mut(&row[0]) {
            Some(record) => {
                record.cazyme = CazymeStatus::from_hit_count(hits);
                stats.applied += 1;
            }
            None => stats.unknown(INPUT, &row[0]),
        }
    }

    debug!(input = %INPUT, rows = stats.rows, applied = stats.applied, "loaded");
    Ok(stats)
}

/// Runs the loader matching `input` on a file.
pub fn load_file<P: AsRef<Path>>(
    input: InputSource,
    path: P,
    records: &mut RecordSet,
    signalp_tag: &str,
) -> PipelineResult<LoadStats> {
    let reader = open_source(input, path)?;
    match input {
        InputSource::InterProScan => load_interproscan(reader, records, signalp_tag),
        InputSource::DeepSig => load_deepsig(reader, records),
        InputSource::EffectorP => load_effectorp(reader, records),
        InputSource::Cazymes => load_cazymes(reader, records),
        InputSource::Proteins => Err(PipelineError::Configuration {
            field: "input".to_string(),
            message: "protein sequences are read by the sequence store, not a loader".to_string(),
        }),
    }
}
