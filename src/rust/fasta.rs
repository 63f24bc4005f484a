//! Sequence store: reading protein FASTA into a [`RecordSet`] and writing
//! header+sequence exports.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::warn;

use crate::errors::{PipelineError, PipelineResult};
use crate::io::open_source;
use crate::protein::{ProteinRecord, RecordSet};
use crate::types::InputSource;

/// Parses FASTA text into a record set with default annotations.
///
/// Header lines start with `>`; the rest of the line (trailing whitespace
/// removed) is the identifier. Sequence lines are concatenated until the next
/// header and blank lines are skipped. A repeated header replaces the earlier
/// sequence and logs a warning.
pub fn read_proteins<R: BufRead>(reader: R) -> PipelineResult<RecordSet> {
    let mut records = RecordSet::new();
    let mut current: Option<(String, String)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let row = idx as u64 + 1;
        let line = line.map_err(|e| PipelineError::malformed(InputSource::Proteins, row, e.to_string()))?;
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        if let Some(id) = line.strip_prefix('>') {
            if let Some((id, seq)) = current.take() {
                store(&mut records, id, seq);
            }
            current = Some((id.to_string(), String::new()));
        } else {
            match current.as_mut() {
                Some((_, seq)) => seq.push_str(line.trim()),
                None => {
                    return Err(PipelineError::malformed(
                        InputSource::Proteins,
                        row,
                        "sequence line before any header",
                    ))
                }
            }
        }
    }

    if let Some((id, seq)) = current.take() {
        store(&mut records, id, seq);
    }

    Ok(records)
}

fn store(records: &mut RecordSet, id: String, seq: String) {
    if records.insert(ProteinRecord::new(id.clone(), seq)) {
        warn!(protein = %id, "duplicate FASTA header, keeping the last sequence");
    }
}

/// Reads the sequence file of a sample
pub fn read_proteins_file<P: AsRef<Path>>(path: P) -> PipelineResult<RecordSet> {
    read_proteins(open_source(InputSource::Proteins, path)?)
}

/// Writes one FASTA entry, sequence on a single line
pub fn write_fasta_record<W: Write>(writer: &mut W, id: &str, sequence: &str) -> std::io::Result<()> {
    writeln!(writer, ">{}", id)?;
    writeln!(writer, "{}", sequence)
}
