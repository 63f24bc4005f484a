//! Input handling for the per-sample annotation files.
//!
//! Every reader goes through [`open_input`], so plain, gzip, bzip2, xz and
//! zstd inputs are all accepted, and `-` reads from stdin.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::errors::{PipelineError, PipelineResult};
use crate::types::InputSource;

/// Opens a file with automatic compression detection.
///
/// # Examples
/// ```no_run
/// use effectorseek::io::open_maybe_compressed;
/// use std::io::BufRead;
///
/// let reader = open_maybe_compressed("B.cinerea.proteins.fasta.gz")?;
/// for line in reader.lines() {
///     let _line = line?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_maybe_compressed<P: AsRef<Path>>(path: P) -> PipelineResult<Box<dyn BufRead>> {
    let file = File::open(path)?;
    // niffler autodetects gzip/bzip2/xz/zstd/uncompressed
    let (reader, _format) = niffler::get_reader(Box::new(file))?;
    Ok(Box::new(BufReader::new(reader)))
}

/// Creates a buffered reader from stdin for pipeline processing.
pub fn stdin_reader() -> Box<dyn BufRead> {
    Box::new(BufReader::new(io::stdin()))
}

/// Determines the appropriate reader for a given path, "-" meaning stdin.
pub fn open_input<P: AsRef<Path>>(path: P) -> PipelineResult<Box<dyn BufRead>> {
    let path_str = path.as_ref().to_string_lossy();
    if path_str == "-" {
        Ok(stdin_reader())
    } else {
        open_maybe_compressed(path)
    }
}

/// Opens a required input, turning a missing file into `MissingInput`.
pub fn open_source<P: AsRef<Path>>(
    input: InputSource,
    path: P,
) -> PipelineResult<Box<dyn BufRead>> {
    open_input(path).map_err(|e| match e {
        PipelineError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            PipelineError::MissingInput { input }
        }
        other => other,
    })
}

/// Builds a reader for the headerless, tab-separated predictor outputs.
///
/// Rows may have different widths; each loader checks the columns it needs.
pub fn tsv_reader<R: io::Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}
