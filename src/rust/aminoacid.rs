use crate::errors::{PipelineError, PipelineResult};
use crate::protein::MatureProtein;
use crate::types::CleavageSite;

/// Standard amino acids and their properties
pub const STANDARD_AA: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

/// Monoisotopic residue masses in Da, indexed like `STANDARD_AA`
const RESIDUE_MASS: [f64; 20] = [
    71.03711,  // A
    103.00919, // C
    115.02694, // D
    129.04259, // E
    147.06841, // F
    57.02146,  // G
    137.05891, // H
    113.08406, // I
    128.09496, // K
    113.08406, // L
    131.04049, // M
    114.04293, // N
    97.05276,  // P
    128.05858, // Q
    156.10111, // R
    87.03203,  // S
    101.04768, // T
    99.06841,  // V
    186.07931, // W
    163.06333, // Y
];

pub const CYSTEINE: char = 'C';

/// Mass of a single residue, `None` for anything outside the 20 standard codes
pub fn residue_mass(aa: char) -> Option<f64> {
    STANDARD_AA.iter().position(|&c| c == aa).map(|i| RESIDUE_MASS[i])
}

/// The part of `sequence` from residue `offset` onwards.
///
/// An offset at or past the end gives an empty mature sequence.
pub fn mature_sequence(sequence: &str, offset: CleavageSite) -> &str {
    match sequence.char_indices().nth(offset.get()) {
        Some((byte_pos, _)) => &sequence[byte_pos..],
        None => "",
    }
}

pub fn cysteine_count(sequence: &str) -> usize {
    sequence.chars().filter(|&c| c == CYSTEINE).count()
}

/// Sum of residue masses in kDa, rounded to 3 decimal places.
///
/// Ambiguity codes (X, B, Z, ...) and gaps are rejected rather than skipped;
/// `position` in the error is 1-based within `sequence`.
pub fn molecular_weight_kda(sequence: &str) -> PipelineResult<f64> {
    let mut mass = 0.0;
    for (i, residue) in sequence.chars().enumerate() {
        mass += residue_mass(residue)
            .ok_or(PipelineError::UnknownResidue { residue, position: i + 1 })?;
    }
    Ok(round_kda(mass / 1000.0))
}

fn round_kda(kda: f64) -> f64 {
    (kda * 1000.0).round() / 1000.0
}

/// Cuts the signal peptide off and measures what is left.
pub fn analyze_mature(sequence: &str, cleavage: CleavageSite) -> PipelineResult<MatureProtein> {
    let mature = mature_sequence(sequence, cleavage);
    let molecular_weight_kda = molecular_weight_kda(mature)?;
    Ok(MatureProtein {
        sequence: mature.to_string(),
        cysteine_count: cysteine_count(mature),
        molecular_weight_kda,
    })
}
