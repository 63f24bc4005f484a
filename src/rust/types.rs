use std::fmt;

/// A type-safe wrapper for a signal-peptide cleavage position
///
/// The value is the 0-based offset of the first residue of the mature
/// protein. Zero means the predictor reported no signal peptide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CleavageSite(pub usize);

impl CleavageSite {
    pub const NONE: CleavageSite = CleavageSite(0);

    pub fn new(offset: usize) -> Self {
        CleavageSite(offset)
    }

    /// Whether the predictor reported a signal peptide at all
    pub fn is_predicted(&self) -> bool {
        self.0 > 0
    }

    /// Get the raw value
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CleavageSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Carbohydrate-active enzyme status of a protein
///
/// `NotApplicable` is kept distinct from `No`: it means the CAZyme input was
/// never supplied for the sample, not that the protein had too few hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CazymeStatus {
    Yes,
    No,
    #[default]
    NotApplicable,
}

impl CazymeStatus {
    /// Minimum number of agreeing CAZyme tools for a positive call
    pub const MIN_HITS: u32 = 2;

    pub fn from_hit_count(hits: u32) -> Self {
        if hits >= Self::MIN_HITS {
            CazymeStatus::Yes
        } else {
            CazymeStatus::No
        }
    }
}

impl fmt::Display for CazymeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CazymeStatus::Yes => write!(f, "Yes"),
            CazymeStatus::No => write!(f, "No"),
            CazymeStatus::NotApplicable => write!(f, "NA"),
        }
    }
}

/// One of the per-sample input files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Protein sequences (FASTA)
    Proteins,
    /// Domain annotation table, also carrying the SignalP cleavage sites
    InterProScan,
    /// Second, independent signal-peptide predictor
    DeepSig,
    /// Effector classifier scores
    EffectorP,
    /// Optional CAZyme annotation table
    Cazymes,
}

impl InputSource {
    pub const ALL: [InputSource; 5] = [
        InputSource::Proteins,
        InputSource::InterProScan,
        InputSource::DeepSig,
        InputSource::EffectorP,
        InputSource::Cazymes,
    ];

    /// File-name suffix used to find this input inside a sample directory
    pub fn file_suffix(&self) -> &'static str {
        match self {
            InputSource::Proteins => "proteins.fasta",
            InputSource::InterProScan => "interproscan.tsv",
            InputSource::DeepSig => "deepsig.out",
            InputSource::EffectorP => "effectorP.tsv",
            InputSource::Cazymes => "cazymes.txt",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, InputSource::Cazymes)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputSource::Proteins => "proteins",
            InputSource::InterProScan => "interproscan",
            InputSource::DeepSig => "deepsig",
            InputSource::EffectorP => "effectorP",
            InputSource::Cazymes => "cazymes",
        };
        write!(f, "{}", name)
    }
}
