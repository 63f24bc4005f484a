use serde::{Deserialize, Serialize};

use crate::protein::{DomainHit, MatureProtein, ProteinRecord, RecordSet};
use crate::types::CazymeStatus;

/// Selection thresholds for effector candidates
///
/// Each limit is inclusive. Setting any threshold to 0 disables that
/// criterion; for the weight maximum 0 means no upper limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum EffectorP score
    pub effector_score_min: f64,
    /// Maximum molecular weight of the mature protein, in kDa
    pub molecular_weight_max_kda: f64,
    /// Minimum number of cysteines in the mature protein
    pub cysteine_count_min: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { effector_score_min: 0.8, molecular_weight_max_kda: 25.0, cysteine_count_min: 2 }
    }
}

impl Thresholds {
    /// Whether a protein with these properties passes every criterion
    pub fn admits(&self, effector_score: f64, mature: &MatureProtein) -> bool {
        let score_ok = effector_score >= self.effector_score_min;
        let weight_ok = self.molecular_weight_max_kda == 0.0
            || mature.molecular_weight_kda <= self.molecular_weight_max_kda;
        let cysteines_ok = mature.cysteine_count >= self.cysteine_count_min;
        score_ok & weight_ok & cysteines_ok
    }
}

/// Domain annotations of a candidate, or the explicit absence of any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAnnotation {
    Hits(Vec<DomainHit>),
    NoHits,
}

impl DomainAnnotation {
    fn from_hits(hits: &[DomainHit]) -> Self {
        if hits.is_empty() {
            DomainAnnotation::NoHits
        } else {
            DomainAnnotation::Hits(hits.to_vec())
        }
    }
}

/// A protein admitted by the thresholds, with everything the report needs
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub sequence: String,
    pub mature: MatureProtein,
    pub effector_score: f64,
    pub cazyme: CazymeStatus,
    pub domains: DomainAnnotation,
}

impl Candidate {
    fn from_record(record: &ProteinRecord, mature: &MatureProtein) -> Self {
        Self {
            id: record.id.clone(),
            sequence: record.sequence.clone(),
            mature: mature.clone(),
            effector_score: record.effector_score,
            cazyme: record.cazyme,
            domains: DomainAnnotation::from_hits(&record.domain_hits),
        }
    }
}

/// Candidates in the order their proteins appear in the sequence file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }
}

/// Applies the thresholds to every protein that has mature-protein properties.
pub fn classify(records: &RecordSet, thresholds: &Thresholds) -> CandidateSet {
    let candidates = records
        .iter()
        .filter_map(|record| record.mature.as_ref().map(|mature| (record, mature)))
        .filter(|(record, mature)| thresholds.admits(record.effector_score, mature))
        .map(|(record, mature)| Candidate::from_record(record, mature))
        .collect();
    CandidateSet { candidates }
}
