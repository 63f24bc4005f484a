use std::collections::HashMap;

use crate::types::{CazymeStatus, CleavageSite};

/// One domain-annotation row, stored verbatim from the tag column onwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainHit(pub Vec<String>);

impl DomainHit {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// The annotating analysis, e.g. "Pfam" or "SignalP_EUK"
    pub fn analysis(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

/// Properties of the protein left after signal-peptide removal
#[derive(Debug, Clone, PartialEq)]
pub struct MatureProtein {
    pub sequence: String,
    pub cysteine_count: usize,
    /// Monoisotopic mass in kDa, rounded to 3 decimal places
    pub molecular_weight_kda: f64,
}

/// Everything known about a single protein of one sample
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinRecord {
    pub id: String,
    pub sequence: String,
    pub signalp_cleavage: CleavageSite,
    pub deepsig_cleavage: CleavageSite,
    pub effector_score: f64,
    pub domain_hits: Vec<DomainHit>,
    pub cazyme: CazymeStatus,
    /// Set once both predictors agree there is a signal peptide
    pub reconciled_cleavage: Option<CleavageSite>,
    /// Present iff `reconciled_cleavage` is set and the analysis succeeded
    pub mature: Option<MatureProtein>,
}

impl ProteinRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            signalp_cleavage: CleavageSite::NONE,
            deepsig_cleavage: CleavageSite::NONE,
            effector_score: 0.0,
            domain_hits: Vec::new(),
            cazyme: CazymeStatus::NotApplicable,
            reconciled_cleavage: None,
            mature: None,
        }
    }

    pub fn has_signal_peptide(&self) -> bool {
        self.reconciled_cleavage.is_some()
    }
}

/// Insertion-ordered collection of the records of one sample
///
/// Order is the order in which identifiers were first seen in the
/// sequence file; lookups by identifier go through an index.
#[derive(Debug, Default, Clone)]
pub struct RecordSet {
    records: Vec<ProteinRecord>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing the sequence of an existing one.
    ///
    /// Returns `true` when the identifier was already present. A replaced
    /// record keeps its original position and is reset to defaults.
    pub fn insert(&mut self, record: ProteinRecord) -> bool {
        match self.index.get(&record.id) {
            Some(&pos) => {
                self.records[pos] = record;
                true
            }
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProteinRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ProteinRecord> {
        match self.index.get(id) {
            Some(&pos) => self.records.get_mut(pos),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Appends a domain hit to a protein's list; `false` if the id is unknown.
    pub fn push_domain_hit(&mut self, id: &str, hit: DomainHit) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.domain_hits.push(hit);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProteinRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProteinRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = ProteinRecord::new("P1", "MKW");
        assert_eq!(record.signalp_cleavage, CleavageSite::NONE);
        assert_eq!(record.deepsig_cleavage, CleavageSite::NONE);
        assert_eq!(record.effector_score, 0.0);
        assert!(record.domain_hits.is_empty());
        assert_eq!(record.cazyme, CazymeStatus::NotApplicable);
        assert!(!record.has_signal_peptide());
        assert!(record.mature.is_none());
    }

    #[test]
    fn test_insert_preserves_first_seen_order() {
        let mut set = RecordSet::new();
        assert!(!set.insert(ProteinRecord::new("B", "AAA")));
        assert!(!set.insert(ProteinRecord::new("A", "CCC")));
        assert!(set.insert(ProteinRecord::new("B", "GGG")));

        let ids: Vec<_> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(set.get("B").unwrap().sequence, "GGG");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_push_domain_hit_appends() {
        let mut set = RecordSet::new();
        set.insert(ProteinRecord::new("P1", "MKW"));

        assert!(set.push_domain_hit("P1", DomainHit::new(vec!["Pfam".into()])));
        assert!(set.push_domain_hit("P1", DomainHit::new(vec!["SignalP_EUK".into()])));
        assert!(!set.push_domain_hit("missing", DomainHit::new(vec!["Pfam".into()])));

        let hits = &set.get("P1").unwrap().domain_hits;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].analysis(), Some("Pfam"));
        assert_eq!(hits[1].analysis(), Some("SignalP_EUK"));
    }
}
