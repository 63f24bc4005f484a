use tracing::{debug, warn};

use crate::aminoacid::analyze_mature;
use crate::protein::RecordSet;
use crate::types::CleavageSite;

/// Combines the SignalP and DeepSig cleavage sites of one protein.
///
/// A signal peptide is only accepted when both tools predict one. When the
/// two sites differ, SignalP's site is used.
pub fn reconcile(signalp: CleavageSite, deepsig: CleavageSite) -> Option<CleavageSite> {
    if signalp.is_predicted() && deepsig.is_predicted() {
        Some(signalp)
    } else {
        None
    }
}

/// Outcome of reconciling and analysing a whole record set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub with_signal_peptide: usize,
    /// Reconciled, but the two tools disagreed on the site
    pub disagreements: usize,
    /// Reconciled, but the mature sequence held an unknown residue
    pub skipped_unknown_residue: Vec<String>,
}

/// Sets `reconciled_cleavage` on every record.
pub fn reconcile_records(records: &mut RecordSet) -> ReconcileStats {
    let mut stats = ReconcileStats::default();
    for record in records.iter_mut() {
        record.reconciled_cleavage = reconcile(record.signalp_cleavage, record.deepsig_cleavage);
        if record.reconciled_cleavage.is_some() {
            stats.with_signal_peptide += 1;
            if record.signalp_cleavage != record.deepsig_cleavage {
                stats.disagreements += 1;
                debug!(
                    protein = %record.id,
                    signalp = %record.signalp_cleavage,
                    deepsig = %record.deepsig_cleavage,
                    "cleavage sites disagree, using SignalP"
                );
            }
        }
    }
    stats
}

/// Reconciles every record and attaches mature-protein properties.
///
/// Proteins whose mature sequence contains a residue outside the mass table
/// are logged, listed in the stats and left without mature properties, which
/// keeps them out of the candidate set.
pub fn reconcile_and_analyze(records: &mut RecordSet) -> ReconcileStats {
    let mut stats = reconcile_records(records);

    for record in records.iter_mut() {
        let Some(site) = record.reconciled_cleavage else {
            record.mature = None;
            continue;
        };
        if site.get() > record.sequence.chars().count() {
            warn!(
                protein = %record.id,
                cleavage = %site,
                length = record.sequence.chars().count(),
                "cleavage site beyond the sequence end, mature protein is empty"
            );
        }
        match analyze_mature(&record.sequence, site) {
            Ok(mature) => record.mature = Some(mature),
            Err(err) => {
                warn!(protein = %record.id, error = %err, "cannot analyse mature protein, skipping");
                record.mature = None;
                stats.skipped_unknown_residue.push(record.id.clone());
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protein::ProteinRecord;

    #[test]
    fn test_reconcile_requires_both_predictions() {
        assert_eq!(reconcile(CleavageSite::new(16), CleavageSite::NONE), None);
        assert_eq!(reconcile(CleavageSite::NONE, CleavageSite::new(16)), None);
        assert_eq!(reconcile(CleavageSite::NONE, CleavageSite::NONE), None);
        assert_eq!(
            reconcile(CleavageSite::new(16), CleavageSite::new(16)),
            Some(CleavageSite::new(16))
        );
    }

    #[test]
    fn test_reconcile_prefers_signalp_on_disagreement() {
        assert_eq!(
            reconcile(CleavageSite::new(18), CleavageSite::new(22)),
            Some(CleavageSite::new(18))
        );
        assert_eq!(
            reconcile(CleavageSite::new(25), CleavageSite::new(19)),
            Some(CleavageSite::new(25))
        );
    }

    fn record(id: &str, sequence: &str, signalp: usize, deepsig: usize) -> ProteinRecord {
        let mut record = ProteinRecord::new(id, sequence);
        record.signalp_cleavage = CleavageSite::new(signalp);
        record.deepsig_cleavage = CleavageSite::new(deepsig);
        record
    }

    #[test]
    fn test_reconcile_and_analyze() {
        let mut set = RecordSet::new();
        set.insert(record("both", "MKWVTFISLLFLFSSAYSCCGVFRR", 18, 20));
        set.insert(record("signalp_only", "MKWVTFISLLFLFSSAYSCCGVFRR", 18, 0));
        set.insert(record("bad_residue", "MKWVTFISLLFLFSSAYSCXGVFRR", 18, 18));
        set.insert(record("x_in_signal", "MKWVTFISLXFLFSSAYSCCGVFRR", 18, 18));

        let stats = reconcile_and_analyze(&mut set);
        assert_eq!(stats.with_signal_peptide, 3);
        assert_eq!(stats.disagreements, 1);
        assert_eq!(stats.skipped_unknown_residue, vec!["bad_residue".to_string()]);

        let both = set.get("both").unwrap();
        assert_eq!(both.reconciled_cleavage, Some(CleavageSite::new(18)));
        assert_eq!(both.mature.as_ref().unwrap().sequence, "CCGVFRR");

        assert!(set.get("signalp_only").unwrap().mature.is_none());
        assert!(set.get("bad_residue").unwrap().mature.is_none());
        assert!(set.get("x_in_signal").unwrap().mature.is_some());
    }
}
