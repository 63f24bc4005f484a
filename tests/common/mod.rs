#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SIGNAL_PEPTIDE: &str = "MKWVTFISLLFLFSSAYS";

/// Writes a complete sample directory named `name` under `root`.
///
/// Proteins:
/// - EFF1: signal peptide from both tools, 2 cysteines, EffectorP 0.9 -> candidate
/// - EFF2: both tools disagree (18 vs 20), 4 cysteines, EffectorP 0.95 -> candidate
/// - NOSP: only DeepSig predicts a signal peptide -> never a candidate
/// - LOWC: signal peptide, no cysteines -> fails the cysteine minimum
/// - NONEFF: signal peptide, 3 cysteines, classified non-effector -> score 0
/// - BADAA: signal peptide, X in the mature part -> skipped
pub fn write_sample(root: &Path, name: &str, with_cazymes: bool) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();

    let fasta = format!(
        ">EFF1\n{sp}CCGVFRR\n>EFF2\n{sp}\nGGCCAACC\n\n>NOSP\nMAAAACCCCGG\n>LOWC\n{sp}RGVFRR\n>NONEFF\n{sp}CCCAAA\n>BADAA\n{sp}CCXAA\n",
        sp = SIGNAL_PEPTIDE
    );
    fs::write(dir.join(format!("{}.proteins.fasta", name)), fasta).unwrap();

    let signalp = |id: &str, site: usize| {
        format!("{}\tmd5\t30\tSignalP_EUK\tSignalP-noTM\tSignalP-noTM\t1\t{}\t-\n", id, site)
    };
    let interproscan = [
        signalp("EFF1", 18),
        "EFF1\tmd5\t30\tPfam\tPF16541\tAltA1\t19\t25\t1.1E-5\n".to_string(),
        signalp("EFF2", 18),
        signalp("LOWC", 18),
        signalp("NONEFF", 18),
        signalp("BADAA", 18),
    ]
    .concat();
    fs::write(dir.join(format!("{}.interproscan.tsv", name)), interproscan).unwrap();

    let deepsig = "EFF1\tSignalPeptide\t0.99\t18\n\
                   EFF2\tSignalPeptide\t0.97\t20\n\
                   NOSP\tSignalPeptide\t0.91\t5\n\
                   LOWC\tSignalPeptide\t0.95\t18\n\
                   NONEFF\tSignalPeptide\t0.95\t18\n\
                   BADAA\tSignalPeptide\t0.95\t18\n";
    fs::write(dir.join(format!("{}.deepsig.out", name)), deepsig).unwrap();

    let effectorp = "EFF1\tEffector\t0.9\n\
                     EFF2\tEffector\t0.95\n\
                     NOSP\tEffector\t0.99\n\
                     LOWC\tEffector\t0.99\n\
                     NONEFF\tNon-effector\t0.92\n\
                     BADAA\tEffector\t0.99\n";
    fs::write(dir.join(format!("{}.effectorP.tsv", name)), effectorp).unwrap();

    if with_cazymes {
        let cazymes = "Gene ID\tEC#\tHMMER\teCAMI\tDIAMOND\t#ofTools\n\
                       EFF1\t-\tGH18(1-25)\tGH18\tGH18\t3\n\
                       EFF2\t-\tCBM1(1-20)\t-\t-\t1\n";
        fs::write(dir.join(format!("{}.cazymes.txt", name)), cazymes).unwrap();
    }

    dir
}
