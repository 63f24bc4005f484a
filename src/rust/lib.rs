//! Selection of secreted effector candidates from predictor outputs.
//!
//! A sample is a protein FASTA plus the tables of several upstream tools:
//! InterProScan (domains, and SignalP cleavage sites), DeepSig, EffectorP and
//! optionally dbCAN. The crate joins them into one [`protein::ProteinRecord`]
//! per protein, accepts a signal peptide only when SignalP and DeepSig agree
//! that one exists, measures the mature protein and keeps the proteins that
//! pass the [`classify::Thresholds`].

pub mod aminoacid;
pub mod classify;
pub mod config;
pub mod errors;
pub mod export;
pub mod fasta;
pub mod io;
pub mod loaders;
pub mod logging;
pub mod pipeline;
pub mod protein;
pub mod reconcile;
pub mod sample;
pub mod types;


pub use classify::{classify, Candidate, CandidateSet, Thresholds};
pub use config::{PipelineConfig, PipelineConfigBuilder, RunMode};
pub use errors::{PipelineError, PipelineResult};
pub use pipeline::{analyze_sample, run_sample, run_samples, SampleSummary};
pub use protein::{ProteinRecord, RecordSet};
pub use sample::SampleInputs;
