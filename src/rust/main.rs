use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use effectorseek::logging::{init_logging, level_from_verbosity};
use effectorseek::{run_samples, PipelineConfigBuilder, RunMode, SampleInputs};

#[derive(Parser)]
#[command(name = "effectorseek")]
#[command(about = "Select secreted effector candidates from signal peptide, EffectorP, InterProScan and CAZyme predictions")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SampleArgs {
    /// Sample directories, each holding *proteins.fasta, *interproscan.tsv,
    /// *deepsig.out, *effectorP.tsv and optionally *cazymes.txt
    #[arg(required = true)]
    samples: Vec<PathBuf>,

    /// Output directory; results go to <output>/<sample>/
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// InterProScan analysis name carrying the SignalP predictions
    #[arg(long, default_value = "SignalP_EUK")]
    signalp_tag: String,

    /// Number of samples processed in parallel
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select effector candidates
    Candidates {
        #[command(flatten)]
        samples: SampleArgs,

        /// Minimum EffectorP score (0 disables the criterion)
        #[arg(long, default_value = "0.8")]
        effector_score_min: f64,

        /// Maximum molecular weight of the mature protein in kDa (0 disables the criterion)
        #[arg(long, default_value = "25")]
        molecular_weight_max_kda: f64,

        /// Minimum number of cysteines in the mature protein (0 disables the criterion)
        #[arg(long, default_value = "2")]
        cysteine_count_min: usize,
    },
    /// Export every protein with a signal peptide predicted by both SignalP and DeepSig
    SignalPeptides {
        #[command(flatten)]
        samples: SampleArgs,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(level_from_verbosity(cli.verbose, cli.quiet))?;

    let (args, builder) = match cli.command {
        Commands::Candidates {
            samples,
            effector_score_min,
            molecular_weight_max_kda,
            cysteine_count_min,
        } => {
            let builder = PipelineConfigBuilder::new(&samples.output)
                .mode(RunMode::Candidates)
                .effector_score_min(effector_score_min)
                .molecular_weight_max_kda(molecular_weight_max_kda)
                .cysteine_count_min(cysteine_count_min);
            (samples, builder)
        }
        Commands::SignalPeptides { samples } => {
            let builder = PipelineConfigBuilder::new(&samples.output).mode(RunMode::SignalPeptides);
            (samples, builder)
        }
    };

    let mut builder = builder.signalp_tag(args.signalp_tag.as_str());
    if let Some(threads) = args.threads {
        builder = builder.num_threads(threads);
    }
    let config = builder.build()?;

    let mut inputs = Vec::with_capacity(args.samples.len());
    let mut failed = 0usize;
    for dir in &args.samples {
        match SampleInputs::locate(dir) {
            Ok(sample) => inputs.push(sample),
            Err(err) => {
                error!(dir = %dir.display(), error = %err, "cannot use sample directory");
                failed += 1;
            }
        }
    }

    let results = run_samples(&inputs, &config).context("failed to start sample processing")?;
    for result in &results {
        match result {
            Ok(summary) => {
                for path in &summary.outputs {
                    info!(sample = %summary.sample, path = %path.display(), "output written");
                }
            }
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        error!(failed, total = args.samples.len(), "some samples failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
