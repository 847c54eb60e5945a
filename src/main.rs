use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dianorm::{
    parse_engine_file, write_artifacts, write_narrative, Language, Pipeline, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "dianorm")]
#[command(author, version, about = "Diarization normalization and turn reconstruction pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a diarized transcript into a clinician-readable narrative
    Process {
        /// Input transcript file (diarization engine JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the narrative text
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for full pipeline artifacts (JSON)
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Transcript language code (en, fr, fr-CA, ...)
        #[arg(long, default_value = "en")]
        language: String,

        /// Minimum token confidence; lower-confidence tokens are dropped
        #[arg(long, default_value = "0.5")]
        min_confidence: f64,

        /// Silence gap in seconds that forces a new turn
        #[arg(long, default_value = "2.5")]
        turn_gap: f64,

        /// Narrative line width (0 disables wrapping)
        #[arg(long, default_value = "80")]
        line_length: usize,

        /// Swap the patient and clinician role assignment
        #[arg(long)]
        swap_roles: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a transcript and report diagnostics without writing output
    Analyze {
        /// Input transcript file (diarization engine JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Transcript language code (en, fr, fr-CA, ...)
        #[arg(long, default_value = "en")]
        language: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            artifacts,
            language,
            min_confidence,
            turn_gap,
            line_length,
            swap_roles,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = PipelineConfig::default();
            config.language = Language::from_code(&language);
            config.ingest.min_confidence = min_confidence;
            config.turns.gap_threshold = turn_gap;
            config.narrative.max_line_length = line_length;
            config.role_map.swap_roles = swap_roles;
            process_transcript(input, output, artifacts, config)
        }
        Commands::Analyze {
            input,
            language,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = PipelineConfig::default();
            config.language = Language::from_code(&language);
            analyze_transcript(input, config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn process_transcript(
    input: PathBuf,
    output: PathBuf,
    artifacts_path: Option<PathBuf>,
    config: PipelineConfig,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = parse_engine_file(&input).context("Failed to parse input transcript")?;
    info!("Loaded {} tokens", transcript.tokens.len());

    let pipeline = Pipeline::new(config);
    let artifacts = pipeline
        .run(&transcript.tokens)
        .context("Pipeline failed")?;

    write_narrative(&artifacts.narrative, &output)
        .context("Failed to write narrative output")?;
    info!("Narrative written to {:?}", output);

    if let Some(path) = artifacts_path {
        write_artifacts(&artifacts, &path).context("Failed to write artifacts")?;
        info!("Artifacts written to {:?}", path);
    }

    info!(
        "Complete: {} turns ({} patient, {} clinician), {:.1}s, {} words",
        artifacts.turn_stats.total_turns,
        artifacts.turn_stats.patient_turns,
        artifacts.turn_stats.clinician_turns,
        artifacts.turn_stats.total_duration,
        artifacts.narrative.metadata.word_count
    );
    Ok(())
}

fn analyze_transcript(input: PathBuf, config: PipelineConfig) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = parse_engine_file(&input).context("Failed to parse input transcript")?;
    info!("Loaded {} tokens", transcript.tokens.len());

    let pipeline = Pipeline::new(config);
    let artifacts = pipeline
        .run(&transcript.tokens)
        .context("Pipeline failed")?;

    info!(
        "Speakers: {} raw tags collapsed to {}",
        artifacts.ingest_stats.unique_before, artifacts.ingest_stats.unique_after
    );
    info!(
        "Dropped {} low-confidence tokens",
        artifacts.ingest_stats.dropped_low_conf
    );
    info!(
        "Smoothing: {} flips before, {} after; {} merges, {} crumbs absorbed",
        artifacts.smoothing_stats.flips_before,
        artifacts.smoothing_stats.flips_after,
        artifacts.smoothing_stats.merged,
        artifacts.smoothing_stats.crumbs_absorbed
    );
    info!(
        "Turns: {} total ({} patient, {} clinician) over {:.1}s",
        artifacts.turn_stats.total_turns,
        artifacts.turn_stats.patient_turns,
        artifacts.turn_stats.clinician_turns,
        artifacts.turn_stats.total_duration
    );
    info!(
        "Stage timings (ms): ingest={} merge={} smooth={} roles={} turns={} render={} total={}",
        artifacts.timings.ingest_ms,
        artifacts.timings.merge_ms,
        artifacts.timings.smooth_ms,
        artifacts.timings.role_map_ms,
        artifacts.timings.turns_ms,
        artifacts.timings.render_ms,
        artifacts.timings.total_ms
    );
    Ok(())
}
