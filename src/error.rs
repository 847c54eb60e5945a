use thiserror::Error;

/// Errors surfaced by the pipeline.
///
/// Noisy input (empty transcripts, single speakers, all-low-confidence
/// tokens) is the normal case and never produces an error; the only failure
/// the pipeline reports is a caller contract violation caught at the ingest
/// boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A token whose end time precedes its start time.
    #[error("invalid input: token {index} has end time {t1} before start time {t0}")]
    InvalidInput { index: usize, t0: f64, t1: f64 },
}
