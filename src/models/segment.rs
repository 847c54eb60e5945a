use serde::{Deserialize, Serialize};

use super::Bucket;

/// A temporally stable, possibly merged span produced by the smoother.
///
/// Invariant: segments in a smoother output are ordered by `t0` and
/// non-overlapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothedSegment {
    pub t0: f64,
    pub t1: f64,
    pub bucket: Bucket,
    pub text: String,
}

impl SmoothedSegment {
    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Diagnostic counters from smoothing.
///
/// Invariant: `flips_after <= flips_before` for every input — smoothing must
/// never increase instability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingStats {
    /// Bucket transitions in the raw item sequence.
    pub flips_before: usize,
    /// Bucket transitions in the smoothed segment sequence.
    pub flips_after: usize,
    /// Same-bucket merges performed while forming segments.
    pub merged: usize,
    /// Short segments absorbed into a neighbor.
    pub crumbs_absorbed: usize,
}
