use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One of the two normalized speaker identities after collapsing raw tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    A,
    B,
}

impl Bucket {
    pub fn other(self) -> Self {
        match self {
            Bucket::A => Bucket::B,
            Bucket::B => Bucket::A,
        }
    }
}

/// Raw-tag to bucket assignment, built once during ingest and read-only
/// afterward.
///
/// A closed enum so that downstream stages cannot see more than two buckets:
/// an N-bucket result is structurally unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SpeakerMap {
    /// No speakers detected (empty or fully filtered input).
    Empty,
    /// A single raw tag; all tokens map to bucket A.
    Single { tag: String },
    /// Two or more raw tags collapsed onto exactly two buckets.
    Dual { assignments: HashMap<String, Bucket> },
}

impl SpeakerMap {
    /// Bucket for a raw tag, if the tag was seen during ingest.
    pub fn bucket_for(&self, tag: &str) -> Option<Bucket> {
        match self {
            SpeakerMap::Empty => None,
            SpeakerMap::Single { tag: single } => (single == tag).then_some(Bucket::A),
            SpeakerMap::Dual { assignments } => assignments.get(tag).copied(),
        }
    }

    /// Number of buckets in use.
    pub fn unique_after(&self) -> usize {
        match self {
            SpeakerMap::Empty => 0,
            SpeakerMap::Single { .. } => 1,
            SpeakerMap::Dual { .. } => 2,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, SpeakerMap::Single { .. })
    }
}

/// A confidence-filtered, bucket-assigned unit of speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Start timestamp in seconds. Invariant: `t0 <= t1`.
    pub t0: f64,
    /// End timestamp in seconds.
    pub t1: f64,
    /// Normalized speaker identity.
    pub bucket: Bucket,
    /// Text, space-joined when items are merged.
    pub text: String,
    /// Mean transcription confidence over the folded tokens (0-1).
    pub confidence: f64,
    /// Whether this item is a filler/backchannel utterance.
    pub is_filler: bool,
    /// Number of raw tokens folded into this item; weights the mean
    /// confidence so merging stays associative.
    pub token_count: usize,
}

impl NormalizedItem {
    /// Duration of this item in seconds.
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Diagnostic counters from ingest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Distinct raw tags before collapsing.
    pub unique_before: usize,
    /// Buckets after collapsing (0, 1 or 2).
    pub unique_after: usize,
    /// Tokens dropped by the confidence cutoff.
    pub dropped_low_conf: usize,
}
