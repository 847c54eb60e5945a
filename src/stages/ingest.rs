use std::collections::HashMap;

use tracing::debug;

use crate::config::IngestConfig;
use crate::error::PipelineError;
use crate::models::{Bucket, IngestStats, NormalizedItem, RawToken, SpeakerMap};

/// Result of ingest and confidence filtering.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub items: Vec<NormalizedItem>,
    pub speaker_map: SpeakerMap,
    pub stats: IngestStats,
}

/// Policy for collapsing more than two raw speaker tags into two buckets.
///
/// The exact rule is a tunable heuristic; implementations must map every tag
/// in `tags` to a bucket (no tag left unmapped, no third bucket possible).
pub trait ClusterPolicy {
    /// `tags` is the distinct tag set in order of first appearance; `tokens`
    /// are the confidence-filtered tokens in time order.
    fn cluster(&self, tokens: &[RawToken], tags: &[String]) -> HashMap<String, Bucket>;
}

/// Default policy: the two most frequent tags seed the buckets (frequency
/// ties broken by first appearance); each remaining tag votes, token by
/// token, for the seed whose speech it is temporally nearest to.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAdjacency;

impl ClusterPolicy for GreedyAdjacency {
    fn cluster(&self, tokens: &[RawToken], tags: &[String]) -> HashMap<String, Bucket> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.speaker.as_str()).or_insert(0) += 1;
        }

        // Stable sort keeps first-appearance order among equal counts.
        let mut ordered: Vec<&String> = tags.iter().collect();
        ordered.sort_by_key(|tag| std::cmp::Reverse(counts.get(tag.as_str()).copied().unwrap_or(0)));

        let seed_a = ordered[0].clone();
        let seed_b = ordered[1].clone();

        let mut assignments = HashMap::new();
        assignments.insert(seed_a.clone(), Bucket::A);
        assignments.insert(seed_b.clone(), Bucket::B);

        for tag in ordered.iter().skip(2) {
            let bucket = nearest_seed(tokens, tag, &seed_a, &seed_b);
            debug!(tag = %tag, ?bucket, "clustered minor speaker tag");
            assignments.insert((*tag).clone(), bucket);
        }

        assignments
    }
}

/// Majority vote over a minor tag's tokens: each token backs the seed whose
/// nearest token is closest in time. Ties go to the earlier-appearing seed.
fn nearest_seed(tokens: &[RawToken], tag: &str, seed_a: &str, seed_b: &str) -> Bucket {
    let mut votes_a = 0usize;
    let mut votes_b = 0usize;

    for token in tokens.iter().filter(|t| t.speaker == tag) {
        let dist_a = nearest_distance(token, tokens, seed_a);
        let dist_b = nearest_distance(token, tokens, seed_b);
        match (dist_a, dist_b) {
            (Some(a), Some(b)) if b < a => votes_b += 1,
            (Some(_), _) => votes_a += 1,
            (None, Some(_)) => votes_b += 1,
            (None, None) => {}
        }
    }

    if votes_b > votes_a { Bucket::B } else { Bucket::A }
}

/// Smallest time distance between a token and any token of the given tag.
fn nearest_distance(token: &RawToken, tokens: &[RawToken], tag: &str) -> Option<f64> {
    tokens
        .iter()
        .filter(|t| t.speaker == tag)
        .map(|t| {
            let before = (token.start_time - t.end_time).abs();
            let after = (t.start_time - token.end_time).abs();
            before.min(after)
        })
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Ingest raw diarized tokens: validate, confidence-filter, mark fillers and
/// collapse the raw tag space to at most two buckets.
///
/// Empty input yields empty output with zeroed stats, never an error. The
/// only rejected input is a malformed time range.
pub fn ingest(
    tokens: &[RawToken],
    config: &IngestConfig,
    fillers: &[String],
) -> Result<IngestResult, PipelineError> {
    ingest_with_policy(tokens, config, fillers, &GreedyAdjacency)
}

/// `ingest` with an explicit clustering policy.
pub fn ingest_with_policy(
    tokens: &[RawToken],
    config: &IngestConfig,
    fillers: &[String],
    policy: &dyn ClusterPolicy,
) -> Result<IngestResult, PipelineError> {
    for (index, token) in tokens.iter().enumerate() {
        if token.end_time < token.start_time {
            return Err(PipelineError::InvalidInput {
                index,
                t0: token.start_time,
                t1: token.end_time,
            });
        }
    }

    let mut sorted: Vec<RawToken> = tokens.to_vec();
    sorted.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let before = sorted.len();
    sorted.retain(|t| t.confidence >= config.min_confidence);
    let dropped_low_conf = before - sorted.len();

    // Distinct tags in order of first appearance.
    let mut tags: Vec<String> = Vec::new();
    for token in &sorted {
        if !tags.iter().any(|t| t == &token.speaker) {
            tags.push(token.speaker.clone());
        }
    }

    let speaker_map = match tags.len() {
        0 => SpeakerMap::Empty,
        1 => SpeakerMap::Single { tag: tags[0].clone() },
        2 => {
            let mut assignments = HashMap::new();
            assignments.insert(tags[0].clone(), Bucket::A);
            assignments.insert(tags[1].clone(), Bucket::B);
            SpeakerMap::Dual { assignments }
        }
        _ => SpeakerMap::Dual {
            assignments: policy.cluster(&sorted, &tags),
        },
    };

    let items: Vec<NormalizedItem> = sorted
        .iter()
        .map(|token| NormalizedItem {
            t0: token.start_time,
            t1: token.end_time,
            // The map was built from this token set, so the tag is present.
            bucket: speaker_map.bucket_for(&token.speaker).unwrap_or(Bucket::A),
            text: token.text.clone(),
            confidence: token.confidence,
            is_filler: is_filler(&token.text, fillers),
            token_count: 1,
        })
        .collect();

    let stats = IngestStats {
        unique_before: tags.len(),
        unique_after: speaker_map.unique_after(),
        dropped_low_conf,
    };

    Ok(IngestResult {
        items,
        speaker_map,
        stats,
    })
}

fn is_filler(text: &str, fillers: &[String]) -> bool {
    let word = text.trim();
    fillers.iter().any(|f| f.eq_ignore_ascii_case(word))
}
