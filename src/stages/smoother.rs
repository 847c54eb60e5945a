use crate::config::SmootherConfig;
use crate::models::{Bucket, NormalizedItem, SmoothedSegment, SmoothingStats};

use super::merge::join_text;

/// Result of temporal smoothing.
#[derive(Debug, Clone)]
pub struct SmoothingResult {
    pub segments: Vec<SmoothedSegment>,
    pub stats: SmoothingStats,
}

/// Working segment carrying mean confidence for crumb-absorption decisions;
/// stripped before the result is returned.
#[derive(Debug, Clone)]
struct WorkSegment {
    t0: f64,
    t1: f64,
    bucket: Bucket,
    text: String,
    confidence: f64,
    token_count: usize,
}

/// Apply temporal smoothing to normalized items: windowed majority voting,
/// minimum-hold hysteresis, crumb absorption, same-bucket merging and
/// disfluency cleanup.
///
/// Guarantees `flips_after <= flips_before` and never emits more segments
/// than input items.
pub fn smooth(
    items: &[NormalizedItem],
    config: &SmootherConfig,
    fillers: &[String],
) -> SmoothingResult {
    if items.is_empty() {
        return SmoothingResult {
            segments: vec![],
            stats: SmoothingStats::default(),
        };
    }

    let flips_before = count_flips(items.iter().map(|i| i.bucket));

    let voted = windowed_majority_vote(items, config.window_sec);
    let held = apply_minimum_hold(&voted, config);

    let mut merged = 0usize;
    let mut segments = group_segments(&held, config.merge_gap_sec, &mut merged);
    let crumbs_absorbed = absorb_crumbs(&mut segments, config.crumb_max_sec);
    merge_same_bucket(&mut segments, config.merge_gap_sec, &mut merged);

    let flips_after = count_flips(segments.iter().map(|s| s.bucket));

    let segments = segments
        .into_iter()
        .map(|s| SmoothedSegment {
            t0: s.t0,
            t1: s.t1,
            bucket: s.bucket,
            text: clean_disfluencies(&s.text, fillers),
        })
        .collect();

    SmoothingResult {
        segments,
        stats: SmoothingStats {
            flips_before,
            flips_after,
            merged,
            crumbs_absorbed,
        },
    }
}

/// Count bucket transitions in a sequence.
fn count_flips(buckets: impl Iterator<Item = Bucket>) -> usize {
    let mut flips = 0;
    let mut previous: Option<Bucket> = None;
    for bucket in buckets {
        if let Some(prev) = previous {
            if prev != bucket {
                flips += 1;
            }
        }
        previous = Some(bucket);
    }
    flips
}

/// Reassign each item to the majority bucket among items whose start falls
/// within a symmetric window around its own start. Ties keep the item's
/// original bucket, so isolated flips are suppressed without inventing new
/// ones.
fn windowed_majority_vote(items: &[NormalizedItem], window_sec: f64) -> Vec<NormalizedItem> {
    let half = window_sec / 2.0;

    items
        .iter()
        .map(|item| {
            let mut a = 0usize;
            let mut b = 0usize;
            for other in items {
                if other.t0 >= item.t0 - half && other.t0 <= item.t0 + half {
                    match other.bucket {
                        Bucket::A => a += 1,
                        Bucket::B => b += 1,
                    }
                }
            }

            let bucket = if a > b {
                Bucket::A
            } else if b > a {
                Bucket::B
            } else {
                item.bucket
            };

            NormalizedItem {
                bucket,
                ..item.clone()
            }
        })
        .collect()
}

/// Minimum-hold hysteresis: a switch away from the current bucket is only
/// accepted once the assignment has persisted for the configured hold time;
/// rejected switches fold the item into the preceding bucket.
///
/// Items shorter than the crumb threshold are too brief to count as evidence
/// either way: they pass through unchanged, neither triggering nor blocking
/// a switch, and are left for crumb absorption.
fn apply_minimum_hold(items: &[NormalizedItem], config: &SmootherConfig) -> Vec<NormalizedItem> {
    let mut held: Vec<NormalizedItem> = Vec::with_capacity(items.len());
    let mut current: Option<Bucket> = None;
    let mut last_flip = 0.0f64;

    for item in items {
        if item.duration() < config.crumb_max_sec {
            held.push(item.clone());
            continue;
        }

        let bucket = match current {
            None => {
                last_flip = item.t0;
                item.bucket
            }
            Some(bucket) if item.bucket != bucket => {
                if item.t0 - last_flip >= config.min_hold_sec {
                    last_flip = item.t0;
                    item.bucket
                } else {
                    bucket
                }
            }
            Some(bucket) => bucket,
        };
        current = Some(bucket);

        held.push(NormalizedItem {
            bucket,
            ..item.clone()
        });
    }

    held
}

/// Group items into segments, merging adjacent same-bucket items whose gap
/// is within the merge threshold.
fn group_segments(items: &[NormalizedItem], merge_gap: f64, merged: &mut usize) -> Vec<WorkSegment> {
    let mut segments: Vec<WorkSegment> = Vec::new();

    for item in items {
        match segments.last_mut() {
            Some(last) if last.bucket == item.bucket && item.t0 - last.t1 <= merge_gap => {
                absorb_item(last, item);
                *merged += 1;
            }
            _ => segments.push(WorkSegment {
                t0: item.t0,
                t1: item.t1,
                bucket: item.bucket,
                text: item.text.clone(),
                confidence: item.confidence,
                token_count: item.token_count,
            }),
        }
    }

    segments
}

fn absorb_item(segment: &mut WorkSegment, item: &NormalizedItem) {
    let token_count = segment.token_count + item.token_count;
    segment.confidence = (segment.confidence * segment.token_count as f64
        + item.confidence * item.token_count as f64)
        / token_count as f64;
    segment.token_count = token_count;
    segment.t1 = item.t1;
    segment.text = join_text(&segment.text, &item.text);
}

/// Absorb segments shorter than the crumb threshold into a neighbor,
/// preferring the side with higher mean confidence (previous on ties, sole
/// neighbor when only one exists). A lone crumb with no neighbors is kept.
fn absorb_crumbs(segments: &mut Vec<WorkSegment>, crumb_max: f64) -> usize {
    let mut absorbed = 0usize;
    let mut result: Vec<WorkSegment> = Vec::with_capacity(segments.len());
    let mut pending: Vec<WorkSegment> = std::mem::take(segments);
    pending.reverse();

    while let Some(segment) = pending.pop() {
        if segment.t1 - segment.t0 >= crumb_max {
            result.push(segment);
            continue;
        }

        let into_prev = match (result.last(), pending.last()) {
            (Some(prev), Some(next)) => prev.confidence >= next.confidence,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                result.push(segment);
                continue;
            }
        };

        if into_prev {
            if let Some(prev) = result.last_mut() {
                fold_crumb(prev, &segment, true);
            }
        } else if let Some(next) = pending.last_mut() {
            fold_crumb(next, &segment, false);
        }
        absorbed += 1;
    }

    *segments = result;
    absorbed
}

/// Fold a crumb into a receiving segment: extend the span, join the text and
/// update the token-weighted mean confidence so later comparisons see the
/// absorbed tokens.
fn fold_crumb(receiver: &mut WorkSegment, crumb: &WorkSegment, append: bool) {
    let token_count = receiver.token_count + crumb.token_count;
    receiver.confidence = (receiver.confidence * receiver.token_count as f64
        + crumb.confidence * crumb.token_count as f64)
        / token_count as f64;
    receiver.token_count = token_count;
    if append {
        receiver.t1 = crumb.t1;
        receiver.text = join_text(&receiver.text, &crumb.text);
    } else {
        receiver.t0 = crumb.t0;
        receiver.text = join_text(&crumb.text, &receiver.text);
    }
}

/// Merge segments that became adjacent same-bucket after crumb absorption.
fn merge_same_bucket(segments: &mut Vec<WorkSegment>, merge_gap: f64, merged: &mut usize) {
    let mut result: Vec<WorkSegment> = Vec::with_capacity(segments.len());

    for segment in segments.drain(..) {
        match result.last_mut() {
            Some(last) if last.bucket == segment.bucket && segment.t0 - last.t1 <= merge_gap => {
                let token_count = last.token_count + segment.token_count;
                last.confidence = (last.confidence * last.token_count as f64
                    + segment.confidence * segment.token_count as f64)
                    / token_count as f64;
                last.token_count = token_count;
                last.t1 = segment.t1;
                last.text = join_text(&last.text, &segment.text);
                *merged += 1;
            }
            _ => result.push(segment),
        }
    }

    *segments = result;
}

/// Remove filler tokens from text using a fixed lexicon, collapsing the
/// resulting whitespace. Idempotent: cleaning twice equals cleaning once.
pub fn clean_disfluencies(text: &str, fillers: &[String]) -> String {
    text.split_whitespace()
        .filter(|word| !fillers.iter().any(|f| f.eq_ignore_ascii_case(word)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(t0: f64, t1: f64, bucket: Bucket, text: &str) -> NormalizedItem {
        NormalizedItem {
            t0,
            t1,
            bucket,
            text: text.to_string(),
            confidence: 0.9,
            is_filler: false,
            token_count: 1,
        }
    }

    fn fillers() -> Vec<String> {
        vec!["um".to_string(), "uh".to_string(), "euh".to_string()]
    }

    #[test]
    fn test_empty_input() {
        let result = smooth(&[], &SmootherConfig::default(), &fillers());
        assert!(result.segments.is_empty());
        assert_eq!(result.stats, SmoothingStats::default());
    }

    #[test]
    fn test_single_item_unchanged() {
        let items = vec![item(0.0, 1.0, Bucket::A, "hello there")];
        let result = smooth(&items, &SmootherConfig::default(), &fillers());
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "hello there");
        assert_eq!(result.segments[0].bucket, Bucket::A);
        assert_eq!(result.stats.flips_before, 0);
        assert_eq!(result.stats.flips_after, 0);
    }

    #[test]
    fn test_alternating_items_are_stabilized() {
        // A,B,A,B,A at one item per second: heavy diarization jitter.
        let items = vec![
            item(0.0, 1.0, Bucket::A, "so i was"),
            item(1.0, 2.0, Bucket::B, "saying that"),
            item(2.0, 3.0, Bucket::A, "the pain"),
            item(3.0, 4.0, Bucket::B, "started last"),
            item(4.0, 5.0, Bucket::A, "week"),
        ];
        let result = smooth(&items, &SmootherConfig::default(), &fillers());
        assert_eq!(result.stats.flips_before, 4);
        assert!(result.stats.flips_after < result.stats.flips_before);
        assert!(result.segments.len() <= items.len());
    }

    #[test]
    fn test_flips_never_increase() {
        let items = vec![
            item(0.0, 0.8, Bucket::A, "how are"),
            item(0.9, 1.0, Bucket::B, "you"),
            item(1.1, 2.4, Bucket::A, "feeling today"),
            item(3.0, 4.5, Bucket::B, "not great to be honest"),
            item(4.6, 4.7, Bucket::A, "mm"),
            item(4.8, 6.0, Bucket::B, "the knee is worse"),
        ];
        let result = smooth(&items, &SmootherConfig::default(), &fillers());
        assert!(result.stats.flips_after <= result.stats.flips_before);
    }

    #[test]
    fn test_crumb_filler_absorbed_into_neighbor() {
        // A 0.2s filler sandwiched between two 1s items of the opposite bucket.
        let mut crumb = item(1.0, 1.2, Bucket::B, "um");
        crumb.is_filler = true;
        crumb.confidence = 0.6;
        let items = vec![
            item(0.0, 1.0, Bucket::A, "so i think"),
            crumb,
            item(1.2, 2.2, Bucket::A, "we should check"),
        ];
        let result = smooth(&items, &SmootherConfig::default(), &fillers());
        assert!(result.stats.crumbs_absorbed >= 1);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].bucket, Bucket::A);
        // The filler text itself is stripped by disfluency cleanup.
        assert_eq!(result.segments[0].text, "so i think we should check");
    }

    #[test]
    fn test_crumb_prefers_higher_confidence_neighbor() {
        let mut crumb = WorkSegment {
            t0: 1.0,
            t1: 1.2,
            bucket: Bucket::B,
            text: "yes".to_string(),
            confidence: 0.5,
            token_count: 1,
        };
        let prev = WorkSegment {
            t0: 0.0,
            t1: 1.0,
            bucket: Bucket::A,
            text: "before".to_string(),
            confidence: 0.6,
            token_count: 1,
        };
        let next = WorkSegment {
            t0: 1.2,
            t1: 2.2,
            bucket: Bucket::A,
            text: "after".to_string(),
            confidence: 0.9,
            token_count: 1,
        };

        let mut segments = vec![prev.clone(), crumb.clone(), next.clone()];
        let absorbed = absorb_crumbs(&mut segments, 0.3);
        assert_eq!(absorbed, 1);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text, "yes after");

        // Flip the confidences: the crumb should go backward instead.
        crumb.confidence = 0.5;
        let mut segments = vec![
            WorkSegment {
                confidence: 0.9,
                ..prev
            },
            crumb,
            WorkSegment {
                confidence: 0.6,
                ..next
            },
        ];
        let absorbed = absorb_crumbs(&mut segments, 0.3);
        assert_eq!(absorbed, 1);
        assert_eq!(segments[0].text, "before yes");
    }

    #[test]
    fn test_absorbed_crumb_updates_receiver_confidence() {
        let mut segments = vec![
            WorkSegment {
                t0: 0.0,
                t1: 1.0,
                bucket: Bucket::A,
                text: "before".to_string(),
                confidence: 0.9,
                token_count: 1,
            },
            WorkSegment {
                t0: 1.0,
                t1: 1.2,
                bucket: Bucket::B,
                text: "um".to_string(),
                confidence: 0.5,
                token_count: 1,
            },
        ];
        let absorbed = absorb_crumbs(&mut segments, 0.3);
        assert_eq!(absorbed, 1);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].confidence - 0.7).abs() < 1e-9);
        assert_eq!(segments[0].token_count, 2);
    }

    #[test]
    fn test_lone_crumb_is_kept() {
        let mut segments = vec![WorkSegment {
            t0: 0.0,
            t1: 0.2,
            bucket: Bucket::A,
            text: "hi".to_string(),
            confidence: 0.9,
            token_count: 1,
        }];
        let absorbed = absorb_crumbs(&mut segments, 0.3);
        assert_eq!(absorbed, 0);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_output_not_larger_than_input() {
        let items = vec![
            item(0.0, 0.5, Bucket::A, "a"),
            item(0.6, 1.1, Bucket::A, "b"),
            item(1.2, 1.7, Bucket::B, "c"),
            item(1.8, 2.3, Bucket::B, "d"),
        ];
        let result = smooth(&items, &SmootherConfig::default(), &fillers());
        assert!(result.segments.len() <= items.len());
    }

    #[test]
    fn test_clean_disfluencies_removes_fillers() {
        let cleaned = clean_disfluencies("um so I uh went um home", &fillers());
        assert_eq!(cleaned, "so I went home");
    }

    #[test]
    fn test_clean_disfluencies_is_idempotent() {
        let once = clean_disfluencies("euh bon  um alors   uh voilà", &fillers());
        let twice = clean_disfluencies(&once, &fillers());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_disfluencies_preserves_content() {
        let cleaned = clean_disfluencies("the pain started yesterday", &fillers());
        assert_eq!(cleaned, "the pain started yesterday");
    }

    #[test]
    fn test_count_flips() {
        let buckets = [Bucket::A, Bucket::A, Bucket::B, Bucket::A];
        assert_eq!(count_flips(buckets.into_iter()), 2);
        assert_eq!(count_flips(std::iter::empty()), 0);
        assert_eq!(count_flips([Bucket::A].into_iter()), 0);
    }
}
