use crate::config::MergeConfig;
use crate::models::NormalizedItem;

/// Merge sequentially adjacent same-bucket items whose time gap is at most
/// `merge_gap`. Pure: never changes bucket assignment, only consolidates
/// fragmentation.
pub fn merge_contiguous(items: &[NormalizedItem], config: &MergeConfig) -> Vec<NormalizedItem> {
    let mut merged: Vec<NormalizedItem> = Vec::with_capacity(items.len());

    for item in items {
        match merged.last_mut() {
            Some(last) if last.bucket == item.bucket && item.t0 - last.t1 <= config.merge_gap => {
                *last = merge_pair(last, item);
            }
            _ => merged.push(item.clone()),
        }
    }

    merged
}

/// Merge two adjacent same-bucket items into one.
///
/// Text is joined with a single space, the later end time is authoritative,
/// and confidence is a token-count-weighted mean, which keeps merging
/// associative.
pub fn merge_pair(first: &NormalizedItem, second: &NormalizedItem) -> NormalizedItem {
    let token_count = first.token_count + second.token_count;
    let confidence = (first.confidence * first.token_count as f64
        + second.confidence * second.token_count as f64)
        / token_count as f64;

    NormalizedItem {
        t0: first.t0,
        t1: second.t1,
        bucket: first.bucket,
        text: join_text(&first.text, &second.text),
        confidence,
        is_filler: first.is_filler && second.is_filler,
        token_count,
    }
}

/// Join two text fragments with a single separating space, tolerating empty
/// sides.
pub(crate) fn join_text(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{first} {second}"),
    }
}
