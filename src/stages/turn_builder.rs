use crate::config::TurnConfig;
use crate::models::{RoleMap, SmoothedSegment, Turn, TurnStats};

use super::merge::join_text;

/// Result of turn building.
#[derive(Debug, Clone)]
pub struct TurnBuilderResult {
    pub turns: Vec<Turn>,
    pub stats: TurnStats,
}

/// Group time-ordered segments into conversational turns.
///
/// A new turn starts when the role changes or when a same-role segment
/// follows a silence longer than the gap threshold. Segments whose text
/// emptied out during cleanup contribute their time span but no words;
/// turns that end up with no text at all are dropped.
pub fn build_turns(
    segments: &[SmoothedSegment],
    role_map: &RoleMap,
    config: &TurnConfig,
) -> TurnBuilderResult {
    let mut turns: Vec<Turn> = Vec::new();

    for segment in segments {
        let role = role_map.role_for(segment.bucket);
        match turns.last_mut() {
            Some(turn) if turn.role == role && segment.t0 - turn.t1 <= config.gap_threshold => {
                turn.t1 = segment.t1;
                if !segment.text.is_empty() {
                    turn.text = join_text(&turn.text, &segment.text);
                }
            }
            _ => turns.push(Turn {
                role,
                text: segment.text.clone(),
                t0: segment.t0,
                t1: segment.t1,
            }),
        }
    }

    turns.retain(|turn| !turn.text.trim().is_empty());

    let stats = compute_stats(&turns);
    TurnBuilderResult { turns, stats }
}

fn compute_stats(turns: &[Turn]) -> TurnStats {
    use crate::models::Role;

    let patient_turns = turns.iter().filter(|t| t.role == Role::Patient).count();
    let clinician_turns = turns.len() - patient_turns;

    let total_duration = match (
        turns.iter().map(|t| t.t0).fold(f64::INFINITY, f64::min),
        turns.iter().map(|t| t.t1).fold(f64::NEG_INFINITY, f64::max),
    ) {
        (min_t0, max_t1) if min_t0.is_finite() && max_t1.is_finite() => max_t1 - min_t0,
        _ => 0.0,
    };

    TurnStats {
        total_turns: turns.len(),
        patient_turns,
        clinician_turns,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, Role};

    fn segment(t0: f64, t1: f64, bucket: Bucket, text: &str) -> SmoothedSegment {
        SmoothedSegment {
            t0,
            t1,
            bucket,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_input() {
        let result = build_turns(&[], &RoleMap::default(), &TurnConfig::default());
        assert!(result.turns.is_empty());
        assert_eq!(result.stats, TurnStats::default());
    }

    #[test]
    fn test_role_change_starts_new_turn() {
        let segments = vec![
            segment(0.0, 2.0, Bucket::A, "my knee hurts"),
            segment(2.2, 4.0, Bucket::B, "when did it start"),
            segment(4.2, 6.0, Bucket::A, "last tuesday"),
        ];
        let result = build_turns(&segments, &RoleMap::default(), &TurnConfig::default());
        assert_eq!(result.turns.len(), 3);
        assert_eq!(result.turns[0].role, Role::Patient);
        assert_eq!(result.turns[1].role, Role::Clinician);
    }

    #[test]
    fn test_same_role_merges_within_gap_but_splits_on_silence() {
        // Gap 0.2s merges; gap 3s (over the 2.5s threshold) splits.
        let segments = vec![
            segment(0.0, 1.0, Bucket::A, "it started"),
            segment(1.2, 2.0, Bucket::A, "last week"),
            segment(5.0, 6.0, Bucket::A, "and got worse"),
        ];
        let result = build_turns(&segments, &RoleMap::default(), &TurnConfig::default());
        assert_eq!(result.turns.len(), 2);
        assert_eq!(result.turns[0].text, "it started last week");
        assert_eq!(result.turns[1].text, "and got worse");
    }

    #[test]
    fn test_empty_text_segment_extends_span_without_words() {
        let segments = vec![
            segment(0.0, 1.0, Bucket::A, "hello"),
            segment(1.1, 1.4, Bucket::A, ""),
        ];
        let result = build_turns(&segments, &RoleMap::default(), &TurnConfig::default());
        assert_eq!(result.turns.len(), 1);
        assert_eq!(result.turns[0].text, "hello");
        assert!((result.turns[0].t1 - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_turns_with_no_text_are_dropped() {
        let segments = vec![
            segment(0.0, 1.0, Bucket::A, ""),
            segment(2.0, 3.0, Bucket::B, "can you hear me"),
        ];
        let result = build_turns(&segments, &RoleMap::default(), &TurnConfig::default());
        assert_eq!(result.turns.len(), 1);
        assert_eq!(result.turns[0].role, Role::Clinician);
    }

    #[test]
    fn test_stats() {
        let segments = vec![
            segment(1.0, 2.0, Bucket::A, "good morning"),
            segment(2.5, 4.0, Bucket::B, "morning doctor"),
            segment(4.5, 9.0, Bucket::B, "i came about my back"),
        ];
        let result = build_turns(&segments, &RoleMap::default(), &TurnConfig::default());
        assert_eq!(result.stats.total_turns, 2);
        assert_eq!(result.stats.patient_turns, 1);
        assert_eq!(result.stats.clinician_turns, 1);
        // Span is last end minus first start, not the sum of turn lengths.
        assert!((result.stats.total_duration - 8.0).abs() < 1e-9);
    }
}
