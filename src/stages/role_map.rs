use tracing::debug;

use crate::config::RoleMapConfig;
use crate::lexicon::Lexicons;
use crate::models::{Bucket, Role, RoleMap, SmoothedSegment};

/// Aggregate features of one bucket's speech, used by the scoring signals.
#[derive(Debug, Clone, Default)]
pub struct BucketFeatures {
    /// All of the bucket's text, lowercased, joined with single spaces.
    pub text: String,
    /// Index of the bucket's first segment in the smoothed sequence.
    pub first_index: usize,
    /// Total segment count in the smoothed sequence.
    pub total_segments: usize,
    pub word_count: usize,
    /// Total speaking time in seconds.
    pub speaking_sec: f64,
}

type SignalFn = fn(&BucketFeatures, &Lexicons) -> f64;

/// Scoring signals: (name, weight extractor applied to config, function).
/// Positive contributions favor the patient role.
fn signals(config: &RoleMapConfig) -> Vec<(&'static str, f64, SignalFn)> {
    vec![
        ("cue_words", config.cue_word_weight, cue_word_signal),
        ("position", config.position_weight, position_signal),
        ("length", config.length_weight, length_signal),
    ]
}

/// Net cue-word balance: patient cues add, clinician cues subtract,
/// normalized by word count so long monologues don't dominate.
fn cue_word_signal(features: &BucketFeatures, lexicons: &Lexicons) -> f64 {
    if features.word_count == 0 {
        return 0.0;
    }
    let patient = count_phrase_matches(&features.text, &lexicons.patient_cues);
    let clinician = count_phrase_matches(&features.text, &lexicons.clinician_cues);
    (patient as f64 - clinician as f64) / features.word_count as f64
}

/// Earlier first appearance favors the patient (the clinician typically
/// opens the encounter with a question, the patient answers at length
/// soon after but clinic intake flows vary).
fn position_signal(features: &BucketFeatures, _lexicons: &Lexicons) -> f64 {
    if features.total_segments == 0 {
        return 0.0;
    }
    (features.total_segments - features.first_index) as f64 / features.total_segments as f64
}

/// Speech density (words per second of speaking time), saturated into
/// [0, 1) so it stays comparable to the other signals: patients narrate,
/// clinicians probe with short questions.
fn length_signal(features: &BucketFeatures, _lexicons: &Lexicons) -> f64 {
    if features.speaking_sec <= 0.0 {
        return 0.0;
    }
    let rate = features.word_count as f64 / features.speaking_sec;
    rate / (1.0 + rate)
}

/// Count whole-word occurrences of each phrase in `text`. A match only
/// counts when not embedded in a longer alphanumeric run, so "i" never
/// matches inside "pain".
pub(crate) fn count_phrase_matches(text: &str, phrases: &[String]) -> usize {
    let mut count = 0;
    for phrase in phrases {
        let phrase = phrase.to_lowercase();
        if phrase.is_empty() {
            continue;
        }
        for (start, matched) in text.match_indices(phrase.as_str()) {
            let before_ok = text[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());
            let after_ok = text[start + matched.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric());
            if before_ok && after_ok {
                count += 1;
            }
        }
    }
    count
}

/// Extract per-bucket features from the smoothed segments.
fn extract_features(segments: &[SmoothedSegment], bucket: Bucket) -> BucketFeatures {
    let mut features = BucketFeatures {
        first_index: segments.len(),
        total_segments: segments.len(),
        ..BucketFeatures::default()
    };

    let mut parts: Vec<String> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        if segment.bucket != bucket {
            continue;
        }
        if features.first_index == segments.len() {
            features.first_index = index;
        }
        features.word_count += segment.word_count();
        features.speaking_sec += segment.duration();
        parts.push(segment.text.to_lowercase());
    }
    features.text = parts.join(" ");
    features
}

/// Weighted patient-likelihood score for one bucket.
pub fn score_bucket(
    features: &BucketFeatures,
    config: &RoleMapConfig,
    lexicons: &Lexicons,
) -> f64 {
    let mut score = 0.0;
    for (name, weight, signal) in signals(config) {
        let value = signal(features, lexicons);
        debug!(signal = name, value, weight, "role signal");
        score += weight * value;
    }
    score
}

/// Assign roles to the two buckets.
///
/// With `first_speaker_is_patient` set, the bucket speaking first is the
/// patient outright. Otherwise both buckets are scored and the higher
/// patient-likelihood score wins (ties keep bucket A as patient). Empty or
/// single-bucket input maps A to the patient.
pub fn map_roles(
    segments: &[SmoothedSegment],
    config: &RoleMapConfig,
    lexicons: &Lexicons,
) -> RoleMap {
    let has_a = segments.iter().any(|s| s.bucket == Bucket::A);
    let has_b = segments.iter().any(|s| s.bucket == Bucket::B);
    if !(has_a && has_b) {
        // Sole-speaker dialogs: whichever bucket is present is the patient.
        return if has_b {
            RoleMap {
                a: Role::Clinician,
                b: Role::Patient,
            }
        } else {
            RoleMap::default()
        };
    }

    let patient_bucket = if config.first_speaker_is_patient {
        // segments are time-ordered, so index 0 speaks first
        segments[0].bucket
    } else {
        let score_a = score_bucket(&extract_features(segments, Bucket::A), config, lexicons);
        let score_b = score_bucket(&extract_features(segments, Bucket::B), config, lexicons);
        debug!(score_a, score_b, "bucket patient-likelihood scores");
        if score_b > score_a { Bucket::B } else { Bucket::A }
    };

    match patient_bucket {
        Bucket::A => RoleMap {
            a: Role::Patient,
            b: Role::Clinician,
        },
        Bucket::B => RoleMap {
            a: Role::Clinician,
            b: Role::Patient,
        },
    }
}

/// Invert a role map for sessions where the default convention is wrong.
/// Self-inverse: applying it twice restores the original map.
pub fn apply_role_swap(map: RoleMap) -> RoleMap {
    map.swapped()
}
