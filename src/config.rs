use crate::lexicon::Language;

/// Configuration for ingest and confidence filtering.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Tokens below this confidence are dropped entirely (hard cutoff).
    pub min_confidence: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { min_confidence: 0.5 }
    }
}

/// Configuration for the contiguous merge stage.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Maximum gap in seconds between same-bucket items to merge.
    pub merge_gap: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { merge_gap: 0.5 }
    }
}

/// Configuration for the temporal smoother.
#[derive(Debug, Clone)]
pub struct SmootherConfig {
    /// Symmetric time window for majority voting, in seconds.
    pub window_sec: f64,
    /// Minimum duration a bucket assignment must persist before a switch
    /// is accepted.
    pub min_hold_sec: f64,
    /// Maximum gap between same-bucket segments to merge.
    pub merge_gap_sec: f64,
    /// Segments shorter than this are crumbs, absorbed into a neighbor.
    pub crumb_max_sec: f64,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            window_sec: 1.0,
            min_hold_sec: 1.2,
            merge_gap_sec: 0.35,
            crumb_max_sec: 0.30,
        }
    }
}

/// Configuration for the role mapper.
#[derive(Debug, Clone)]
pub struct RoleMapConfig {
    /// Weight of the cue-word signal.
    pub cue_word_weight: f64,
    /// Weight of the conversational-position signal.
    pub position_weight: f64,
    /// Weight of the speech-rate signal.
    pub length_weight: f64,
    /// Force the bucket of the first segment to the patient role,
    /// bypassing the weighted scorer.
    pub first_speaker_is_patient: bool,
    /// Invert the final role map (support-staff-led sessions).
    pub swap_roles: bool,
}

impl Default for RoleMapConfig {
    fn default() -> Self {
        Self {
            cue_word_weight: 0.3,
            position_weight: 0.2,
            length_weight: 0.1,
            first_speaker_is_patient: true,
            swap_roles: false,
        }
    }
}

/// Configuration for the turn builder.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// A same-role segment further than this from the current turn's end
    /// starts a new turn, in seconds.
    pub gap_threshold: f64,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self { gap_threshold: 2.5 }
    }
}

/// Configuration for the narrative renderer.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// Render a single undifferentiated block when the number of distinct
    /// roles is at or below this.
    pub single_block_threshold: usize,
    /// Greedy word-wrap width; 0 disables wrapping.
    pub max_line_length: usize,
    /// Turns lasting at least this long are followed by a paragraph break.
    pub paragraph_break_sec: f64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            single_block_threshold: 1,
            max_line_length: 80,
            paragraph_break_sec: 12.0,
        }
    }
}

/// Full pipeline configuration, one section per stage.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub language: Language,
    pub ingest: IngestConfig,
    pub merge: MergeConfig,
    pub smoother: SmootherConfig,
    pub role_map: RoleMapConfig,
    pub turns: TurnConfig,
    pub narrative: NarrativeConfig,
}
