use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::lexicon::{Language, Lexicons};
use crate::models::{
    IngestStats, NarrativeOutput, RawToken, RoleMap, SmoothedSegment, SmoothingStats, SpeakerMap,
    Turn, TurnStats,
};
use crate::stages::{
    apply_role_swap, build_turns, ingest, map_roles, merge_contiguous, render, smooth,
};

/// Wall-clock time spent in each stage, in milliseconds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageTimings {
    pub ingest_ms: u64,
    pub merge_ms: u64,
    pub smooth_ms: u64,
    pub role_map_ms: u64,
    pub turns_ms: u64,
    pub render_ms: u64,
    pub total_ms: u64,
}

/// Everything one pipeline run produces: the narrative plus every
/// intermediate result needed to audit how it was derived.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineArtifacts {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub language: Language,
    pub speaker_map: SpeakerMap,
    pub ingest_stats: IngestStats,
    pub smoothing_stats: SmoothingStats,
    pub segments: Vec<SmoothedSegment>,
    pub role_map: RoleMap,
    pub turns: Vec<Turn>,
    pub turn_stats: TurnStats,
    pub narrative: NarrativeOutput,
    pub timings: StageTimings,
}

/// The full normalization pipeline, configured once and reusable across
/// transcripts.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    lexicons: Lexicons,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            lexicons: Lexicons::default(),
        }
    }

    /// Override the default lexicons (custom cue words or fillers).
    pub fn with_lexicons(mut self, lexicons: Lexicons) -> Self {
        self.lexicons = lexicons;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over raw engine tokens.
    ///
    /// Empty input produces an empty narrative with zeroed stats; the only
    /// error is malformed input.
    pub fn run(&self, tokens: &[RawToken]) -> Result<PipelineArtifacts, PipelineError> {
        let started = Instant::now();
        let language = self.config.language;
        let fillers = self.lexicons.fillers(language);

        let stage_start = Instant::now();
        let ingested = ingest(tokens, &self.config.ingest, fillers)?;
        let ingest_ms = elapsed_ms(stage_start);
        info!(
            tokens = tokens.len(),
            items = ingested.items.len(),
            dropped = ingested.stats.dropped_low_conf,
            unique_before = ingested.stats.unique_before,
            unique_after = ingested.stats.unique_after,
            "ingest complete"
        );

        let stage_start = Instant::now();
        let merged = merge_contiguous(&ingested.items, &self.config.merge);
        let merge_ms = elapsed_ms(stage_start);
        info!(items = merged.len(), "contiguous merge complete");

        let stage_start = Instant::now();
        let smoothed = smooth(&merged, &self.config.smoother, fillers);
        let smooth_ms = elapsed_ms(stage_start);
        info!(
            segments = smoothed.segments.len(),
            flips_before = smoothed.stats.flips_before,
            flips_after = smoothed.stats.flips_after,
            crumbs_absorbed = smoothed.stats.crumbs_absorbed,
            "smoothing complete"
        );

        let stage_start = Instant::now();
        let mut role_map = map_roles(&smoothed.segments, &self.config.role_map, &self.lexicons);
        if self.config.role_map.swap_roles {
            role_map = apply_role_swap(role_map);
        }
        let role_map_ms = elapsed_ms(stage_start);
        info!(?role_map, "role mapping complete");

        let stage_start = Instant::now();
        let built = build_turns(&smoothed.segments, &role_map, &self.config.turns);
        let turns_ms = elapsed_ms(stage_start);
        info!(
            turns = built.stats.total_turns,
            patient = built.stats.patient_turns,
            clinician = built.stats.clinician_turns,
            "turn building complete"
        );

        let stage_start = Instant::now();
        let narrative = render(
            &built.turns,
            &built.stats,
            &self.config.narrative,
            &self.lexicons,
            language,
        );
        let render_ms = elapsed_ms(stage_start);
        info!(
            format = ?narrative.format,
            words = narrative.metadata.word_count,
            "render complete"
        );

        Ok(PipelineArtifacts {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            language,
            speaker_map: ingested.speaker_map,
            ingest_stats: ingested.stats,
            smoothing_stats: smoothed.stats,
            segments: smoothed.segments,
            role_map,
            turns: built.turns,
            turn_stats: built.stats,
            narrative,
            timings: StageTimings {
                ingest_ms,
                merge_ms,
                smooth_ms,
                role_map_ms,
                turns_ms,
                render_ms,
                total_ms: elapsed_ms(started),
            },
        })
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
