use serde::{Deserialize, Serialize};

/// One timestamped, speaker-tagged unit of transcribed speech from the
/// external speech engine. Immutable; consumed once by ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawToken {
    /// Start timestamp in seconds.
    pub start_time: f64,
    /// End timestamp in seconds.
    pub end_time: f64,
    /// The transcribed text.
    pub text: String,
    /// Transcription confidence (0-1).
    pub confidence: f64,
    /// Raw, possibly noisy, speaker tag (e.g. "spk_0").
    pub speaker: String,
}

impl RawToken {
    /// Duration of this token in seconds.
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}

/// Wire envelope for engine output: `{"tokens": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTranscript {
    pub tokens: Vec<RawToken>,
}
