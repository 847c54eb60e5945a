use serde::{Deserialize, Serialize};

/// Shape of the rendered narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeFormat {
    /// One undifferentiated block; used when only one role is present.
    SingleBlock,
    /// Each line prefixed with a localized role label.
    RolePrefixed,
}

/// Summary metadata attached to the rendered narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeMetadata {
    /// Number of distinct roles present.
    pub total_speakers: usize,
    pub patient_turns: usize,
    pub clinician_turns: usize,
    /// Conversation span in seconds.
    pub total_duration: f64,
    /// Whitespace-separated word count over all turns.
    pub word_count: usize,
}

/// Final rendered transcript handed to the downstream compliance layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeOutput {
    pub format: NarrativeFormat,
    pub content: String,
    pub metadata: NarrativeMetadata,
}
