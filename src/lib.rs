pub mod config;
pub mod error;
pub mod io;
pub mod lexicon;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use config::{
    IngestConfig, MergeConfig, NarrativeConfig, PipelineConfig, RoleMapConfig, SmootherConfig,
    TurnConfig,
};
pub use error::PipelineError;
pub use io::{parse_engine_file, parse_engine_json, write_artifacts, write_narrative};
pub use lexicon::{Language, Lexicons, RoleLabels};
pub use models::{
    Bucket, EngineTranscript, IngestStats, NarrativeFormat, NarrativeOutput, NormalizedItem,
    RawToken, Role, RoleMap, SmoothedSegment, SmoothingStats, SpeakerMap, Turn, TurnStats,
};
pub use pipeline::{Pipeline, PipelineArtifacts, StageTimings};
