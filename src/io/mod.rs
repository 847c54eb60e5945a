//! Reading diarization engine JSON and writing narrative and artifact files.

pub mod input;
pub mod output;

pub use input::{parse_engine_file, parse_engine_json};
pub use output::{write_artifacts, write_narrative};
