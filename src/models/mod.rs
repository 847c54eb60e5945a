pub mod item;
pub mod narrative;
pub mod raw;
pub mod segment;
pub mod turn;

pub use item::{Bucket, IngestStats, NormalizedItem, SpeakerMap};
pub use narrative::{NarrativeFormat, NarrativeMetadata, NarrativeOutput};
pub use raw::{EngineTranscript, RawToken};
pub use segment::{SmoothedSegment, SmoothingStats};
pub use turn::{Role, RoleMap, Turn, TurnStats};
