//! Pipeline stages, applied in order: ingest, contiguous merge, temporal
//! smoothing, role mapping, turn building and narrative rendering.

pub mod ingest;
pub mod merge;
pub mod narrative;
pub mod role_map;
pub mod smoother;
pub mod turn_builder;

pub use ingest::{ingest, ingest_with_policy, ClusterPolicy, GreedyAdjacency, IngestResult};
pub use merge::merge_contiguous;
pub use narrative::render;
pub use role_map::{apply_role_swap, map_roles};
pub use smoother::{clean_disfluencies, smooth, SmoothingResult};
pub use turn_builder::{build_turns, TurnBuilderResult};
