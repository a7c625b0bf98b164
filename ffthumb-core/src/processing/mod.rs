//! Pipeline stages that run on our side of the process boundary.
//!
//! Aspect filter derivation, candidate ranking and output streaming. The
//! orchestration of these stages lives in [`crate::thumbnailer`].

/// Anamorphic detection and scale filter selection
pub mod aspect;

/// Writing the winning candidate to a sink
pub mod output;

/// Ranking extracted candidates by size
pub mod selection;

pub use aspect::{ANAMORPHIC_SCALE_FILTER, aspect_filter_for, derive_aspect_filter};
pub use output::write_selected;
pub use selection::{Candidate, collect_candidates, select_largest};
