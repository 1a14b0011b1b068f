#![deny(unsafe_code)]
//! Metric suggestion: proposes library metrics for a risk by matching the
//! risk's free text against each metric's applicable tags.
//!
//! This is a deterministic tag-matching heuristic, not NLP: the score is
//! tag-set containment, so a metric whose tags are a subset of the risk's
//! description scores highly even when the description is long. An empty
//! result is not an error; callers fall back to the custom-metric path.

pub mod engine;
pub mod tokenize;

pub use engine::{suggest, Suggestion};
pub use tokenize::tokenize;
