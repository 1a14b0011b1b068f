#![deny(unsafe_code)]
//! Compliance scoring: rolls heterogeneous control states up into integer
//! category scores and a weighted overall framework percentage.
//!
//! Scoring is a pure function of framework configuration plus control
//! states: the same inputs always produce the same integers, there is no
//! hidden accumulator, and raising one control's status never lowers a
//! score.

pub mod catalog;
pub mod config;
pub mod score;

pub use catalog::standard_frameworks;
pub use config::FrameworkRegistry;
pub use score::{score_framework, ComplianceScore};
