#![deny(unsafe_code)]
//! Traceability matrix: the derived Risk ↔ Control ↔ Metric ↔ Evidence ↔
//! Framework view, plus coverage queries.
//!
//! The matrix is a pure projection of a registry snapshot. It is recomputed
//! on every call and is never a source of truth, which eliminates the
//! staleness bugs that stored dashboards accumulate.

pub mod coverage;
pub mod matrix;

pub use coverage::{coverage, CoverageReport, PartialTrace, TraceGap};
pub use matrix::{build_matrix, RiskTrace, TraceMatrix};
