//! Domain types for the Assure governance traceability engine.
//!
//! Assure links declared **use cases** to identified **risks**, mitigating
//! **controls**, quantitative **trust metrics**, **evidence** artifacts, and
//! multi-role **governance approvals**, then rolls these up into per-framework
//! compliance scores and exportable evidence packages.
//!
//! # Key Concepts
//!
//! - **UseCase**: a declared business scenario an AI application serves.
//! - **Risk**: a specific failure mode attached to exactly one use case.
//! - **Control**: a mitigation mechanism addressing one or more risks.
//! - **MetricDefinition**: a library entry for a quantitative trust metric.
//! - **RiskMetricMapping**: the join entity assigning a metric (with a
//!   threshold and owner) to a risk.
//! - **EvidencePack**: a versioned bundle of evidence components gated by an
//!   ordered, role-based approval workflow.
//! - **Framework**: an external compliance standard with weighted categories
//!   of controls.
//!
//! # Design Principles
//!
//! 1. Canonical state lives in the registry; matrices, scores, and pack
//!    status are always derived, never stored.
//! 2. Every cross-entity reference is validated at write time.
//! 3. Approval transitions happen in one transition function, and completed
//!    steps carry immutable signature metadata.

#![deny(unsafe_code)]

mod approval;
mod control;
mod errors;
mod evidence;
mod framework;
mod ids;
mod metric;
mod risk;
mod usecase;

pub use approval::*;
pub use control::*;
pub use errors::*;
pub use evidence::*;
pub use framework::*;
pub use ids::*;
pub use metric::*;
pub use risk::*;
pub use usecase::*;
