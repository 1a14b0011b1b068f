#![deny(unsafe_code)]
//! The Assure engine facade.
//!
//! One [`Engine`] wraps a tenant's registry plus the framework scoring
//! configuration and exposes the full governance-traceability API: use-case
//! and risk registration, control and metric mapping with suggestion
//! assistance, derived traceability and coverage views, framework compliance
//! scoring, and the approval-gated evidence-pack lifecycle ending in export.
//!
//! The engine is synchronous and deterministic: derived views are pure reads
//! over a consistent registry snapshot, and all mutations are serialized by
//! the registry's writer lock. Callers (an API layer) own request-level
//! timeouts and retries for transport concerns.

mod engine;
mod export;

pub use engine::Engine;
pub use export::ExportArtifact;

// The facade re-exports the vocabulary its callers need.
pub use assure_registry::{builtin_library, Hub, Registry, RegistrySnapshot};
pub use assure_scoring::{standard_frameworks, ComplianceScore, FrameworkRegistry};
pub use assure_suggest::Suggestion;
pub use assure_trace::{CoverageReport, PartialTrace, TraceGap, TraceMatrix};
pub use assure_types::*;
pub use assure_workflow::{standard_chain, StepAdvance};
