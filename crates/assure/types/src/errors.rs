//! Error taxonomy for the engine.
//!
//! Every error here is deterministic given the same input and registry state;
//! none represent transient infrastructure failure, so the core never
//! retries. Retry policy for genuinely transient concerns (storage I/O,
//! transport) belongs to the calling layer.

use crate::{MetricId, PackId, RiskId};
use thiserror::Error;

/// The kind of entity a reference failed to resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    UseCase,
    Risk,
    Control,
    Metric,
    Mapping,
    Component,
    EvidencePack,
    Framework,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::UseCase => "use case",
            Self::Risk => "risk",
            Self::Control => "control",
            Self::Metric => "metric",
            Self::Mapping => "mapping",
            Self::Component => "evidence component",
            Self::EvidencePack => "evidence pack",
            Self::Framework => "framework",
        };
        write!(f, "{name}")
    }
}

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required field is missing or malformed. Recoverable client-side.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist. Caller must re-fetch or re-create.
    #[error("{kind} not found: {id}")]
    ReferenceNotFound { kind: EntityKind, id: String },

    /// A delete was blocked by dependent records. Caller must cascade or
    /// resolve manually.
    #[error("cannot delete {kind} {id}: {dependents} dependent record(s) exist")]
    DependencyExists {
        kind: EntityKind,
        id: String,
        dependents: usize,
    },

    /// The (risk, metric) pair is already mapped. Safe to surface as
    /// "already done".
    #[error("metric {metric_id} is already mapped to risk {risk_id}")]
    DuplicateMapping { risk_id: RiskId, metric_id: MetricId },

    /// Idempotency conflict: the target state was already reached by an
    /// earlier writer.
    #[error("already completed: {0}")]
    AlreadyCompleted(String),

    /// An approval step was advanced while an earlier step is incomplete.
    /// Not retryable without completing the prior steps.
    #[error("approval step {attempted} cannot advance while step {blocking} is incomplete")]
    OutOfOrderApproval { attempted: usize, blocking: usize },

    /// Export was attempted before the pack's completion gate was satisfied.
    #[error("evidence pack {pack_id} is not ready: {missing}")]
    PackNotReady { pack_id: PackId, missing: String },
}

impl EngineError {
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        Self::ReferenceNotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_not_found_display() {
        let err = EngineError::not_found(EntityKind::UseCase, "uc-404");
        assert_eq!(err.to_string(), "use case not found: uc-404");
    }

    #[test]
    fn duplicate_mapping_display() {
        let err = EngineError::DuplicateMapping {
            risk_id: RiskId::new("r-1"),
            metric_id: MetricId::new("m-1"),
        };
        assert_eq!(err.to_string(), "metric m-1 is already mapped to risk r-1");
    }

    #[test]
    fn out_of_order_display() {
        let err = EngineError::OutOfOrderApproval {
            attempted: 2,
            blocking: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("step 2"));
        assert!(msg.contains("step 1"));
    }

    #[test]
    fn dependency_exists_display() {
        let err = EngineError::DependencyExists {
            kind: EntityKind::UseCase,
            id: "uc-1".into(),
            dependents: 3,
        };
        assert!(err.to_string().contains("3 dependent record(s)"));
    }
}
