//! Coverage queries over the traceability matrix.

use crate::matrix::build_matrix;
use assure_registry::RegistrySnapshot;
use assure_types::{RiskId, Scope};
use serde::{Deserialize, Serialize};

/// One missing leg of a risk's traceability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceGap {
    Control,
    Metric,
    Evidence,
}

/// A risk with some, but not all, traceability legs in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartialTrace {
    pub risk_id: RiskId,
    pub missing: Vec<TraceGap>,
}

/// Coverage summary for a scope.
///
/// Bucketing: a risk missing one *or two* of the three legs is partial;
/// only a risk missing all three is untraced. Consumers wanting a stricter
/// missing-exactly-one bucket can filter `partially_traced` on
/// `missing.len() == 1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total: usize,
    pub fully_traced: usize,
    /// Risks missing one or two legs, with the gaps named for remediation.
    pub partially_traced: Vec<PartialTrace>,
    /// Risks with no control, no metric, and no evidence at all.
    pub untraced: usize,
    /// fully_traced / total; 1.0 for an empty scope (vacuous coverage).
    pub ratio: f64,
}

/// Compute coverage for `scope` from a consistent snapshot.
pub fn coverage(snapshot: &RegistrySnapshot, scope: &Scope) -> CoverageReport {
    let matrix = build_matrix(snapshot, scope);
    let total = matrix.rows.len();

    let mut fully_traced = 0;
    let mut untraced = 0;
    let mut partially_traced = Vec::new();

    for row in matrix.rows.values() {
        let mut missing = Vec::new();
        if !row.has_control {
            missing.push(TraceGap::Control);
        }
        if !row.has_metric_mapping {
            missing.push(TraceGap::Metric);
        }
        if row.evidence_component_ids.is_empty() {
            missing.push(TraceGap::Evidence);
        }
        match missing.len() {
            0 => fully_traced += 1,
            3 => untraced += 1,
            _ => partially_traced.push(PartialTrace {
                risk_id: row.risk_id.clone(),
                missing,
            }),
        }
    }

    let ratio = if total == 0 {
        1.0
    } else {
        fully_traced as f64 / total as f64
    };

    CoverageReport {
        total,
        fully_traced,
        partially_traced,
        untraced,
        ratio,
    }
}
