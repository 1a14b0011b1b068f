//! Risks: specific failure modes attached to use cases.

use crate::{RiskId, UseCaseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Impact severity of a risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// How often a risk is expected to materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Likelihood {
    Rare,
    Occasional,
    Frequent,
}

/// A specific failure mode associated with exactly one use case.
///
/// Invariant: `use_case_id` always resolves to an existing use case; the
/// registry validates this at write time and cascade-deletes risks with
/// their parent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    pub use_case_id: UseCaseId,
    pub description: String,
    pub severity: Severity,
    pub likelihood: Likelihood,
    /// Names of the external frameworks this risk maps onto.
    pub compliance_mapping: BTreeSet<String>,
    /// Free-text statement of the evidence an auditor expects.
    pub evidence_required: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a risk under a use case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewRisk {
    pub description: String,
    pub severity: Severity,
    pub likelihood: Likelihood,
    pub compliance_mapping: BTreeSet<String>,
    pub evidence_required: String,
    pub created_by: String,
}

/// Partial update for a risk. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RiskUpdate {
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub likelihood: Option<Likelihood>,
    pub compliance_mapping: Option<BTreeSet<String>>,
    pub evidence_required: Option<String>,
}

impl Risk {
    pub fn create(use_case_id: UseCaseId, input: NewRisk) -> Self {
        let now = Utc::now();
        Self {
            id: RiskId::generate(),
            use_case_id,
            description: input.description,
            severity: input.severity,
            likelihood: input.likelihood,
            compliance_mapping: input.compliance_mapping,
            evidence_required: input.evidence_required,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, update: RiskUpdate) {
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(severity) = update.severity {
            self.severity = severity;
        }
        if let Some(likelihood) = update.likelihood {
            self.likelihood = likelihood;
        }
        if let Some(mapping) = update.compliance_mapping {
            self.compliance_mapping = mapping;
        }
        if let Some(evidence) = update.evidence_required {
            self.evidence_required = evidence;
        }
        self.updated_at = Utc::now();
    }
}
