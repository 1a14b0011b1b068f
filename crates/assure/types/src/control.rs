//! Controls: mitigation mechanisms addressing one or more risks.

use crate::{ControlId, RiskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Compliance status of a control, as assessed for scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Compliant,
    Partial,
    NonCompliant,
}

impl ControlStatus {
    /// Numeric value used by the scoring engine.
    pub fn value(self) -> f64 {
        match self {
            Self::Compliant => 1.0,
            Self::Partial => 0.5,
            Self::NonCompliant => 0.0,
        }
    }
}

/// A mitigation mechanism. Many-to-many with risks: a control may satisfy
/// zero or more risks, and a risk may be satisfied by zero or more controls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Control {
    pub id: ControlId,
    pub description: String,
    pub risk_ids: BTreeSet<RiskId>,
    pub status: ControlStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a control.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewControl {
    pub description: String,
    /// Risks the control addresses at creation; may be empty and extended
    /// later via link operations.
    pub risk_ids: BTreeSet<RiskId>,
    pub created_by: String,
}

impl Control {
    /// New controls start as non-compliant until assessed.
    pub fn create(input: NewControl) -> Self {
        let now = Utc::now();
        Self {
            id: ControlId::generate(),
            description: input.description,
            risk_ids: input.risk_ids,
            status: ControlStatus::NonCompliant,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values() {
        assert_eq!(ControlStatus::Compliant.value(), 1.0);
        assert_eq!(ControlStatus::Partial.value(), 0.5);
        assert_eq!(ControlStatus::NonCompliant.value(), 0.0);
    }

    #[test]
    fn new_control_starts_non_compliant() {
        let c = Control::create(NewControl {
            description: "Human review of triage output".into(),
            risk_ids: BTreeSet::new(),
            created_by: "carol".into(),
        });
        assert_eq!(c.status, ControlStatus::NonCompliant);
        assert!(c.risk_ids.is_empty());
    }

    #[test]
    fn status_serde_snake_case() {
        let json = serde_json::to_string(&ControlStatus::NonCompliant).unwrap();
        assert_eq!(json, "\"non_compliant\"");
    }
}
