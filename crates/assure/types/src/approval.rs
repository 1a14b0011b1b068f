//! Approval workflow types: ordered, role-gated sign-off steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an approval step: `Pending → InProgress → Completed`,
/// strictly forward. A step never returns to `Pending` once picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

/// Digital-signature metadata attached at the moment a step completes.
/// Immutable thereafter; re-approval requires a new pack version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub signer: String,
    pub signed_at: DateTime<Utc>,
    /// blake3 hex digest over (pack id, step index, role, signer).
    pub content_hash: String,
}

/// One role-gated sign-off in an approval workflow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// Role that must perform this step, e.g. "QA Lead" or "CISO".
    pub role: String,
    /// What the role is attesting to.
    pub action: String,
    pub status: StepStatus,
    pub approver: Option<String>,
    pub signature: Option<SignatureRecord>,
}

impl ApprovalStep {
    pub fn new(role: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            action: action.into(),
            status: StepStatus::Pending,
            approver: None,
            signature: None,
        }
    }
}

/// An ordered sequence of approval steps attached to an evidence pack.
///
/// Invariant: step *n* cannot complete while any step *k < n* is not
/// completed. The transition function enforcing this lives in
/// `assure-workflow`; these types only carry state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    pub steps: Vec<ApprovalStep>,
}

impl ApprovalWorkflow {
    pub fn new(steps: Vec<ApprovalStep>) -> Self {
        Self { steps }
    }

    /// All steps completed?
    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty()
            && self
                .steps
                .iter()
                .all(|s| s.status == StepStatus::Completed)
    }

    /// Number of completed steps out of the total.
    pub fn progress(&self) -> (usize, usize) {
        let done = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        (done, self.steps.len())
    }

    /// Index of the first step that is not yet completed, if any.
    pub fn first_incomplete(&self) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.status != StepStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow() -> ApprovalWorkflow {
        ApprovalWorkflow::new(vec![
            ApprovalStep::new("QA Lead", "verify evaluation results"),
            ApprovalStep::new("CISO", "review security evidence"),
        ])
    }

    #[test]
    fn new_workflow_incomplete() {
        let wf = workflow();
        assert!(!wf.is_complete());
        assert_eq!(wf.progress(), (0, 2));
        assert_eq!(wf.first_incomplete(), Some(0));
    }

    #[test]
    fn all_completed_is_complete() {
        let mut wf = workflow();
        for step in &mut wf.steps {
            step.status = StepStatus::Completed;
        }
        assert!(wf.is_complete());
        assert_eq!(wf.first_incomplete(), None);
    }

    #[test]
    fn empty_workflow_is_not_complete() {
        let wf = ApprovalWorkflow::new(vec![]);
        assert!(!wf.is_complete());
    }

    #[test]
    fn step_status_ordering() {
        assert!(StepStatus::Pending < StepStatus::InProgress);
        assert!(StepStatus::InProgress < StepStatus::Completed);
    }

    #[test]
    fn step_status_serde_snake_case() {
        let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
