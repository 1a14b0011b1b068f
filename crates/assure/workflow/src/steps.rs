//! The step transition function.

use assure_types::{
    ApprovalStep, ApprovalWorkflow, EngineError, PackId, Result, SignatureRecord, StepStatus,
};
use chrono::Utc;
use tracing::info;

/// The result of advancing a step.
#[derive(Clone, Debug)]
pub struct StepAdvance {
    pub step_index: usize,
    pub step: ApprovalStep,
}

/// Advance step `step_index` of a pack's workflow to `target`.
///
/// Guards, in order:
/// - the index must exist and `target` must not be `Pending` (no regression);
/// - every earlier step must be `Completed`, else `OutOfOrderApproval`;
/// - the step's current status must precede `target`, else
///   `AlreadyCompleted` (compare-and-set: the first writer wins, a racing
///   second writer gets the error rather than a silent overwrite).
///
/// Completion attaches a [`SignatureRecord`] hashing (pack id, step index,
/// role, approver); the record is never rewritten afterwards.
pub fn advance_step(
    pack_id: &PackId,
    workflow: &mut ApprovalWorkflow,
    step_index: usize,
    approver: &str,
    target: StepStatus,
) -> Result<StepAdvance> {
    if step_index >= workflow.steps.len() {
        return Err(EngineError::Validation(format!(
            "step index {step_index} out of range ({} steps)",
            workflow.steps.len()
        )));
    }
    if target == StepStatus::Pending {
        return Err(EngineError::Validation(
            "a step cannot be moved back to pending".into(),
        ));
    }
    if approver.trim().is_empty() {
        return Err(EngineError::Validation("approver is required".into()));
    }

    // Sequential gating: every earlier step must already be completed.
    if let Some(blocking) = workflow.steps[..step_index]
        .iter()
        .position(|s| s.status != StepStatus::Completed)
    {
        return Err(EngineError::OutOfOrderApproval {
            attempted: step_index,
            blocking,
        });
    }

    let step = &mut workflow.steps[step_index];

    // Compare-and-set on the current status: first writer wins.
    if step.status >= target {
        return Err(EngineError::AlreadyCompleted(format!(
            "step {step_index} ({}) is already {:?}",
            step.role, step.status
        )));
    }

    step.status = target;
    if target == StepStatus::Completed {
        step.approver = Some(approver.to_string());
        step.signature = Some(sign(pack_id, step_index, &step.role, approver));
    }
    info!(pack = %pack_id, step = step_index, role = %step.role, status = ?target, "approval step advanced");

    Ok(StepAdvance {
        step_index,
        step: step.clone(),
    })
}

fn sign(pack_id: &PackId, step_index: usize, role: &str, signer: &str) -> SignatureRecord {
    let mut hasher = blake3::Hasher::new();
    hasher.update(pack_id.as_str().as_bytes());
    hasher.update(&step_index.to_le_bytes());
    hasher.update(role.as_bytes());
    hasher.update(signer.as_bytes());
    SignatureRecord {
        signer: signer.to_string(),
        signed_at: Utc::now(),
        content_hash: hasher.finalize().to_hex().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::standard_chain;

    fn workflow() -> ApprovalWorkflow {
        ApprovalWorkflow::new(standard_chain())
    }

    fn pack_id() -> PackId {
        PackId::new("pack-1")
    }

    #[test]
    fn first_step_advances() {
        let mut wf = workflow();
        let advance =
            advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::Completed).unwrap();
        assert_eq!(advance.step.status, StepStatus::Completed);
        assert_eq!(advance.step.approver.as_deref(), Some("quinn"));
        assert!(advance.step.signature.is_some());
    }

    #[test]
    fn out_of_order_rejected() {
        let mut wf = workflow();
        let err = advance_step(&pack_id(), &mut wf, 2, "casey", StepStatus::Completed).unwrap_err();
        match err {
            EngineError::OutOfOrderApproval { attempted, blocking } => {
                assert_eq!(attempted, 2);
                assert_eq!(blocking, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The attempt left no trace.
        assert_eq!(wf.steps[2].status, StepStatus::Pending);
    }

    #[test]
    fn second_completion_loses_the_race() {
        let mut wf = workflow();
        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::Completed).unwrap();
        let signature = wf.steps[0].signature.clone();

        let err = advance_step(&pack_id(), &mut wf, 0, "rival", StepStatus::Completed).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyCompleted(_)));
        // First writer's signature is untouched.
        assert_eq!(wf.steps[0].signature, signature);
        assert_eq!(wf.steps[0].approver.as_deref(), Some("quinn"));
    }

    #[test]
    fn in_progress_then_complete() {
        let mut wf = workflow();
        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::InProgress).unwrap();
        assert_eq!(wf.steps[0].status, StepStatus::InProgress);
        assert!(wf.steps[0].signature.is_none());

        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::Completed).unwrap();
        assert_eq!(wf.steps[0].status, StepStatus::Completed);
    }

    #[test]
    fn cannot_regress_to_pending() {
        let mut wf = workflow();
        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::InProgress).unwrap();
        let err = advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::Pending).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn in_order_completion_runs_through() {
        let mut wf = workflow();
        for i in 0..wf.steps.len() {
            advance_step(&pack_id(), &mut wf, i, "approver", StepStatus::Completed).unwrap();
        }
        assert!(wf.is_complete());
    }

    #[test]
    fn step_two_blocked_while_step_one_in_progress() {
        let mut wf = workflow();
        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::InProgress).unwrap();
        let err = advance_step(&pack_id(), &mut wf, 1, "casey", StepStatus::Completed).unwrap_err();
        assert!(matches!(err, EngineError::OutOfOrderApproval { .. }));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut wf = workflow();
        let err = advance_step(&pack_id(), &mut wf, 9, "quinn", StepStatus::Completed).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn signatures_differ_per_step() {
        let mut wf = workflow();
        advance_step(&pack_id(), &mut wf, 0, "quinn", StepStatus::Completed).unwrap();
        advance_step(&pack_id(), &mut wf, 1, "quinn", StepStatus::Completed).unwrap();
        let first = wf.steps[0].signature.as_ref().unwrap();
        let second = wf.steps[1].signature.as_ref().unwrap();
        assert_ne!(first.content_hash, second.content_hash);
    }
}
