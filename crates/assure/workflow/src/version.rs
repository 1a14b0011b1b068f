//! Pack versioning.
//!
//! A pack whose derived status is complete is immutable: its approvals and
//! signatures are frozen. Re-approval happens on a successor version with a
//! fresh workflow instance.

use assure_types::{ApprovalStep, ApprovalWorkflow, EvidencePack, PackId};
use chrono::Utc;

/// Create the successor version of a pack: same name, framework, scope, and
/// components, a reset approval workflow over the same role chain, and a
/// bumped version number under a fresh id.
pub fn new_pack_version(pack: &EvidencePack, created_by: impl Into<String>) -> EvidencePack {
    let steps = pack
        .workflow
        .steps
        .iter()
        .map(|s| ApprovalStep::new(s.role.clone(), s.action.clone()))
        .collect();
    let now = Utc::now();
    EvidencePack {
        id: PackId::generate(),
        name: pack.name.clone(),
        target_framework: pack.target_framework.clone(),
        scope: pack.scope.clone(),
        components: pack.components.clone(),
        workflow: ApprovalWorkflow::new(steps),
        version: pack.version + 1,
        created_by: created_by.into(),
        created_at: now,
        updated_at: now,
    }
}
