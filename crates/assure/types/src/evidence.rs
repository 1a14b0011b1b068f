//! Evidence components and evidence packs.

use crate::{ApprovalWorkflow, ComponentId, FrameworkId, PackId, RiskId, StepStatus, UseCaseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Narrows an operation to one use case or the whole register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    All,
    UseCase(UseCaseId),
}

impl Scope {
    /// Whether a risk belonging to `use_case_id` falls inside this scope.
    pub fn covers(&self, use_case_id: &UseCaseId) -> bool {
        match self {
            Self::All => true,
            Self::UseCase(id) => id == use_case_id,
        }
    }
}

/// Collection status of a single evidence component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Pending,
    InProgress,
    Included,
}

/// A discrete artifact (document, report, log export) substantiating
/// compliance for one or more risks. Belongs to exactly one pack.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceComponent {
    pub id: ComponentId,
    pub name: String,
    pub status: ComponentStatus,
    pub size_bytes: u64,
    /// The risks this component substantiates.
    pub risk_traceability: BTreeSet<RiskId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding a component to a pack.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewComponent {
    pub name: String,
    pub size_bytes: u64,
    pub risk_traceability: BTreeSet<RiskId>,
}

impl EvidenceComponent {
    pub fn create(input: NewComponent) -> Self {
        let now = Utc::now();
        Self {
            id: ComponentId::generate(),
            name: input.name,
            status: ComponentStatus::Pending,
            size_bytes: input.size_bytes,
            risk_traceability: input.risk_traceability,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Derived lifecycle state of an evidence pack.
///
/// Never stored: always recomputed from child state so it cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackStatus {
    Draft,
    InProgress,
    Complete,
}

/// A versioned bundle of evidence components plus an ordered approval
/// workflow, produced per audit or release cycle.
///
/// A pack whose derived status is [`PackStatus::Complete`] is immutable;
/// subsequent changes require a new pack version.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidencePack {
    pub id: PackId,
    pub name: String,
    pub target_framework: FrameworkId,
    /// The use case or application scope the pack covers.
    pub scope: Scope,
    pub components: Vec<EvidenceComponent>,
    pub workflow: ApprovalWorkflow,
    pub version: u32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EvidencePack {
    /// Derived pack status: `Complete` iff every approval step is completed
    /// and every component is included; `Draft` until any progress is made.
    pub fn derived_status(&self) -> PackStatus {
        let steps_done = self.workflow.is_complete();
        let components_done = !self.components.is_empty()
            && self
                .components
                .iter()
                .all(|c| c.status == ComponentStatus::Included);

        if steps_done && components_done {
            return PackStatus::Complete;
        }

        let any_step_progress = self
            .workflow
            .steps
            .iter()
            .any(|s| s.status != StepStatus::Pending);
        let any_component_progress = self
            .components
            .iter()
            .any(|c| c.status != ComponentStatus::Pending);

        if any_step_progress || any_component_progress {
            PackStatus::InProgress
        } else {
            PackStatus::Draft
        }
    }

    pub fn component(&self, id: &ComponentId) -> Option<&EvidenceComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub fn component_mut(&mut self, id: &ComponentId) -> Option<&mut EvidenceComponent> {
        self.components.iter_mut().find(|c| &c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApprovalStep;

    fn pack_with(steps: Vec<ApprovalStep>, components: Vec<EvidenceComponent>) -> EvidencePack {
        let now = Utc::now();
        EvidencePack {
            id: PackId::generate(),
            name: "Q3 audit".into(),
            target_framework: FrameworkId::new("fw-1"),
            scope: Scope::All,
            components,
            workflow: ApprovalWorkflow { steps },
            version: 1,
            created_by: "erin".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn component(status: ComponentStatus) -> EvidenceComponent {
        let mut c = EvidenceComponent::create(NewComponent {
            name: "eval report".into(),
            size_bytes: 2048,
            risk_traceability: BTreeSet::new(),
        });
        c.status = status;
        c
    }

    fn completed_step(role: &str) -> ApprovalStep {
        let mut s = ApprovalStep::new(role, "sign off");
        s.status = StepStatus::Completed;
        s
    }

    #[test]
    fn fresh_pack_is_draft() {
        let pack = pack_with(
            vec![ApprovalStep::new("QA Lead", "sign off")],
            vec![component(ComponentStatus::Pending)],
        );
        assert_eq!(pack.derived_status(), PackStatus::Draft);
    }

    #[test]
    fn partial_progress_is_in_progress() {
        let pack = pack_with(
            vec![ApprovalStep::new("QA Lead", "sign off")],
            vec![component(ComponentStatus::Included)],
        );
        assert_eq!(pack.derived_status(), PackStatus::InProgress);
    }

    #[test]
    fn all_done_is_complete() {
        let pack = pack_with(
            vec![completed_step("QA Lead"), completed_step("CISO")],
            vec![component(ComponentStatus::Included)],
        );
        assert_eq!(pack.derived_status(), PackStatus::Complete);
    }

    #[test]
    fn empty_components_never_complete() {
        let pack = pack_with(vec![completed_step("QA Lead")], vec![]);
        assert_ne!(pack.derived_status(), PackStatus::Complete);
    }

    #[test]
    fn scope_covers() {
        let uc = UseCaseId::new("uc-1");
        assert!(Scope::All.covers(&uc));
        assert!(Scope::UseCase(uc.clone()).covers(&uc));
        assert!(!Scope::UseCase(UseCaseId::new("uc-2")).covers(&uc));
    }
}
