//! The canonical registry store.
//!
//! All mutations for a tenant are serialized through one writer lock; every
//! multi-entity write (cascade delete, pack edits) happens inside a single
//! critical section so readers only ever observe fully-applied state.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use assure_types::{
    ApprovalStep, ApprovalWorkflow, ComponentId, ComponentStatus, Control, ControlId,
    ControlStatus, EngineError, EntityKind, EvidenceComponent, EvidencePack, FrameworkId,
    MappingId, MappingUpdate, MetricDefinition, MetricId, MetricRef, NewComponent, NewControl,
    NewRisk,
    NewUseCase, PackId, PackStatus, Result, Risk, RiskId, RiskMetricMapping, RiskUpdate, Scope,
    UseCase, UseCaseId, UseCaseUpdate,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A consistent point-in-time copy of one tenant's canonical state.
///
/// Derived views (traceability matrix, compliance scores, coverage) always
/// compute from a snapshot, never from live references into the store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub use_cases: BTreeMap<UseCaseId, UseCase>,
    pub risks: BTreeMap<RiskId, Risk>,
    pub controls: BTreeMap<ControlId, Control>,
    pub mappings: BTreeMap<MappingId, RiskMetricMapping>,
    /// Metric library in insertion order (the suggestion tie-break key).
    pub metrics: Vec<MetricDefinition>,
    pub packs: BTreeMap<PackId, EvidencePack>,
}

impl RegistrySnapshot {
    /// The controls relevant to `scope`: under a use-case scope only
    /// controls linked to that use case's risks are included.
    pub fn scoped_controls(&self, scope: &Scope) -> BTreeMap<ControlId, Control> {
        match scope {
            Scope::All => self.controls.clone(),
            Scope::UseCase(_) => self
                .controls
                .iter()
                .filter(|(_, control)| {
                    control.risk_ids.iter().any(|risk_id| {
                        self.risks
                            .get(risk_id)
                            .is_some_and(|r| scope.covers(&r.use_case_id))
                    })
                })
                .map(|(id, control)| (id.clone(), control.clone()))
                .collect(),
        }
    }
}

/// One tenant's registry. Single logical writer: every mutation takes the
/// write lock for its whole critical section.
#[derive(Debug, Default)]
pub struct Registry {
    state: RwLock<RegistrySnapshot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the builtin metric library.
    pub fn with_builtin_library() -> Self {
        let registry = Self::new();
        {
            let mut state = registry.write();
            state.metrics = crate::library::builtin_library();
        }
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistrySnapshot> {
        self.state.read().expect("registry lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistrySnapshot> {
        self.state.write().expect("registry lock poisoned")
    }

    /// Clone the full state under the read lock.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.read().clone()
    }

    // ── Use cases ────────────────────────────────────────────────────

    pub fn create_use_case(&self, input: NewUseCase) -> Result<UseCaseId> {
        if input.title.trim().is_empty() {
            return Err(EngineError::Validation("use case title is required".into()));
        }
        let use_case = UseCase::create(input);
        let id = use_case.id.clone();
        self.write().use_cases.insert(id.clone(), use_case);
        info!(use_case = %id, "use case created");
        Ok(id)
    }

    pub fn use_case(&self, id: &UseCaseId) -> Result<UseCase> {
        self.read()
            .use_cases
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::UseCase, id))
    }

    pub fn update_use_case(&self, id: &UseCaseId, update: UseCaseUpdate) -> Result<()> {
        let mut state = self.write();
        let use_case = state
            .use_cases
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::UseCase, id))?;
        use_case.apply(update);
        debug!(use_case = %id, "use case updated");
        Ok(())
    }

    /// Delete a use case. With dependent risks and `cascade == false` the
    /// delete is rejected; with `cascade == true` the risks, their mappings,
    /// control back-references, and evidence traceability entries are all
    /// removed in one atomic critical section.
    pub fn delete_use_case(&self, id: &UseCaseId, cascade: bool) -> Result<()> {
        let mut state = self.write();
        if !state.use_cases.contains_key(id) {
            return Err(EngineError::not_found(EntityKind::UseCase, id));
        }
        let dependents: Vec<RiskId> = state
            .risks
            .values()
            .filter(|r| &r.use_case_id == id)
            .map(|r| r.id.clone())
            .collect();
        if !dependents.is_empty() && !cascade {
            return Err(EngineError::DependencyExists {
                kind: EntityKind::UseCase,
                id: id.to_string(),
                dependents: dependents.len(),
            });
        }
        for risk_id in &dependents {
            remove_risk(&mut state, risk_id);
        }
        state.use_cases.remove(id);
        info!(use_case = %id, cascaded_risks = dependents.len(), "use case deleted");
        Ok(())
    }

    // ── Risks ────────────────────────────────────────────────────────

    pub fn create_risk(&self, use_case_id: &UseCaseId, input: NewRisk) -> Result<RiskId> {
        if input.description.trim().is_empty() {
            return Err(EngineError::Validation(
                "risk description is required".into(),
            ));
        }
        let mut state = self.write();
        if !state.use_cases.contains_key(use_case_id) {
            return Err(EngineError::not_found(EntityKind::UseCase, use_case_id));
        }
        let risk = Risk::create(use_case_id.clone(), input);
        let id = risk.id.clone();
        state.risks.insert(id.clone(), risk);
        info!(risk = %id, use_case = %use_case_id, "risk created");
        Ok(id)
    }

    pub fn risk(&self, id: &RiskId) -> Result<Risk> {
        self.read()
            .risks
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::Risk, id))
    }

    pub fn update_risk(&self, id: &RiskId, update: RiskUpdate) -> Result<()> {
        let mut state = self.write();
        let risk = state
            .risks
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Risk, id))?;
        risk.apply(update);
        debug!(risk = %id, "risk updated");
        Ok(())
    }

    /// Delete a risk along with its mappings and every reference to it from
    /// controls and evidence-component traceability.
    pub fn delete_risk(&self, id: &RiskId) -> Result<()> {
        let mut state = self.write();
        if !state.risks.contains_key(id) {
            return Err(EngineError::not_found(EntityKind::Risk, id));
        }
        remove_risk(&mut state, id);
        info!(risk = %id, "risk deleted");
        Ok(())
    }

    // ── Controls ─────────────────────────────────────────────────────

    pub fn create_control(&self, input: NewControl) -> Result<ControlId> {
        if input.description.trim().is_empty() {
            return Err(EngineError::Validation(
                "control description is required".into(),
            ));
        }
        let mut state = self.write();
        for risk_id in &input.risk_ids {
            if !state.risks.contains_key(risk_id) {
                return Err(EngineError::not_found(EntityKind::Risk, risk_id));
            }
        }
        let control = Control::create(input);
        let id = control.id.clone();
        state.controls.insert(id.clone(), control);
        info!(control = %id, "control created");
        Ok(id)
    }

    pub fn control(&self, id: &ControlId) -> Result<Control> {
        self.read()
            .controls
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::Control, id))
    }

    /// Attach a control to an additional risk. Both ends must exist.
    pub fn link_control(&self, control_id: &ControlId, risk_id: &RiskId) -> Result<()> {
        let mut state = self.write();
        if !state.risks.contains_key(risk_id) {
            return Err(EngineError::not_found(EntityKind::Risk, risk_id));
        }
        let control = state
            .controls
            .get_mut(control_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Control, control_id))?;
        control.risk_ids.insert(risk_id.clone());
        control.updated_at = Utc::now();
        debug!(control = %control_id, risk = %risk_id, "control linked to risk");
        Ok(())
    }

    pub fn set_control_status(&self, id: &ControlId, status: ControlStatus) -> Result<()> {
        let mut state = self.write();
        let control = state
            .controls
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Control, id))?;
        control.status = status;
        control.updated_at = Utc::now();
        info!(control = %id, status = ?status, "control status changed");
        Ok(())
    }

    pub fn update_control(&self, id: &ControlId, description: impl Into<String>) -> Result<()> {
        let mut state = self.write();
        let control = state
            .controls
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Control, id))?;
        control.description = description.into();
        control.updated_at = Utc::now();
        Ok(())
    }

    pub fn delete_control(&self, id: &ControlId) -> Result<()> {
        let mut state = self.write();
        state
            .controls
            .remove(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Control, id))?;
        info!(control = %id, "control deleted");
        Ok(())
    }

    // ── Metric library ───────────────────────────────────────────────

    pub fn register_metric(&self, definition: MetricDefinition) -> Result<MetricId> {
        if definition.name.trim().is_empty() {
            return Err(EngineError::Validation("metric name is required".into()));
        }
        let id = definition.id.clone();
        self.write().metrics.push(definition);
        debug!(metric = %id, "metric registered");
        Ok(id)
    }

    /// The metric library in insertion order.
    pub fn metrics(&self) -> Vec<MetricDefinition> {
        self.read().metrics.clone()
    }

    pub fn metric(&self, id: &MetricId) -> Result<MetricDefinition> {
        self.read()
            .metrics
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::Metric, id))
    }

    // ── Mappings ─────────────────────────────────────────────────────

    /// Assign a metric to a risk. Fails with `DuplicateMapping` when the
    /// (risk, library metric) pair already exists; the rejection leaves the
    /// registry untouched. Custom metrics never collide.
    pub fn create_mapping(
        &self,
        risk_id: &RiskId,
        metric: MetricRef,
        threshold: f64,
        evaluation_method: impl Into<String>,
        owner: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Result<MappingId> {
        if !threshold.is_finite() {
            return Err(EngineError::Validation(
                "mapping threshold must be a finite number".into(),
            ));
        }
        let mut state = self.write();
        if !state.risks.contains_key(risk_id) {
            return Err(EngineError::not_found(EntityKind::Risk, risk_id));
        }
        if let Some(metric_id) = metric.library_id() {
            if !state.metrics.iter().any(|m| &m.id == metric_id) {
                return Err(EngineError::not_found(EntityKind::Metric, metric_id));
            }
            let duplicate = state
                .mappings
                .values()
                .any(|m| &m.risk_id == risk_id && m.metric.library_id() == Some(metric_id));
            if duplicate {
                return Err(EngineError::DuplicateMapping {
                    risk_id: risk_id.clone(),
                    metric_id: metric_id.clone(),
                });
            }
        }
        let mapping = RiskMetricMapping::create(
            risk_id.clone(),
            metric,
            threshold,
            evaluation_method,
            owner,
            created_by,
        );
        let id = mapping.id.clone();
        state.mappings.insert(id.clone(), mapping);
        info!(mapping = %id, risk = %risk_id, "metric mapped to risk");
        Ok(id)
    }

    pub fn mapping(&self, id: &MappingId) -> Result<RiskMetricMapping> {
        self.read()
            .mappings
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::Mapping, id))
    }

    /// Edit a mapping's threshold, evaluation method, or owner. The mapping
    /// keeps its id and `created_at`; the metric reference is immutable.
    pub fn update_mapping(&self, id: &MappingId, update: MappingUpdate) -> Result<()> {
        if let Some(threshold) = update.threshold {
            if !threshold.is_finite() {
                return Err(EngineError::Validation(
                    "mapping threshold must be a finite number".into(),
                ));
            }
        }
        let mut state = self.write();
        let mapping = state
            .mappings
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Mapping, id))?;
        mapping.apply(update);
        debug!(mapping = %id, "mapping updated");
        Ok(())
    }

    pub fn delete_mapping(&self, id: &MappingId) -> Result<()> {
        let mut state = self.write();
        state
            .mappings
            .remove(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Mapping, id))?;
        info!(mapping = %id, "mapping deleted");
        Ok(())
    }

    // ── Evidence packs ───────────────────────────────────────────────

    /// Create an evidence pack with its approval workflow. Components may
    /// reference only existing risks; a scoped pack requires the use case to
    /// exist.
    pub fn create_pack(
        &self,
        name: impl Into<String>,
        target_framework: FrameworkId,
        scope: Scope,
        components: Vec<NewComponent>,
        steps: Vec<ApprovalStep>,
        created_by: impl Into<String>,
    ) -> Result<PackId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::Validation("pack name is required".into()));
        }
        if steps.is_empty() {
            return Err(EngineError::Validation(
                "pack requires at least one approval step".into(),
            ));
        }
        let mut state = self.write();
        if let Scope::UseCase(use_case_id) = &scope {
            if !state.use_cases.contains_key(use_case_id) {
                return Err(EngineError::not_found(EntityKind::UseCase, use_case_id));
            }
        }
        for component in &components {
            for risk_id in &component.risk_traceability {
                if !state.risks.contains_key(risk_id) {
                    return Err(EngineError::not_found(EntityKind::Risk, risk_id));
                }
            }
        }
        let now = Utc::now();
        let pack = EvidencePack {
            id: PackId::generate(),
            name,
            target_framework,
            scope,
            components: components.into_iter().map(EvidenceComponent::create).collect(),
            workflow: ApprovalWorkflow::new(steps),
            version: 1,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        };
        let id = pack.id.clone();
        state.packs.insert(id.clone(), pack);
        info!(pack = %id, "evidence pack created");
        Ok(id)
    }

    pub fn pack(&self, id: &PackId) -> Result<EvidencePack> {
        self.read()
            .packs
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::EvidencePack, id))
    }

    /// Insert a fully-formed pack, e.g. the successor built by pack
    /// versioning. The same invariants as `create_pack` apply: a non-empty
    /// approval chain, an existing scope use case, and resolvable component
    /// risk references.
    pub fn insert_pack(&self, pack: EvidencePack) -> Result<PackId> {
        if pack.workflow.steps.is_empty() {
            return Err(EngineError::Validation(
                "pack requires at least one approval step".into(),
            ));
        }
        let mut state = self.write();
        if let Scope::UseCase(use_case_id) = &pack.scope {
            if !state.use_cases.contains_key(use_case_id) {
                return Err(EngineError::not_found(EntityKind::UseCase, use_case_id));
            }
        }
        for component in &pack.components {
            for risk_id in &component.risk_traceability {
                if !state.risks.contains_key(risk_id) {
                    return Err(EngineError::not_found(EntityKind::Risk, risk_id));
                }
            }
        }
        let id = pack.id.clone();
        state.packs.insert(id.clone(), pack);
        info!(pack = %id, "evidence pack inserted");
        Ok(id)
    }

    pub fn add_component(&self, pack_id: &PackId, component: NewComponent) -> Result<ComponentId> {
        let mut state = self.write();
        for risk_id in &component.risk_traceability {
            if !state.risks.contains_key(risk_id) {
                return Err(EngineError::not_found(EntityKind::Risk, risk_id));
            }
        }
        let pack = state
            .packs
            .get_mut(pack_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::EvidencePack, pack_id))?;
        if pack.derived_status() == PackStatus::Complete {
            return Err(EngineError::AlreadyCompleted(format!(
                "pack {pack_id} is complete; create a new version"
            )));
        }
        let component = EvidenceComponent::create(component);
        let id = component.id.clone();
        pack.components.push(component);
        pack.updated_at = Utc::now();
        debug!(pack = %pack_id, component = %id, "component added");
        Ok(id)
    }

    pub fn set_component_status(
        &self,
        pack_id: &PackId,
        component_id: &ComponentId,
        status: ComponentStatus,
    ) -> Result<()> {
        let mut state = self.write();
        let pack = state
            .packs
            .get_mut(pack_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::EvidencePack, pack_id))?;
        if pack.derived_status() == PackStatus::Complete {
            return Err(EngineError::AlreadyCompleted(format!(
                "pack {pack_id} is complete; create a new version"
            )));
        }
        let component = pack
            .component_mut(component_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Component, component_id))?;
        component.status = status;
        component.updated_at = Utc::now();
        pack.updated_at = Utc::now();
        debug!(pack = %pack_id, component = %component_id, status = ?status, "component status changed");
        Ok(())
    }

    /// Run a closure against a pack under the write lock. The closure's
    /// error leaves the pack untouched only if the closure itself did not
    /// mutate; transition functions are expected to check-then-write.
    pub fn update_pack<T>(
        &self,
        pack_id: &PackId,
        f: impl FnOnce(&mut EvidencePack) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.write();
        let pack = state
            .packs
            .get_mut(pack_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::EvidencePack, pack_id))?;
        let out = f(pack)?;
        pack.updated_at = Utc::now();
        Ok(out)
    }
}

/// Remove a risk and every reference to it. Callers hold the write lock, so
/// the whole removal is one atomic critical section.
fn remove_risk(state: &mut RegistrySnapshot, risk_id: &RiskId) {
    state.risks.remove(risk_id);
    state.mappings.retain(|_, m| &m.risk_id != risk_id);
    for control in state.controls.values_mut() {
        control.risk_ids.remove(risk_id);
    }
    for pack in state.packs.values_mut() {
        for component in &mut pack.components {
            component.risk_traceability.remove(risk_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_types::{Criticality, Likelihood, Severity};
    use std::collections::BTreeSet;

    fn new_use_case(title: &str) -> NewUseCase {
        NewUseCase {
            title: title.into(),
            description: "desc".into(),
            criticality: Criticality::Medium,
            source: "Domain Expert".into(),
            created_by: "tester".into(),
        }
    }

    fn new_risk(description: &str) -> NewRisk {
        NewRisk {
            description: description.into(),
            severity: Severity::High,
            likelihood: Likelihood::Occasional,
            compliance_mapping: BTreeSet::new(),
            evidence_required: "report".into(),
            created_by: "tester".into(),
        }
    }

    fn seeded() -> (Registry, UseCaseId, RiskId) {
        let registry = Registry::with_builtin_library();
        let uc = registry.create_use_case(new_use_case("Claims")).unwrap();
        let risk = registry.create_risk(&uc, new_risk("bias in payouts")).unwrap();
        (registry, uc, risk)
    }

    #[test]
    fn risk_requires_existing_use_case() {
        let registry = Registry::new();
        let err = registry
            .create_risk(&UseCaseId::new("missing"), new_risk("r"))
            .unwrap_err();
        assert!(matches!(err, EngineError::ReferenceNotFound { .. }));
    }

    #[test]
    fn empty_title_rejected() {
        let registry = Registry::new();
        let err = registry.create_use_case(new_use_case("  ")).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn delete_without_cascade_blocked() {
        let (registry, uc, risk) = seeded();
        let err = registry.delete_use_case(&uc, false).unwrap_err();
        assert!(matches!(err, EngineError::DependencyExists { dependents: 1, .. }));
        // The risk is untouched.
        assert!(registry.risk(&risk).is_ok());
        assert!(registry.use_case(&uc).is_ok());
    }

    #[test]
    fn cascade_delete_removes_all_references() {
        let (registry, uc, risk) = seeded();
        let metric_id = registry.metrics()[0].id.clone();
        registry
            .create_mapping(&risk, MetricRef::Library(metric_id), 0.8, "auto", "QA", "t")
            .unwrap();
        let control = registry
            .create_control(NewControl {
                description: "review".into(),
                risk_ids: [risk.clone()].into(),
                created_by: "t".into(),
            })
            .unwrap();
        let pack = registry
            .create_pack(
                "audit",
                FrameworkId::new("fw"),
                Scope::All,
                vec![NewComponent {
                    name: "log export".into(),
                    size_bytes: 10,
                    risk_traceability: [risk.clone()].into(),
                }],
                vec![ApprovalStep::new("QA Lead", "sign")],
                "t",
            )
            .unwrap();

        registry.delete_use_case(&uc, true).unwrap();

        assert!(registry.risk(&risk).is_err());
        let snapshot = registry.snapshot();
        assert!(snapshot.mappings.is_empty());
        assert!(snapshot.controls[&control].risk_ids.is_empty());
        let pack = &snapshot.packs[&pack];
        assert!(pack.components[0].risk_traceability.is_empty());
    }

    #[test]
    fn duplicate_mapping_rejected_idempotently() {
        let (registry, _, risk) = seeded();
        let metric_id = registry.metrics()[0].id.clone();
        registry
            .create_mapping(&risk, MetricRef::Library(metric_id.clone()), 0.8, "a", "QA", "t")
            .unwrap();
        let before = registry.snapshot().mappings.len();

        let err = registry
            .create_mapping(&risk, MetricRef::Library(metric_id), 0.9, "b", "QA", "t")
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateMapping { .. }));
        assert_eq!(registry.snapshot().mappings.len(), before);
    }

    #[test]
    fn update_mapping_edits_in_place() {
        let (registry, _, risk) = seeded();
        let metric_id = registry.metrics()[0].id.clone();
        let id = registry
            .create_mapping(&risk, MetricRef::Library(metric_id), 0.8, "auto", "QA", "t")
            .unwrap();
        let created = registry.mapping(&id).unwrap().created_at;

        registry
            .update_mapping(&id, MappingUpdate {
                threshold: Some(0.9),
                owner: Some("Risk Officer".into()),
                ..Default::default()
            })
            .unwrap();

        let mapping = registry.mapping(&id).unwrap();
        assert_eq!(mapping.threshold, 0.9);
        assert_eq!(mapping.owner, "Risk Officer");
        assert_eq!(mapping.evaluation_method, "auto");
        assert_eq!(mapping.created_at, created);

        let err = registry
            .update_mapping(&id, MappingUpdate {
                threshold: Some(f64::NAN),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let missing = registry
            .update_mapping(&MappingId::new("ghost"), MappingUpdate::default())
            .unwrap_err();
        assert!(matches!(missing, EngineError::ReferenceNotFound { .. }));
    }

    #[test]
    fn custom_metrics_never_collide() {
        let (registry, _, risk) = seeded();
        for _ in 0..2 {
            registry
                .create_mapping(
                    &risk,
                    MetricRef::Custom("manual check".into()),
                    0.5,
                    "manual",
                    "QA",
                    "t",
                )
                .unwrap();
        }
        assert_eq!(registry.snapshot().mappings.len(), 2);
    }

    #[test]
    fn mapping_requires_known_metric() {
        let (registry, _, risk) = seeded();
        let err = registry
            .create_mapping(&risk, MetricRef::Library(MetricId::new("nope")), 0.8, "a", "QA", "t")
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ReferenceNotFound { kind: EntityKind::Metric, .. }
        ));
    }

    #[test]
    fn link_control_validates_both_ends() {
        let (registry, _, risk) = seeded();
        let control = registry
            .create_control(NewControl {
                description: "guardrail".into(),
                risk_ids: BTreeSet::new(),
                created_by: "t".into(),
            })
            .unwrap();
        registry.link_control(&control, &risk).unwrap();
        assert!(registry.control(&control).unwrap().risk_ids.contains(&risk));

        let err = registry.link_control(&control, &RiskId::new("missing")).unwrap_err();
        assert!(matches!(err, EngineError::ReferenceNotFound { .. }));
    }

    #[test]
    fn pack_component_requires_known_risks() {
        let (registry, _, _) = seeded();
        let err = registry
            .create_pack(
                "audit",
                FrameworkId::new("fw"),
                Scope::All,
                vec![NewComponent {
                    name: "doc".into(),
                    size_bytes: 1,
                    risk_traceability: [RiskId::new("ghost")].into(),
                }],
                vec![ApprovalStep::new("QA Lead", "sign")],
                "t",
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::ReferenceNotFound { .. }));
    }

    #[test]
    fn insert_pack_enforces_pack_invariants() {
        let (registry, _, _) = seeded();
        let now = Utc::now();
        let pack = |components, steps| EvidencePack {
            id: PackId::generate(),
            name: "audit v2".into(),
            target_framework: FrameworkId::new("fw"),
            scope: Scope::All,
            components,
            workflow: ApprovalWorkflow::new(steps),
            version: 2,
            created_by: "t".into(),
            created_at: now,
            updated_at: now,
        };

        let no_steps = pack(vec![], vec![]);
        assert!(matches!(
            registry.insert_pack(no_steps).unwrap_err(),
            EngineError::Validation(_)
        ));

        let ghost_component = EvidenceComponent::create(NewComponent {
            name: "doc".into(),
            size_bytes: 1,
            risk_traceability: [RiskId::new("ghost")].into(),
        });
        let bad_refs = pack(
            vec![ghost_component],
            vec![ApprovalStep::new("QA Lead", "sign")],
        );
        assert!(matches!(
            registry.insert_pack(bad_refs).unwrap_err(),
            EngineError::ReferenceNotFound { .. }
        ));

        let ok = pack(vec![], vec![ApprovalStep::new("QA Lead", "sign")]);
        let id = registry.insert_pack(ok).unwrap();
        assert!(registry.pack(&id).is_ok());
    }

    #[test]
    fn pack_requires_steps() {
        let (registry, _, _) = seeded();
        let err = registry
            .create_pack("audit", FrameworkId::new("fw"), Scope::All, vec![], vec![], "t")
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn snapshot_is_detached() {
        let (registry, uc, _) = seeded();
        let snapshot = registry.snapshot();
        registry
            .update_use_case(&uc, UseCaseUpdate {
                title: Some("renamed".into()),
                ..Default::default()
            })
            .unwrap();
        // The earlier snapshot still holds the old title.
        assert_eq!(snapshot.use_cases[&uc].title, "Claims");
        assert_eq!(registry.use_case(&uc).unwrap().title, "renamed");
    }
}
