//! The engine facade.

use std::sync::{Arc, RwLock};

use assure_registry::Registry;
use assure_scoring::{score_framework, ComplianceScore, FrameworkRegistry};
use assure_suggest::{suggest, Suggestion};
use assure_trace::{build_matrix, coverage, CoverageReport, TraceMatrix};
use assure_types::{
    ApprovalStep, ComponentId, ComponentStatus, ControlId, ControlStatus, EngineError,
    EntityKind, Framework, FrameworkId, MappingId, MappingUpdate, MetricDefinition, MetricId,
    MetricRef,
    NewComponent, NewControl, NewRisk, NewUseCase, PackId, PackStatus, Result, RiskId, RiskUpdate,
    Scope, StepStatus, UseCaseId, UseCaseUpdate,
};
use assure_workflow::{advance_step, new_pack_version, standard_chain, StepAdvance};
use tracing::info;

use crate::export::{export_pack, ExportArtifact};

/// The facade over one tenant's registry and scoring configuration.
pub struct Engine {
    registry: Arc<Registry>,
    frameworks: RwLock<FrameworkRegistry>,
}

impl Engine {
    /// An engine with the builtin metric library and the standard framework
    /// catalog.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::with_builtin_library()),
            frameworks: RwLock::new(FrameworkRegistry::with_standard_catalog()),
        }
    }

    /// Wrap an existing registry (e.g. one handed out by the tenant hub).
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            frameworks: RwLock::new(FrameworkRegistry::with_standard_catalog()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── Use cases and risks ──────────────────────────────────────────

    pub fn create_use_case(&self, input: NewUseCase) -> Result<UseCaseId> {
        self.registry.create_use_case(input)
    }

    pub fn update_use_case(&self, id: &UseCaseId, update: UseCaseUpdate) -> Result<()> {
        self.registry.update_use_case(id, update)
    }

    pub fn delete_use_case(&self, id: &UseCaseId, cascade: bool) -> Result<()> {
        self.registry.delete_use_case(id, cascade)
    }

    pub fn create_risk(&self, use_case_id: &UseCaseId, input: NewRisk) -> Result<RiskId> {
        self.registry.create_risk(use_case_id, input)
    }

    pub fn update_risk(&self, id: &RiskId, update: RiskUpdate) -> Result<()> {
        self.registry.update_risk(id, update)
    }

    pub fn delete_risk(&self, id: &RiskId) -> Result<()> {
        self.registry.delete_risk(id)
    }

    // ── Controls ─────────────────────────────────────────────────────

    pub fn create_control(&self, input: NewControl) -> Result<ControlId> {
        self.registry.create_control(input)
    }

    pub fn link_control(&self, control_id: &ControlId, risk_id: &RiskId) -> Result<()> {
        self.registry.link_control(control_id, risk_id)
    }

    /// Change a control's assessed status. Scores are derived, so this is
    /// all a "recomputation trigger" amounts to.
    pub fn set_control_status(&self, id: &ControlId, status: ControlStatus) -> Result<()> {
        self.registry.set_control_status(id, status)
    }

    // ── Metrics and mappings ─────────────────────────────────────────

    pub fn register_metric(&self, definition: MetricDefinition) -> Result<MetricId> {
        self.registry.register_metric(definition)
    }

    pub fn metrics(&self) -> Vec<MetricDefinition> {
        self.registry.metrics()
    }

    /// Ranked metric candidates for a risk. An empty list means the caller
    /// should offer the custom-metric path; it is not an error.
    pub fn suggest_metrics(&self, risk_id: &RiskId) -> Result<Vec<Suggestion>> {
        let snapshot = self.registry.snapshot();
        let risk = snapshot
            .risks
            .get(risk_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Risk, risk_id))?;
        Ok(suggest(risk, &snapshot.metrics))
    }

    pub fn create_mapping(
        &self,
        risk_id: &RiskId,
        metric: MetricRef,
        threshold: f64,
        evaluation_method: impl Into<String>,
        owner: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Result<MappingId> {
        self.registry
            .create_mapping(risk_id, metric, threshold, evaluation_method, owner, created_by)
    }

    pub fn update_mapping(&self, id: &MappingId, update: MappingUpdate) -> Result<()> {
        self.registry.update_mapping(id, update)
    }

    pub fn delete_mapping(&self, id: &MappingId) -> Result<()> {
        self.registry.delete_mapping(id)
    }

    // ── Derived views ────────────────────────────────────────────────

    /// The traceability matrix for a scope. Pure read over a consistent
    /// snapshot; recomputed on every call.
    pub fn traceability_matrix(&self, scope: &Scope) -> TraceMatrix {
        build_matrix(&self.registry.snapshot(), scope)
    }

    pub fn coverage(&self, scope: &Scope) -> CoverageReport {
        coverage(&self.registry.snapshot(), scope)
    }

    // ── Frameworks and scoring ───────────────────────────────────────

    pub fn register_framework(&self, framework: Framework) -> Result<FrameworkId> {
        self.frameworks_write().register(framework)
    }

    /// Attach an existing control to a framework category.
    pub fn assign_control_to_framework(
        &self,
        framework_id: &FrameworkId,
        category: &str,
        control_id: &ControlId,
    ) -> Result<()> {
        // Validate the control exists before touching configuration.
        self.registry.control(control_id)?;
        self.frameworks_write()
            .assign_control(framework_id, category, control_id.clone())
    }

    /// Compliance percentages for a framework, optionally narrowed to the
    /// controls linked to risks in `scope`.
    pub fn compliance_score(
        &self,
        framework_id: &FrameworkId,
        scope: &Scope,
    ) -> Result<ComplianceScore> {
        let snapshot = self.registry.snapshot();
        let frameworks = self.frameworks_read();
        let framework = frameworks.get(framework_id)?;
        score_framework(framework, &snapshot.scoped_controls(scope))
    }

    // ── Evidence packs ───────────────────────────────────────────────

    /// Create an evidence pack. `chain` defaults to the standard governance
    /// chain (QA Lead → CISO → Compliance Officer → CIO) when omitted.
    pub fn create_evidence_pack(
        &self,
        name: impl Into<String>,
        framework_id: &FrameworkId,
        scope: Scope,
        components: Vec<NewComponent>,
        chain: Option<Vec<ApprovalStep>>,
        created_by: impl Into<String>,
    ) -> Result<PackId> {
        self.frameworks_read().get(framework_id)?;
        self.registry.create_pack(
            name,
            framework_id.clone(),
            scope,
            components,
            chain.unwrap_or_else(standard_chain),
            created_by,
        )
    }

    pub fn add_evidence_component(
        &self,
        pack_id: &PackId,
        component: NewComponent,
    ) -> Result<ComponentId> {
        self.registry.add_component(pack_id, component)
    }

    pub fn set_component_status(
        &self,
        pack_id: &PackId,
        component_id: &ComponentId,
        status: ComponentStatus,
    ) -> Result<()> {
        self.registry.set_component_status(pack_id, component_id, status)
    }

    /// Advance one approval step. Sequential gating and the first-writer-wins
    /// compare-and-set run inside the registry's write critical section.
    pub fn advance_approval_step(
        &self,
        pack_id: &PackId,
        step_index: usize,
        approver: &str,
        target: StepStatus,
    ) -> Result<StepAdvance> {
        let advance = self.registry.update_pack(pack_id, |pack| {
            let id = pack.id.clone();
            advance_step(&id, &mut pack.workflow, step_index, approver, target)
        })?;
        let status = self.pack_status(pack_id)?;
        if status == PackStatus::Complete {
            info!(pack = %pack_id, "evidence pack complete");
        }
        Ok(advance)
    }

    /// Derived pack status, recomputed from child state on every call.
    pub fn pack_status(&self, pack_id: &PackId) -> Result<PackStatus> {
        Ok(self.registry.pack(pack_id)?.derived_status())
    }

    /// Create the successor version of a pack with a fresh approval
    /// workflow.
    pub fn new_pack_version(
        &self,
        pack_id: &PackId,
        created_by: impl Into<String>,
    ) -> Result<PackId> {
        let pack = self.registry.pack(pack_id)?;
        self.registry.insert_pack(new_pack_version(&pack, created_by))
    }

    /// Export a completed pack as a content-addressed artifact. Fails with
    /// `PackNotReady` while any approval step or component is outstanding.
    pub fn export_evidence_pack(&self, pack_id: &PackId) -> Result<ExportArtifact> {
        let snapshot = self.registry.snapshot();
        let pack = snapshot
            .packs
            .get(pack_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::EvidencePack, pack_id))?;
        let frameworks = self.frameworks_read();
        let framework = frameworks.get(&pack.target_framework)?;
        export_pack(&snapshot, framework, pack)
    }

    // ── Internal helpers ─────────────────────────────────────────────

    fn frameworks_read(&self) -> std::sync::RwLockReadGuard<'_, FrameworkRegistry> {
        self.frameworks.read().expect("framework lock poisoned")
    }

    fn frameworks_write(&self) -> std::sync::RwLockWriteGuard<'_, FrameworkRegistry> {
        self.frameworks.write().expect("framework lock poisoned")
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
