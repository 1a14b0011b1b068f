//! Matrix construction.

use assure_registry::RegistrySnapshot;
use assure_types::{ComponentId, MetricId, RiskId, Scope};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One matrix row: everything covering a single risk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskTrace {
    pub risk_id: RiskId,
    pub has_control: bool,
    /// Library metrics mapped to the risk.
    pub mapped_metric_ids: BTreeSet<MetricId>,
    /// True when any mapping (library or custom) exists for the risk.
    pub has_metric_mapping: bool,
    pub evidence_component_ids: BTreeSet<ComponentId>,
    /// Framework names the risk is declared against.
    pub frameworks_covered: BTreeSet<String>,
}

impl RiskTrace {
    /// Fully traced: at least one control, one metric mapping, and one
    /// linked evidence component.
    pub fn fully_traced(&self) -> bool {
        self.has_control && self.has_metric_mapping && !self.evidence_component_ids.is_empty()
    }
}

/// The traceability matrix for a scope, keyed by risk id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceMatrix {
    pub scope: Scope,
    pub rows: BTreeMap<RiskId, RiskTrace>,
}

/// Build the matrix for `scope` from a consistent snapshot. Pure derived
/// view; nothing is cached.
pub fn build_matrix(snapshot: &RegistrySnapshot, scope: &Scope) -> TraceMatrix {
    let mut rows = BTreeMap::new();

    for risk in snapshot.risks.values() {
        if !scope.covers(&risk.use_case_id) {
            continue;
        }

        let has_control = snapshot
            .controls
            .values()
            .any(|c| c.risk_ids.contains(&risk.id));

        let mut mapped_metric_ids = BTreeSet::new();
        let mut has_metric_mapping = false;
        for mapping in snapshot.mappings.values() {
            if mapping.risk_id != risk.id {
                continue;
            }
            has_metric_mapping = true;
            if let Some(metric_id) = mapping.metric.library_id() {
                mapped_metric_ids.insert(metric_id.clone());
            }
        }

        let evidence_component_ids: BTreeSet<ComponentId> = snapshot
            .packs
            .values()
            .flat_map(|p| p.components.iter())
            .filter(|c| c.risk_traceability.contains(&risk.id))
            .map(|c| c.id.clone())
            .collect();

        rows.insert(
            risk.id.clone(),
            RiskTrace {
                risk_id: risk.id.clone(),
                has_control,
                mapped_metric_ids,
                has_metric_mapping,
                evidence_component_ids,
                frameworks_covered: risk.compliance_mapping.clone(),
            },
        );
    }

    TraceMatrix {
        scope: scope.clone(),
        rows,
    }
}
