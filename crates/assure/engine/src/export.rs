//! Evidence-pack export.

use assure_registry::RegistrySnapshot;
use assure_scoring::score_framework;
use assure_trace::build_matrix;
use assure_types::{
    ComponentStatus, EngineError, EvidencePack, Framework, PackId, PackStatus, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// A content-addressed export of a completed evidence pack: the submittable
/// artifact handed to a regulator or auditor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub pack_id: PackId,
    pub pack_name: String,
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    /// Canonical JSON manifest: components, approvals with signatures,
    /// traceability rows for the pack's scope, and the framework score.
    pub manifest: serde_json::Value,
    /// blake3 hex digest of the manifest.
    pub content_hash: String,
}

/// Export `pack`, which must be complete: every approval step completed and
/// every component included. Anything outstanding yields `PackNotReady`
/// with the gaps spelled out.
pub fn export_pack(
    snapshot: &RegistrySnapshot,
    framework: &Framework,
    pack: &EvidencePack,
) -> Result<ExportArtifact> {
    if pack.derived_status() != PackStatus::Complete {
        return Err(EngineError::PackNotReady {
            pack_id: pack.id.clone(),
            missing: describe_gaps(pack),
        });
    }

    let matrix = build_matrix(snapshot, &pack.scope);
    // Score over the pack's scope so the artifact matches what the
    // compliance-score query reports for the same framework and scope.
    let score = score_framework(framework, &snapshot.scoped_controls(&pack.scope))?;

    let manifest = json!({
        "pack": pack,
        "framework": framework.name,
        "compliance": score,
        "traceability": matrix.rows,
    });

    let bytes = serde_json::to_vec(&manifest)
        .map_err(|e| EngineError::Validation(format!("manifest serialization failed: {e}")))?;
    let content_hash = blake3::hash(&bytes).to_hex().to_string();

    info!(pack = %pack.id, hash = %content_hash, "evidence pack exported");
    Ok(ExportArtifact {
        pack_id: pack.id.clone(),
        pack_name: pack.name.clone(),
        version: pack.version,
        exported_at: Utc::now(),
        manifest,
        content_hash,
    })
}

fn describe_gaps(pack: &EvidencePack) -> String {
    let (done, total) = pack.workflow.progress();
    let pending_components = pack
        .components
        .iter()
        .filter(|c| c.status != ComponentStatus::Included)
        .count();
    let mut parts = Vec::new();
    if done < total {
        parts.push(format!("{} of {} approval steps completed", done, total));
    }
    if pack.components.is_empty() {
        parts.push("no evidence components".into());
    } else if pending_components > 0 {
        parts.push(format!("{pending_components} component(s) not included"));
    }
    parts.join(", ")
}
