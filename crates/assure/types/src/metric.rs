//! Trust metrics: library definitions and risk-metric mappings.

use crate::{MappingId, MetricId, RiskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The facet of trust a metric measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Accuracy,
    Fairness,
    Privacy,
    Security,
    DataQuality,
    Routing,
    Custom,
}

/// A library entry describing a quantitative trust metric.
///
/// Library entries are definitions, not instances: assigning one to a risk
/// produces a [`RiskMetricMapping`] carrying the chosen threshold and owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub id: MetricId,
    pub name: String,
    pub category: MetricCategory,
    /// Normalized keywords matched against risk descriptions by the
    /// suggestion engine.
    pub applicable_risk_tags: BTreeSet<String>,
    /// Default threshold on a category-appropriate scale (usually [0, 1]).
    pub default_threshold: f64,
    pub evaluation_method_template: String,
}

impl MetricDefinition {
    pub fn new(
        name: impl Into<String>,
        category: MetricCategory,
        tags: impl IntoIterator<Item = &'static str>,
        default_threshold: f64,
        evaluation_method_template: impl Into<String>,
    ) -> Self {
        Self {
            id: MetricId::generate(),
            name: name.into(),
            category,
            applicable_risk_tags: tags.into_iter().map(str::to_string).collect(),
            default_threshold,
            evaluation_method_template: evaluation_method_template.into(),
        }
    }
}

/// The metric side of a mapping: either a library entry or a free-text
/// custom metric (the fallback path when suggestion finds no match).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricRef {
    Library(MetricId),
    Custom(String),
}

impl MetricRef {
    /// The library id, if this is a library metric.
    pub fn library_id(&self) -> Option<&MetricId> {
        match self {
            Self::Library(id) => Some(id),
            Self::Custom(_) => None,
        }
    }
}

impl std::fmt::Display for MetricRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Library(id) => write!(f, "{id}"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// The join entity assigning a metric to a risk.
///
/// Invariant: at most one mapping exists per (risk, library metric) pair.
/// Custom metrics never collide.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskMetricMapping {
    pub id: MappingId,
    pub risk_id: RiskId,
    pub metric: MetricRef,
    pub threshold: f64,
    pub evaluation_method: String,
    /// Role accountable for evaluating the metric, e.g. "QA Engineer".
    pub owner: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a mapping. `None` fields are left unchanged. The
/// metric itself is fixed at creation; re-targeting means a new mapping.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MappingUpdate {
    pub threshold: Option<f64>,
    pub evaluation_method: Option<String>,
    pub owner: Option<String>,
}

impl RiskMetricMapping {
    pub fn create(
        risk_id: RiskId,
        metric: MetricRef,
        threshold: f64,
        evaluation_method: impl Into<String>,
        owner: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: MappingId::generate(),
            risk_id,
            metric,
            threshold,
            evaluation_method: evaluation_method.into(),
            owner: owner.into(),
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update. Id, risk, metric, and `created_at` survive.
    pub fn apply(&mut self, update: MappingUpdate) {
        if let Some(threshold) = update.threshold {
            self.threshold = threshold;
        }
        if let Some(method) = update.evaluation_method {
            self.evaluation_method = method;
        }
        if let Some(owner) = update.owner {
            self.owner = owner;
        }
    }
}
