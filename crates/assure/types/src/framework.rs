//! Compliance framework configuration: weighted categories of controls.

use crate::{ControlId, EngineError, FrameworkId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_EPSILON: f64 = 1e-6;

/// One weighted category within a framework, holding the controls assessed
/// under it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameworkCategory {
    pub name: String,
    /// Relative weight; all category weights in a framework sum to 1.0.
    pub weight: f64,
    pub control_ids: BTreeSet<ControlId>,
    /// Scoring policy when the category holds no controls: `false` (default)
    /// scores the category 0 while its weight stays in the denominator;
    /// `true` redistributes its weight across non-empty categories.
    #[serde(default)]
    pub exclude_when_empty: bool,
}

impl FrameworkCategory {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            control_ids: BTreeSet::new(),
            exclude_when_empty: false,
        }
    }

    pub fn exclude_when_empty(mut self) -> Self {
        self.exclude_when_empty = true;
        self
    }
}

/// An external compliance standard (e.g. NIST AI RMF, EU AI Act) with an
/// ordered list of weighted categories. Configuration data, not derived.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Framework {
    pub id: FrameworkId,
    pub name: String,
    pub categories: Vec<FrameworkCategory>,
}

impl Framework {
    pub fn new(name: impl Into<String>, categories: Vec<FrameworkCategory>) -> Self {
        Self {
            id: FrameworkId::generate(),
            name: name.into(),
            categories,
        }
    }

    /// Validate the configuration: at least one category, non-negative
    /// weights, and weights summing to 1.0 within tolerance.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(EngineError::Validation(format!(
                "framework {} has no categories",
                self.name
            )));
        }
        if let Some(cat) = self.categories.iter().find(|c| c.weight < 0.0) {
            return Err(EngineError::Validation(format!(
                "category {} has negative weight {}",
                cat.name, cat.weight
            )));
        }
        let total: f64 = self.categories.iter().map(|c| c.weight).sum();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(EngineError::Validation(format!(
                "framework {} category weights sum to {total}, expected 1.0",
                self.name
            )));
        }
        Ok(())
    }

    /// Attach a control to the named category.
    pub fn assign_control(&mut self, category: &str, control_id: ControlId) -> Result<()> {
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| {
                EngineError::Validation(format!(
                    "framework {} has no category named {category}",
                    self.name
                ))
            })?;
        cat.control_ids.insert(control_id);
        Ok(())
    }
}
