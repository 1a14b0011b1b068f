//! The scoring algorithm.

use assure_types::{Control, ControlId, Framework, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Integer compliance percentages for one framework.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceScore {
    /// Weighted overall percentage, 0..=100.
    pub overall: u8,
    /// Category name → percentage, 0..=100.
    pub by_category: BTreeMap<String, u8>,
}

/// Score a framework against the current control states.
///
/// Category score = round(mean(control values) × 100). An empty category
/// scores 0 with its weight kept in the denominator, unless it was
/// registered with `exclude_when_empty`, in which case its weight is
/// redistributed proportionally across the non-empty categories.
///
/// Overall = round(Σ category score × effective weight).
pub fn score_framework(
    framework: &Framework,
    controls: &BTreeMap<ControlId, Control>,
) -> Result<ComplianceScore> {
    framework.validate()?;

    // Category scores and whether each category has any controls.
    let mut by_category = BTreeMap::new();
    let mut populated = Vec::with_capacity(framework.categories.len());
    for category in &framework.categories {
        let values: Vec<f64> = category
            .control_ids
            .iter()
            .filter_map(|id| controls.get(id))
            .map(|c| c.status.value())
            .collect();
        let score = if values.is_empty() {
            0u8
        } else {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (mean * 100.0).round() as u8
        };
        populated.push(!values.is_empty());
        by_category.insert(category.name.clone(), score);
    }

    // Effective weight denominator: drop opted-out empty categories.
    let counted_weight: f64 = framework
        .categories
        .iter()
        .zip(&populated)
        .filter(|(c, has)| **has || !c.exclude_when_empty)
        .map(|(c, _)| c.weight)
        .sum();

    let overall = if counted_weight <= 0.0 {
        0u8
    } else {
        let weighted: f64 = framework
            .categories
            .iter()
            .zip(&populated)
            .filter(|(c, has)| **has || !c.exclude_when_empty)
            .map(|(c, _)| f64::from(by_category[&c.name]) * (c.weight / counted_weight))
            .sum();
        weighted.round() as u8
    };

    debug!(framework = %framework.name, overall, "framework scored");
    Ok(ComplianceScore {
        overall,
        by_category,
    })
}
