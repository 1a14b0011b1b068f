//! Framework configuration registry.

use assure_types::{ControlId, EngineError, EntityKind, Framework, FrameworkId, Result};
use std::collections::BTreeMap;
use tracing::info;

/// Holds validated framework configurations. This is configuration data,
/// not derived state: weights and category membership are set by governance
/// staff, while scores are always recomputed from it.
#[derive(Debug, Default)]
pub struct FrameworkRegistry {
    frameworks: BTreeMap<FrameworkId, Framework>,
}

impl FrameworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the standard framework catalog.
    pub fn with_standard_catalog() -> Self {
        let mut registry = Self::new();
        for framework in crate::catalog::standard_frameworks() {
            registry
                .register(framework)
                .expect("catalog frameworks are valid by construction");
        }
        registry
    }

    /// Register a framework after validating its weights.
    pub fn register(&mut self, framework: Framework) -> Result<FrameworkId> {
        framework.validate()?;
        let id = framework.id.clone();
        info!(framework = %framework.name, "framework registered");
        self.frameworks.insert(id.clone(), framework);
        Ok(id)
    }

    pub fn get(&self, id: &FrameworkId) -> Result<&Framework> {
        self.frameworks
            .get(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Framework, id))
    }

    /// Attach a control to a category of a registered framework.
    pub fn assign_control(
        &mut self,
        framework_id: &FrameworkId,
        category: &str,
        control_id: ControlId,
    ) -> Result<()> {
        let framework = self
            .frameworks
            .get_mut(framework_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Framework, framework_id))?;
        framework.assign_control(category, control_id)
    }

    pub fn list(&self) -> impl Iterator<Item = &Framework> {
        self.frameworks.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_types::FrameworkCategory;

    #[test]
    fn register_validates_weights() {
        let mut registry = FrameworkRegistry::new();
        let bad = Framework::new("Bad", vec![FrameworkCategory::new("A", 0.5)]);
        assert!(registry.register(bad).is_err());

        let good = Framework::new("Good", vec![FrameworkCategory::new("A", 1.0)]);
        let id = registry.register(good).unwrap();
        assert_eq!(registry.get(&id).unwrap().name, "Good");
    }

    #[test]
    fn standard_catalog_loads() {
        let registry = FrameworkRegistry::with_standard_catalog();
        assert!(registry.list().count() >= 2);
    }

    #[test]
    fn assign_control_requires_known_framework() {
        let mut registry = FrameworkRegistry::new();
        let err = registry
            .assign_control(&FrameworkId::new("missing"), "A", ControlId::new("c-1"))
            .unwrap_err();
        assert!(matches!(err, EngineError::ReferenceNotFound { .. }));
    }
}
