//! Opaque entity identifiers.
//!
//! Every entity is identified by a globally unique, never-reused id assigned
//! at creation. Ids are opaque strings (UUID v4 under the hood) so storage
//! adapters cannot infer ordering or provenance from them.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh unique id.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a tenant (one organization's registry).
    TenantId
);
entity_id!(
    /// Identifies a declared use case.
    UseCaseId
);
entity_id!(
    /// Identifies a risk-register entry.
    RiskId
);
entity_id!(
    /// Identifies a control.
    ControlId
);
entity_id!(
    /// Identifies a metric library entry.
    MetricId
);
entity_id!(
    /// Identifies a risk-metric mapping.
    MappingId
);
entity_id!(
    /// Identifies an evidence component within a pack.
    ComponentId
);
entity_id!(
    /// Identifies an evidence pack.
    PackId
);
entity_id!(
    /// Identifies a compliance framework configuration.
    FrameworkId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = RiskId::generate();
        let b = RiskId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn id_display_matches_inner() {
        let id = UseCaseId::new("uc-001");
        assert_eq!(id.to_string(), "uc-001");
        assert_eq!(id.as_str(), "uc-001");
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = PackId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let restored: PackId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
