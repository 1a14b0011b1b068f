//! Tenant hub: one registry per organization.
//!
//! All mutations to a tenant's registry are serialized by that registry's
//! writer lock; the hub itself only hands out shared handles.

use crate::store::Registry;
use assure_types::TenantId;
use dashmap::DashMap;
use std::sync::Arc;

/// Maps tenants to their registries, creating one (seeded with the builtin
/// metric library) on first use.
#[derive(Default)]
pub struct Hub {
    tenants: DashMap<TenantId, Arc<Registry>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry for a tenant, created on first access.
    pub fn tenant(&self, id: &TenantId) -> Arc<Registry> {
        self.tenants
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Registry::with_builtin_library()))
            .clone()
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }
}
