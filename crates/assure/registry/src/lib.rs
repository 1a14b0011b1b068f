#![deny(unsafe_code)]
//! The registry store: canonical, tenant-scoped state for the Assure engine.
//!
//! This crate provides:
//! - **[`Registry`]** — one tenant's canonical entities (use cases, risks,
//!   controls, mappings, metric library, evidence packs) behind a single
//!   writer lock, with referential invariants enforced on every write.
//! - **[`RegistrySnapshot`]** — a consistent point-in-time copy of the state
//!   that derived views (traceability matrix, compliance scores) compute
//!   from, so they never observe a partially-applied multi-entity write.
//! - **[`builtin_library`]** — the seeded trust-metric library.
//! - **[`Hub`]** — the tenant map handing out per-tenant registries.

pub mod hub;
pub mod library;
pub mod store;

pub use hub::Hub;
pub use library::builtin_library;
pub use store::{Registry, RegistrySnapshot};
