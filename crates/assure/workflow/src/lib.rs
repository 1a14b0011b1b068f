#![deny(unsafe_code)]
//! Governance approval workflow: the per-pack state machine gating evidence
//! submission.
//!
//! Steps advance `Pending → InProgress → Completed`, strictly in declared
//! role order: step *i* may move only once step *i−1* is completed. All
//! transitions run through one function ([`advance_step`]) so out-of-order
//! attempts are rejected in a single place, and completion attaches
//! immutable signature metadata. Racing writers are resolved
//! first-writer-wins: the loser sees `AlreadyCompleted`.

pub mod chain;
pub mod steps;
pub mod version;

pub use chain::standard_chain;
pub use steps::{advance_step, StepAdvance};
pub use version::new_pack_version;
