//! Project reconciliation
//!
//! Translates a Project into one namespace and one quota per environment
//! and one role binding per (environment, member) pair, creating whatever
//! is missing.

pub mod converge;
pub mod describe;
pub mod naming;
pub mod orchestrator;

pub use converge::{ensure, Outcome};
pub use orchestrator::{converge_project, reconcile_project, ReconcileSummary};
