//! nfvctl - command-line client for a telco-cloud orchestrator
//!
//! The core of this crate is the request-specification subsystem: it ingests
//! user-authored declarative documents (JSON or YAML), validates them against
//! the catalog of known request kinds, fills in defaults, and hands back a
//! strongly-typed request object ready for dispatch to the orchestrator's
//! REST surface.
//!
//! # Pipeline
//!
//! ```text
//! bytes -> decode(encoding?) -> apply_defaults() -> validate() -> typed spec | error
//! ```
//!
//! The loader never runs validation itself; callers invoke [`validate`]
//! explicitly so tooling can inspect partially populated specs.
//!
//! # Modules
//!
//! - [`specs`] - spec kinds, loader, per-kind request shapes and validators
//! - [`error`] - error taxonomy shared across the crate
//!
//! [`validate`]: specs::RequestSpec::validate

pub mod error;
pub mod specs;

pub use error::{Error, Result};
