//! Domain types of the backup scheduler.
//!
//! Everything here is pure data: environment sources and their composition, request specs,
//! workload descriptors and reconciliation outcomes. Nothing in this crate talks to a cluster.

mod error;
pub use error::ModelError;

mod domain;
pub use domain::*;

mod source;
pub use source::*;

mod workload;
pub use workload::*;

mod outcome;
pub use outcome::*;
