pub mod error;
pub use error::CoreError;

pub mod builder;
pub use builder::{BuilderConfig, WorkloadSpecBuilder};

pub mod reconciler;
pub use reconciler::{JobCreator, ReconcileError};
#[cfg(feature = "memory")]
pub use reconciler::memory::InMemoryJobCreator;

pub mod orchestrator;
pub use orchestrator::Orchestrator;

pub mod observer;
pub use observer::{Observation, Operation, OutcomeObserver};
