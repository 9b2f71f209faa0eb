use async_trait::async_trait;
use bkp_core::{Observation, OutcomeObserver};

use crate::subscriber::view::log_observation;

/// Observer writing one log line per finished request.
#[derive(Debug, Default)]
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeObserver for Journal {
    async fn on_outcome(&self, observation: &Observation) {
        log_observation(observation);
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
