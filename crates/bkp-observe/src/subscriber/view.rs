use std::time::Duration;

use bkp_core::Observation;
use bkp_model::ResponseStatus;
use tracing::{debug, info, warn};

#[inline]
pub fn message_for(status: ResponseStatus) -> &'static str {
    match status {
        ResponseStatus::CronJobCreated => "backup schedule created",
        ResponseStatus::Exists => "workload already present",
        ResponseStatus::CronJobUpdated => "backup schedule updated",
        ResponseStatus::JobCreated => "restore job launched",

        ResponseStatus::CronJobCreateFailed => "backup schedule rejected by the cluster",
        ResponseStatus::CronJobUpdateFailed => "backup schedule update failed",
        ResponseStatus::JobCreateFailed => "restore job rejected by the cluster",
    }
}

/// Saturates at `u64::MAX` instead of wrapping.
#[inline]
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[inline]
pub fn log_observation(o: &Observation) {
    let msg = message_for(o.status);
    let elapsed = elapsed_ms(o.elapsed);
    let op = o.operation.as_str();

    match o.status {
        ResponseStatus::Exists => debug!(
            operation = op,
            name = %o.name,
            namespace = %o.namespace,
            elapsed_ms = elapsed,
            "{msg}"
        ),
        s if s.is_failure() => warn!(operation = op, status = %s, elapsed_ms = elapsed, "{msg}"),
        _ => info!(
            operation = op,
            name = %o.name,
            namespace = %o.namespace,
            elapsed_ms = elapsed,
            "{msg}"
        ),
    }
}
