use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dialer_core::{BulkDispatchOutcome, DispatchMode};
use gateway::config::PHONE_NUMBER_ID_VAR;
use gateway::CallGateway;
use tracing::{debug, info};

use crate::error::{DispatchError, Result};
use crate::invoker::CallInvoker;

/// Runs a list of numbers through the invoker, one call at a time, in order.
///
/// Calls are never issued concurrently. A failed call is recorded and the run
/// moves on to the next number.
#[derive(Clone)]
pub struct Dispatcher {
    invoker: CallInvoker,
    source_number_id: Option<String>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn CallGateway>, source_number_id: Option<String>) -> Self {
        Self {
            invoker: CallInvoker::new(gateway),
            source_number_id,
        }
    }

    pub fn has_source_number(&self) -> bool {
        self.source_number_id.is_some()
    }

    pub async fn dispatch(
        &self,
        assistant_id: &str,
        destination_numbers: &[String],
        mode: DispatchMode,
    ) -> Result<BulkDispatchOutcome> {
        let assistant_id = assistant_id.trim();
        if assistant_id.is_empty() || destination_numbers.is_empty() {
            return Err(DispatchError::Validation(
                "Missing required fields: assistantId and phoneNumbers are required".to_string(),
            ));
        }

        let source_number_id = self.source_number_id.as_deref().ok_or_else(|| {
            DispatchError::Configuration(format!("{} not set", PHONE_NUMBER_ID_VAR))
        })?;

        let base_time = match mode {
            DispatchMode::Scheduled {
                base_time: Some(base_time),
                ..
            } => base_time,
            _ => Utc::now(),
        };

        let total = destination_numbers.len();
        info!(
            assistant_id,
            total,
            scheduled = mode.is_scheduled(),
            "Starting calls for {} numbers",
            total
        );

        let mut results = Vec::with_capacity(total);

        for (index, raw) in destination_numbers.iter().enumerate() {
            let number = raw.trim();
            if number.is_empty() {
                debug!("Skipping empty phone number at index {}", index);
                continue;
            }

            let attempt = results.len();
            let scheduled_at = match mode {
                DispatchMode::Immediate { delay_ms } => {
                    if attempt > 0 && delay_ms > 0 {
                        debug!("Waiting {}ms before next call", delay_ms);
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                    None
                }
                DispatchMode::Scheduled { interval_ms, .. } => {
                    Some(stagger(base_time, attempt, interval_ms))
                }
            };

            info!("[{}/{}] Calling {}", index + 1, total, number);

            let result = self
                .invoker
                .invoke(assistant_id, number, source_number_id, scheduled_at)
                .await;

            match (&result.call_id, &result.error_message) {
                (Some(call_id), _) => info!("[{}/{}] Placed call {}", index + 1, total, call_id),
                (None, Some(error)) => info!("[{}/{}] Failed: {}", index + 1, total, error),
                (None, None) => {}
            }

            results.push(result);
        }

        let outcome = BulkDispatchOutcome::from_results(results, &mode);

        info!(
            total = outcome.total_calls,
            successful = outcome.successful_calls,
            failed = outcome.failed_calls,
            "Dispatch complete"
        );

        Ok(outcome)
    }
}

/// Origination time for the `attempt`-th call of a scheduled run.
fn stagger(base_time: DateTime<Utc>, attempt: usize, interval_ms: u64) -> DateTime<Utc> {
    let offset_ms = i64::try_from(interval_ms)
        .unwrap_or(i64::MAX)
        .saturating_mul(i64::try_from(attempt).unwrap_or(i64::MAX));

    TimeDelta::try_milliseconds(offset_ms)
        .and_then(|offset| base_time.checked_add_signed(offset))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
