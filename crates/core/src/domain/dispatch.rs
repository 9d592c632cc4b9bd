use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::call::CallResult;
use crate::error::{CoreError, Result};

/// Wait between immediate calls, and stagger between scheduled ones, when the
/// caller does not pick one.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// How a dispatch spaces its calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Place calls now, waiting `delay_ms` between consecutive attempts.
    Immediate { delay_ms: u64 },
    /// Place calls back-to-back, asking the gateway to originate attempt `i`
    /// at `base_time + i * interval_ms`. `None` means "now".
    Scheduled {
        base_time: Option<DateTime<Utc>>,
        interval_ms: u64,
    },
}

impl Default for DispatchMode {
    fn default() -> Self {
        Self::Immediate {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl DispatchMode {
    pub fn immediate(delay_ms: u64) -> Self {
        Self::Immediate { delay_ms }
    }

    pub fn scheduled(base_time: Option<DateTime<Utc>>, interval_ms: u64) -> Self {
        Self::Scheduled {
            base_time,
            interval_ms,
        }
    }

    /// Builds a mode from the loose options a form or CLI submits.
    ///
    /// `delay_ms` is the inter-call wait in immediate mode and the stagger
    /// interval in scheduled mode. `schedule_from` is only read when
    /// `use_scheduling` is set.
    pub fn from_options(
        delay_ms: Option<u64>,
        use_scheduling: bool,
        schedule_from: Option<&str>,
    ) -> Result<Self> {
        let delay_ms = delay_ms.unwrap_or(DEFAULT_DELAY_MS);

        if !use_scheduling {
            return Ok(Self::immediate(delay_ms));
        }

        let base_time = match schedule_from.map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_timestamp(value)?),
            _ => None,
        };

        Ok(Self::scheduled(base_time, delay_ms))
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }
}

/// Parses an ISO-8601 timestamp. Values without an offset (as produced by a
/// `datetime-local` input) are read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Aggregated result of one dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BulkDispatchOutcome {
    pub results: Vec<CallResult>,
    pub total_calls: usize,
    pub successful_calls: usize,
    pub failed_calls: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "typescript", ts(optional))]
    pub scheduled_calls: Option<usize>,
}

impl BulkDispatchOutcome {
    /// Derives every count from `results`. `scheduled_calls` is only reported
    /// for scheduled dispatches.
    pub fn from_results(results: Vec<CallResult>, mode: &DispatchMode) -> Self {
        let successful_calls = results.iter().filter(|r| r.is_success()).count();
        let failed_calls = results.iter().filter(|r| r.is_failure()).count();
        let scheduled_calls = mode
            .is_scheduled()
            .then(|| results.iter().filter(|r| r.is_scheduled()).count());

        Self {
            total_calls: results.len(),
            successful_calls,
            failed_calls,
            scheduled_calls,
            results,
        }
    }
}
