use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a call as reported by the gateway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Forwarding,
    Ended,
    Failed,
    Scheduled,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Ringing => "ringing",
            Self::InProgress => "in-progress",
            Self::Forwarding => "forwarding",
            Self::Ended => "ended",
            Self::Failed => "failed",
            Self::Scheduled => "scheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(Self::Queued),
            "ringing" => Some(Self::Ringing),
            "in-progress" => Some(Self::InProgress),
            "forwarding" => Some(Self::Forwarding),
            "ended" => Some(Self::Ended),
            "failed" => Some(Self::Failed),
            "scheduled" => Some(Self::Scheduled),
            _ => None,
        }
    }
}

/// One call to place: which assistant dials which number, and optionally when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub assistant_id: String,
    pub destination_number: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl CallRequest {
    pub fn new(assistant_id: impl Into<String>, destination_number: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            destination_number: destination_number.into(),
            scheduled_at: None,
        }
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }
}

/// Outcome of a single call attempt.
///
/// Exactly one of `call_id` and `error_message` is set. Failed attempts always
/// carry `CallStatus::Failed` and never a call id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CallResult {
    #[serde(rename = "number")]
    pub destination_number: String,
    #[serde(rename = "callId", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "typescript", ts(optional))]
    pub call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "typescript", ts(optional))]
    pub status: Option<CallStatus>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "typescript", ts(optional))]
    pub error_message: Option<String>,
    #[serde(rename = "timestamp")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "scheduledAt", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "typescript", ts(optional))]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl CallResult {
    pub fn success(
        destination_number: impl Into<String>,
        call_id: impl Into<String>,
        status: Option<CallStatus>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            destination_number: destination_number.into(),
            call_id: Some(call_id.into()),
            status,
            error_message: None,
            issued_at: Utc::now(),
            scheduled_for,
        }
    }

    pub fn failure(destination_number: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            destination_number: destination_number.into(),
            call_id: None,
            status: Some(CallStatus::Failed),
            error_message: Some(error.into()),
            issued_at: Utc::now(),
            scheduled_for: None,
        }
    }

    /// A call id came back and nothing went wrong.
    pub fn is_success(&self) -> bool {
        self.call_id.is_some() && self.error_message.is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == Some(CallStatus::Scheduled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_status_round_trips_through_str() {
        for status in [
            CallStatus::Queued,
            CallStatus::Ringing,
            CallStatus::InProgress,
            CallStatus::Forwarding,
            CallStatus::Ended,
            CallStatus::Failed,
            CallStatus::Scheduled,
        ] {
            assert_eq!(CallStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CallStatus::parse("busy"), None);
    }

    #[test]
    fn test_call_status_serializes_kebab_case() {
        let value = serde_json::to_value(CallStatus::InProgress).unwrap();
        assert_eq!(value, json!("in-progress"));
    }

    #[test]
    fn test_success_result() {
        let result = CallResult::success("+15550001", "call-1", Some(CallStatus::Queued), None);

        assert!(result.is_success());
        assert!(!result.is_failure());
        assert!(!result.is_scheduled());
        assert_eq!(result.call_id.as_deref(), Some("call-1"));
    }

    #[test]
    fn test_failure_result_has_no_call_id() {
        let result = CallResult::failure("+15550001", "API error: 500 - boom");

        assert!(result.is_failure());
        assert!(!result.is_success());
        assert!(result.call_id.is_none());
        assert_eq!(result.status, Some(CallStatus::Failed));
    }

    #[test]
    fn test_result_wire_names() {
        let result = CallResult::failure("+15550001", "nope");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["number"], "+15550001");
        assert_eq!(value["error"], "nope");
        assert_eq!(value["status"], "failed");
        assert!(value["timestamp"].is_string());
        assert!(value.get("callId").is_none());
        assert!(value.get("scheduledAt").is_none());
    }

    #[test]
    fn test_call_request_builder() {
        let at = Utc::now();
        let request = CallRequest::new("asst-1", "+15550001").scheduled_at(at);

        assert_eq!(request.assistant_id, "asst-1");
        assert_eq!(request.scheduled_at, Some(at));
    }
}
