use chrono::{DateTime, Utc};
use dialer_core::{CallRequest, CallStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub number: String,
    pub number_e164_check_enabled: bool,
}

/// Asks the gateway to hold a call until `earliest_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePlan {
    pub earliest_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    pub assistant_id: String,
    pub customer: Customer,
    pub phone_number_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_plan: Option<SchedulePlan>,
}

impl CreateCallRequest {
    /// Numbers go out exactly as given; the gateway's E.164 check stays off.
    pub fn new(call: &CallRequest, phone_number_id: impl Into<String>) -> Self {
        Self {
            assistant_id: call.assistant_id.clone(),
            customer: Customer {
                number: call.destination_number.clone(),
                number_e164_check_enabled: false,
            },
            phone_number_id: phone_number_id.into(),
            schedule_plan: call
                .scheduled_at
                .map(|earliest_at| SchedulePlan { earliest_at }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub schedule_plan: Option<SchedulePlan>,
}

impl CallResponse {
    pub fn call_status(&self) -> Option<CallStatus> {
        self.status.as_deref().and_then(CallStatus::parse)
    }

    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.schedule_plan.as_ref().map(|plan| plan.earliest_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_call_request_body() {
        let call = CallRequest::new("asst-1", "+15550001");
        let body = serde_json::to_value(CreateCallRequest::new(&call, "pn-1")).unwrap();

        assert_eq!(
            body,
            json!({
                "assistantId": "asst-1",
                "customer": { "number": "+15550001", "numberE164CheckEnabled": false },
                "phoneNumberId": "pn-1"
            })
        );
    }

    #[test]
    fn test_create_call_request_with_schedule() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let call = CallRequest::new("asst-1", "+15550001").scheduled_at(at);
        let body = serde_json::to_value(CreateCallRequest::new(&call, "pn-1")).unwrap();

        assert_eq!(body["schedulePlan"]["earliestAt"], "2030-01-01T12:00:00Z");
    }

    #[test]
    fn test_call_response_ignores_extra_fields() {
        let response: CallResponse = serde_json::from_value(json!({
            "id": "call-1",
            "assistantId": "asst-1",
            "type": "outboundPhoneCall",
            "status": "scheduled",
            "cost": 0,
            "schedulePlan": { "earliestAt": "2030-01-01T12:00:00Z" }
        }))
        .unwrap();

        assert_eq!(response.call_status(), Some(CallStatus::Scheduled));
        assert_eq!(
            response.scheduled_for(),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_call_response_unknown_status() {
        let response: CallResponse =
            serde_json::from_value(json!({ "id": "call-1", "status": "warming-up" })).unwrap();
        assert_eq!(response.call_status(), None);
    }
}
