use std::sync::Arc;

use chrono::{DateTime, Utc};
use dialer_core::{CallRequest, CallResult};
use gateway::{CallGateway, CreateCallRequest};
use tracing::warn;

/// Places one call and folds whatever happens into a [`CallResult`].
#[derive(Clone)]
pub struct CallInvoker {
    gateway: Arc<dyn CallGateway>,
}

impl CallInvoker {
    pub fn new(gateway: Arc<dyn CallGateway>) -> Self {
        Self { gateway }
    }

    /// Never fails: transport errors, non-2xx responses and undecodable
    /// bodies all come back as a failed result with no call id.
    pub async fn invoke(
        &self,
        assistant_id: &str,
        destination_number: &str,
        source_number_id: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> CallResult {
        let mut call = CallRequest::new(assistant_id, destination_number);
        call.scheduled_at = scheduled_at;

        let request = CreateCallRequest::new(&call, source_number_id);

        match self.gateway.create_call(&request).await {
            Ok(response) => CallResult::success(
                destination_number,
                response.id.clone(),
                response.call_status(),
                response.scheduled_for(),
            ),
            Err(e) => {
                warn!(number = %destination_number, error = %e, "Call failed");
                CallResult::failure(destination_number, e.to_string())
            }
        }
    }
}
