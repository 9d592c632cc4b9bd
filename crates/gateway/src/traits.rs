use async_trait::async_trait;
use dialer_core::Assistant;

use crate::error::Result;
use crate::types::{CallResponse, CreateCallRequest};

/// The upstream voice-calling API.
#[async_trait]
pub trait CallGateway: Send + Sync {
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    async fn create_call(&self, request: &CreateCallRequest) -> Result<CallResponse>;
}
