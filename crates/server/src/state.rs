use dialer_core::DEFAULT_DELAY_MS;
use dispatcher::Dispatcher;
use gateway::{CallGateway, GatewaySettings};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared by all handlers. Holds nothing mutable: each dispatch request runs
/// on its own with a clone of the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn CallGateway>,
    pub dispatcher: Dispatcher,
    pub default_delay_ms: u64,
    pub app_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(settings: &GatewaySettings) -> Self {
        Self::with_gateway(Arc::new(settings.client()), settings.phone_number_id.clone())
    }

    pub fn with_gateway(gateway: Arc<dyn CallGateway>, phone_number_id: Option<String>) -> Self {
        Self {
            dispatcher: Dispatcher::new(gateway.clone(), phone_number_id),
            gateway,
            default_delay_ms: DEFAULT_DELAY_MS,
            app_dir: None,
        }
    }

    pub fn with_default_delay(mut self, delay_ms: u64) -> Self {
        self.default_delay_ms = delay_ms;
        self
    }

    pub fn with_app_dir(mut self, app_dir: PathBuf) -> Self {
        self.app_dir = Some(app_dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::VapiClient;

    fn state() -> AppState {
        AppState::with_gateway(
            Arc::new(VapiClient::new("http://127.0.0.1:1", "test-key")),
            Some("pn-test".to_string()),
        )
    }

    #[test]
    fn test_default_delay_is_two_seconds() {
        assert_eq!(state().default_delay_ms, 2000);
    }

    #[test]
    fn test_with_default_delay_overrides() {
        let state = state().with_default_delay(750);
        assert_eq!(state.default_delay_ms, 750);
        assert!(state.app_dir.is_none());
    }
}
