use tracing::warn;

use crate::client::{VapiClient, DEFAULT_BASE_URL};

pub const API_KEY_VAR: &str = "VAPI_PRIVATE_KEY";
pub const PHONE_NUMBER_ID_VAR: &str = "VAPI_PHONE_NUMBER_ID";
pub const BASE_URL_VAR: &str = "VAPI_BASE_URL";

/// Server-held gateway credentials. Never sent to dashboard clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Gateway id of the number calls are placed from.
    pub phone_number_id: Option<String>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            phone_number_id: None,
        }
    }
}

impl GatewaySettings {
    pub fn from_env() -> Self {
        Self::from_env_or(None)
    }

    /// Reads the environment, using `fallback_base_url` instead of the public
    /// gateway when `VAPI_BASE_URL` is unset or blank.
    pub fn from_env_or(fallback_base_url: Option<&str>) -> Self {
        Self::from_vars_or(|key| std::env::var(key).ok(), fallback_base_url)
    }

    /// Blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_vars_or(lookup, None)
    }

    pub fn from_vars_or(
        lookup: impl Fn(&str) -> Option<String>,
        fallback_base_url: Option<&str>,
    ) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: read(BASE_URL_VAR)
                .or_else(|| fallback_base_url.map(str::to_string))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: read(API_KEY_VAR),
            phone_number_id: read(PHONE_NUMBER_ID_VAR),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn client(&self) -> VapiClient {
        if self.api_key.is_none() {
            warn!("{} not set, gateway requests will be rejected", API_KEY_VAR);
        }
        VapiClient::new(&self.base_url, self.api_key.clone().unwrap_or_default())
    }
}
