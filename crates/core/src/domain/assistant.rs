use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A voice assistant configured on the gateway.
///
/// Only `id` is typed. Everything else the gateway sends, nulls included,
/// is kept in `extra` so the record can be handed back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assistant {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Assistant {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name")?.as_str()
    }

    /// Name of the language model behind the assistant, if the gateway reports one.
    pub fn model_name(&self) -> Option<&str> {
        self.extra.get("model")?.get("model")?.as_str()
    }

    /// Label for pickers: `name (model)`, falling back to the id and `N/A`.
    pub fn display_label(&self) -> String {
        format!(
            "{} ({})",
            self.name().unwrap_or(&self.id),
            self.model_name().unwrap_or("N/A")
        )
    }
}
