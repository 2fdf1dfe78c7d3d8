use serde::{Deserialize, Serialize};

use crate::{request::RequestParams, types::JsonRpcVersion};

/// A JSON-RPC notification: a request with no `id`, so it gets no response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
}

impl JsonRpcNotification {
    pub fn new(method: String, params: Option<RequestParams>) -> Self {
        Self {
            version: Default::default(),
            method,
            params,
        }
    }

    pub fn get_param(&self, name: &str) -> Option<&serde_json::Value> {
        self.params.as_ref()?.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::to_string;

    #[test]
    fn has_no_id_field() {
        let n = JsonRpcNotification::new("initialized".to_string(), None);
        let text = to_string(&n).unwrap();
        assert!(!text.contains("\"id\""));
        assert!(text.contains("\"jsonrpc\":\"2.0\""));
    }
}
