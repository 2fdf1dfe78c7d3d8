//! Turns one line (or one HTTP body) of JSON text into either a request
//! or a notification, and turns a dispatcher result back into wire bytes.

use serde_json::Value;
use voidlight_json_rpc::{JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest};

#[derive(Debug)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

/// A request has an `id` field (possibly `null`, though the wire
/// protocol here never emits one); a notification omits it entirely.
pub fn parse_incoming(text: &str) -> Result<IncomingMessage, JsonRpcError> {
    let value: Value = serde_json::from_str(text).map_err(|_| JsonRpcError::parse_error())?;
    let Value::Object(ref map) = value else {
        return Err(JsonRpcError::invalid_request(None, "expected a JSON object"));
    };

    if map.contains_key("id") {
        let request: JsonRpcRequest = serde_json::from_value(value)
            .map_err(|e| JsonRpcError::invalid_request(None, &e.to_string()))?;
        Ok(IncomingMessage::Request(request))
    } else {
        let notification: JsonRpcNotification = serde_json::from_value(value)
            .map_err(|e| JsonRpcError::invalid_request(None, &e.to_string()))?;
        Ok(IncomingMessage::Notification(notification))
    }
}

pub fn serialize_message(message: &JsonRpcMessage) -> String {
    serde_json::to_string(message).expect("JsonRpcMessage always serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_request_has_an_id() {
        let text = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        match parse_incoming(text).unwrap() {
            IncomingMessage::Request(req) => assert_eq!(req.method, "tools/list"),
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn a_notification_has_no_id() {
        let text = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        match parse_incoming(text).unwrap() {
            IncomingMessage::Notification(n) => assert_eq!(n.method, "notifications/initialized"),
            _ => panic!("expected a notification"),
        }
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_incoming("not json").unwrap_err();
        assert_eq!(err.error.code, -32700);
    }

    #[test]
    fn a_bare_json_array_is_an_invalid_request() {
        let err = parse_incoming("[1,2,3]").unwrap_err();
        assert_eq!(err.error.code, -32600);
    }
}
