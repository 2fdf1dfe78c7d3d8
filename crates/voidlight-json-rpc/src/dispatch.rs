use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::JsonRpcError,
    notification::JsonRpcNotification,
    request::{JsonRpcRequest, RequestParams},
    response::{JsonRpcMessage, JsonRpcResponse},
};

/// Trait for handling a single JSON-RPC method call.
///
/// Handlers return domain errors; the dispatcher owns the conversion to
/// protocol-level `JsonRpcError` via [`ToJsonRpcError`].
#[async_trait]
pub trait JsonRpcHandler: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn handle(&self, method: &str, params: Option<RequestParams>) -> Result<Value, Self::Error>;

    fn supported_methods(&self) -> Vec<String> {
        vec![]
    }
}

/// Trait for domain errors that know how to render themselves as a
/// JSON-RPC error object (preserving their `kind` as diagnostic `data`).
pub trait ToJsonRpcError: std::error::Error + Send + Sync + 'static {
    fn to_error_object(&self) -> crate::error::JsonRpcErrorObject;
}

/// Method dispatcher: routes by method name to a registered handler, and maps
/// the uninitialized-session and method-not-found cases to their fixed codes.
pub struct JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    handlers: HashMap<String, Arc<dyn JsonRpcHandler<Error = E>>>,
}

impl<E> JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register_method<H>(&mut self, method: impl Into<String>, handler: H)
    where
        H: JsonRpcHandler<Error = E> + 'static,
    {
        self.handlers.insert(method.into(), Arc::new(handler));
    }

    /// Dispatch a request. `initialized` gates every method but `initialize`
    /// behind error `-32002` per the MCP session-lifecycle ordering guarantee.
    pub async fn handle_request(&self, request: JsonRpcRequest, initialized: bool) -> JsonRpcMessage {
        if !initialized && request.method != "initialize" {
            return JsonRpcMessage::Error(JsonRpcError::server_not_initialized(Some(request.id)));
        }

        match self.handlers.get(&request.method) {
            Some(handler) => match handler.handle(&request.method, request.params).await {
                Ok(result) => JsonRpcMessage::Response(JsonRpcResponse::success(request.id, result)),
                Err(domain_error) => {
                    let error_object = domain_error.to_error_object();
                    JsonRpcMessage::Error(JsonRpcError::new(Some(request.id), error_object))
                }
            },
            None => JsonRpcMessage::Error(JsonRpcError::method_not_found(
                Some(request.id),
                &request.method,
            )),
        }
    }

    /// Process a notification. Unknown methods and notification handlers are
    /// both silently ignored — JSON-RPC notifications never get a response.
    pub async fn handle_notification(&self, notification: JsonRpcNotification) {
        if let Some(handler) = self.handlers.get(&notification.method) {
            let _ = handler.handle(&notification.method, notification.params).await;
        }
    }

    pub fn registered_methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

impl<E> Default for JsonRpcDispatcher<E>
where
    E: ToJsonRpcError,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseResult;
    use crate::types::RequestId;
    use serde_json::json;

    #[derive(thiserror::Error, Debug)]
    enum TestError {
        #[error("boom: {0}")]
        Boom(String),
    }

    impl ToJsonRpcError for TestError {
        fn to_error_object(&self) -> crate::error::JsonRpcErrorObject {
            crate::error::JsonRpcErrorObject::internal_error(Some(self.to_string()))
        }
    }

    struct EchoHandler;

    #[async_trait]
    impl JsonRpcHandler for EchoHandler {
        type Error = TestError;

        async fn handle(
            &self,
            method: &str,
            _params: Option<RequestParams>,
        ) -> Result<Value, Self::Error> {
            match method {
                "echo" => Ok(json!("pong")),
                "explode" => Err(TestError::Boom("nope".into())),
                other => unreachable!("{other}"),
            }
        }
    }

    #[tokio::test]
    async fn unknown_method_is_minus_32601() {
        let dispatcher: JsonRpcDispatcher<TestError> = JsonRpcDispatcher::new();
        let req = JsonRpcRequest::new(RequestId::Number(1), "foo/bar".into(), None);
        let msg = dispatcher.handle_request(req, true).await;
        match msg {
            JsonRpcMessage::Error(e) => assert_eq!(e.error.code, -32601),
            _ => panic!("expected error"),
        }
    }

    #[tokio::test]
    async fn uninitialized_session_rejects_everything_but_initialize() {
        let mut dispatcher: JsonRpcDispatcher<TestError> = JsonRpcDispatcher::new();
        dispatcher.register_method("echo", EchoHandler);
        let req = JsonRpcRequest::new(RequestId::Number(1), "echo".into(), None);
        let msg = dispatcher.handle_request(req, false).await;
        match msg {
            JsonRpcMessage::Error(e) => assert_eq!(e.error.code, -32002),
            _ => panic!("expected error"),
        }
    }

    #[tokio::test]
    async fn registered_handler_runs() {
        let mut dispatcher: JsonRpcDispatcher<TestError> = JsonRpcDispatcher::new();
        dispatcher.register_method("echo", EchoHandler);
        let req = JsonRpcRequest::new(RequestId::Number(2), "echo".into(), None);
        let msg = dispatcher.handle_request(req, true).await;
        match msg {
            JsonRpcMessage::Response(r) => {
                assert!(matches!(r.result, ResponseResult::Success(v) if v == json!("pong")))
            }
            _ => panic!("expected success"),
        }
    }
}
