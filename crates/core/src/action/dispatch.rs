use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde_json::{Map, Value};
use travel_agent_model::ToolCallRequest;

use super::{ActionName, ActionObject, Error};
use crate::session::SessionState;

/// A table that binds action names to handlers.
///
/// The table is built once and can serve any number of dialogue runs.
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<ActionName, Box<dyn ActionObject>>,
}

impl DispatchTable {
    pub(crate) fn with_actions(actions: Vec<Box<dyn ActionObject>>) -> Self {
        let mut handlers = HashMap::with_capacity(actions.len());
        for action in actions {
            let name = action.name();
            if handlers.insert(name, action).is_some() {
                warn!("handler for {name} registered twice, keeping the last");
            }
        }
        Self { handlers }
    }

    /// Returns `true` if a handler is registered for `name`.
    #[inline]
    pub fn is_implemented(&self, name: &str) -> bool {
        self.get_handler(name).is_some()
    }

    pub(crate) fn get_handler(&self, name: &str) -> Option<&dyn ActionObject> {
        let name = name.parse::<ActionName>().ok()?;
        self.handlers.get(&name).map(|handler| handler.as_ref())
    }

    /// Executes one tool call and returns the payload to report back.
    ///
    /// This never fails: unknown actions, invalid arguments, handler
    /// errors and handler panics all become `{"error": ...}` payloads.
    pub(crate) async fn dispatch(
        &self,
        req: &ToolCallRequest,
        state: &mut SessionState,
    ) -> Value {
        let Some(handler) = self.get_handler(&req.name) else {
            warn!("tool not found: {}", req.name);
            return Error::not_implemented(&req.name).to_payload();
        };

        let arguments = parse_arguments(&req.arguments);
        trace!("running a tool ({}) with args: {arguments:?}", req.id);
        let fut = handler.execute(arguments, state);
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(payload)) => payload,
            Ok(Err(err)) => {
                debug!("tool {} ({}) failed: {err}", req.name, req.id);
                err.to_payload()
            }
            Err(_) => {
                error!("tool {} ({}) panicked", req.name, req.id);
                Error::execution_error()
                    .with_reason(format!(
                        "Tool failed unexpectedly: {}",
                        req.name
                    ))
                    .to_payload()
            }
        }
    }
}

/// Parses the raw argument text, falling back to an empty object.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!("malformed tool arguments ({err}), using empty arguments");
            Value::Object(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::action::{Action, ActionObjectImpl, ActionResult};

    #[derive(Deserialize)]
    struct EchoInput {
        city: String,
    }

    struct EchoHotels;

    impl Action for EchoHotels {
        type Input = EchoInput;

        fn name(&self) -> ActionName {
            ActionName::SearchHotels
        }

        fn execute<'a>(
            &'a self,
            input: EchoInput,
            state: &'a mut SessionState,
        ) -> impl Future<Output = ActionResult> + Send + 'a {
            async move {
                state.extra.insert("searched".to_owned(), json!(input.city));
                Ok(json!({ "city": input.city }))
            }
        }
    }

    struct Panicking;

    impl Action for Panicking {
        type Input = Value;

        fn name(&self) -> ActionName {
            ActionName::BookHotel
        }

        #[allow(clippy::manual_async_fn)]
        fn execute<'a>(
            &'a self,
            input: Value,
            _state: &'a mut SessionState,
        ) -> impl Future<Output = ActionResult> + Send + 'a {
            async move {
                if input.get("boom").is_some() {
                    panic!("provider exploded");
                }
                Ok(Value::Null)
            }
        }
    }

    fn call(name: &str, arguments: &str) -> ToolCallRequest {
        ToolCallRequest {
            id: "call_1".to_owned(),
            name: name.to_owned(),
            arguments: arguments.to_owned(),
        }
    }

    fn table() -> DispatchTable {
        DispatchTable::with_actions(vec![
            Box::new(ActionObjectImpl(EchoHotels)),
            Box::new(ActionObjectImpl(Panicking)),
        ])
    }

    #[test]
    fn test_get_handler() {
        let table = table();
        assert!(table.is_implemented("search_hotels"));
        // In the catalog, but nothing registered for it.
        assert!(!table.is_implemented("search_flights"));
        assert!(!table.is_implemented("cancel_trip"));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(parse_arguments(""), json!({}));
        assert_eq!(parse_arguments("{\"city\": "), json!({}));
        assert_eq!(
            parse_arguments(r#"{"city":"Rome"}"#),
            json!({ "city": "Rome" })
        );
    }

    #[tokio::test]
    async fn test_dispatch() {
        let table = table();
        let mut state = SessionState::default();

        let req = call("search_hotels", r#"{"city":"Rome"}"#);
        let payload = table.dispatch(&req, &mut state).await;
        assert_eq!(payload, json!({ "city": "Rome" }));
        assert_eq!(state.extra["searched"], "Rome");

        let payload = table
            .dispatch(&call("search_flights", "{}"), &mut state)
            .await;
        assert_eq!(
            payload,
            json!({ "error": "Tool not implemented: search_flights" })
        );

        let req = call("search_hotels", "not json");
        let payload = table.dispatch(&req, &mut state).await;
        let reason = payload["error"].as_str().unwrap();
        assert!(reason.contains("missing field `city`"), "{reason}");
    }

    #[tokio::test]
    async fn test_dispatch_catches_panics() {
        let table = table();
        let mut state = SessionState::default();
        let req = call("book_hotel", r#"{"boom":true}"#);
        let payload = table.dispatch(&req, &mut state).await;
        assert_eq!(
            payload,
            json!({ "error": "Tool failed unexpectedly: book_hotel" })
        );
    }
}
