use std::pin::Pin;

use serde_json::Value;
use tracing::Instrument;

use super::{Action, ActionName, ActionResult, Error};
use crate::session::SessionState;

pub(crate) type BoxedActionFuture<'a> =
    Pin<Box<dyn Future<Output = ActionResult> + Send + 'a>>;

pub(crate) trait ActionObject: Send + Sync + 'static {
    fn name(&self) -> ActionName;

    fn execute<'a>(
        &'a self,
        arguments: Value,
        state: &'a mut SessionState,
    ) -> BoxedActionFuture<'a>;
}

pub(crate) struct ActionObjectImpl<A: Action>(pub A);

impl<A: Action> ActionObject for ActionObjectImpl<A> {
    #[inline]
    fn name(&self) -> ActionName {
        self.0.name()
    }

    fn execute<'a>(
        &'a self,
        arguments: Value,
        state: &'a mut SessionState,
    ) -> BoxedActionFuture<'a> {
        let input: A::Input = match serde_json::from_value(arguments) {
            Ok(input) => input,
            Err(err) => {
                let reason =
                    format!("Invalid arguments for {}: {err}", self.name());
                return Box::pin(std::future::ready(ActionResult::Err(
                    Error::invalid_input().with_reason(reason),
                )));
            }
        };
        let span = debug_span!("action execute", action = %self.name());
        Box::pin(self.0.execute(input, state).instrument(span))
    }
}
