//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use travel_agent_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelRequest, ModelTurn,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the conversation script, which
/// is how the model should respond to a request. The step is selected by the
/// number of assistant messages already in the request, so the first request
/// of a dialogue gets step 0, the request after the first tool round gets
/// step 1, and so on. If there are no enough steps in the script, an error
/// will be returned.
///
/// Every request is recorded and can be inspected with [`requests`].
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
///
/// [`requests`]: TestModelProvider::requests
#[derive(Clone, Default)]
pub struct TestModelProvider {
    conversation_script: Vec<PresetResponse>,
    repeat_last_step: bool,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_assistant_response_step(&mut self, preset: PresetResponse) {
        self.conversation_script.push(preset);
    }

    /// Keeps answering with the last step once the script runs out.
    #[inline]
    pub fn repeat_last_step(&mut self) {
        self.repeat_last_step = true;
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far, in order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn respond(&self, req: &ModelRequest) -> Result<ModelTurn, Error> {
        let step_idx = assistant_turns(req);
        let attempts = {
            let Ok(mut requests) = self.requests.lock() else {
                return Err(Error {
                    message: "request log is poisoned",
                    kind: ErrorKind::Other,
                });
            };
            requests.push(req.clone());
            requests
                .iter()
                .filter(|r| assistant_turns(r) == step_idx)
                .count() as u64
        };

        let step = match self.conversation_script.get(step_idx) {
            Some(step) => step,
            None if self.repeat_last_step => {
                match self.conversation_script.last() {
                    Some(step) => step,
                    None => {
                        return Err(Error {
                            message: "no enough steps",
                            kind: ErrorKind::RateLimitExceeded,
                        });
                    }
                }
            }
            None => {
                return Err(Error {
                    message: "no enough steps",
                    kind: ErrorKind::RateLimitExceeded,
                });
            }
        };

        if let Some(failures) = step.failures {
            if failures == 0 || attempts <= failures {
                return Err(Error {
                    message: "preset failure",
                    kind: ErrorKind::Other,
                });
            }
        }

        let mut content: Option<String> = None;
        let mut tool_calls = vec![];
        for event in &step.events {
            match event {
                PresetEvent::MessageDelta(delta) => {
                    content.get_or_insert_default().push_str(delta);
                }
                PresetEvent::ToolCall(req) => tool_calls.push(req.clone()),
            }
        }
        let finish_reason = if tool_calls.is_empty() {
            ModelFinishReason::Stop
        } else {
            ModelFinishReason::ToolCalls
        };
        Ok(ModelTurn {
            content,
            tool_calls,
            finish_reason: Some(finish_reason),
        })
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelTurn, Self::Error>> + Send + 'static
    {
        let result = self.respond(req);
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        async move {
            sleep(delay).await;
            result
        }
    }
}

#[inline]
fn assistant_turns(req: &ModelRequest) -> usize {
    req.messages
        .iter()
        .filter(|msg| matches!(msg, ModelMessage::Assistant(_)))
        .count()
}
