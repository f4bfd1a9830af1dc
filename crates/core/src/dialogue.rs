mod builder;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use travel_agent_model::{
    AssistantMessage, ErrorKind, ModelMessage, ModelProviderError,
    ModelRequest, ModelTool, ToolCallResult, ToolChoice,
};

use crate::action::{DispatchTable, list_actions};
use crate::conversation::Conversation;
use crate::model_client::ModelClient;
use crate::session::SessionState;
pub use builder::DialogueBuilder;

/// The system message inserted when a conversation doesn't start with one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a travel booking assistant. \
Ask only necessary questions. Use tools for flight/hotel search and booking. \
Never invent prices or confirmations.";

/// The assistant message appended when the turn limit is reached.
pub const TURN_LIMIT_MESSAGE: &str = "I'm sorry, I couldn't finish this \
request within the allowed number of steps. Please try again or rephrase \
your request.";

/// Default maximum number of model calls in one run.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Drives one conversation to a final answer, calling actions as the model
/// requests them.
///
/// A `Dialogue` holds no per-conversation state. The same instance can run
/// any number of conversations, concurrently or not; each [`run`] owns its
/// message list and session state.
///
/// [`run`]: Dialogue::run
pub struct Dialogue {
    model_client: ModelClient,
    dispatch_table: DispatchTable,
    system_prompt: String,
    max_turns: Option<usize>,
}

/// How a dialogue run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finish {
    /// The model answered without calling any action.
    Answered,
    /// The model was still calling actions when the turn limit was hit. The
    /// last message is [`TURN_LIMIT_MESSAGE`].
    TurnLimitReached,
}

/// The result of a completed dialogue run.
#[derive(Clone, Debug)]
pub struct DialogueOutcome {
    /// The full message list, including any inserted system prompt, the
    /// action traffic, and the final assistant message.
    pub messages: Vec<ModelMessage>,
    /// The session state with every action's changes applied.
    pub state: SessionState,
    /// How the run ended.
    pub finish: Finish,
    /// Number of model calls made.
    pub turns: usize,
}

impl DialogueOutcome {
    /// Returns the text of the final assistant message.
    #[inline]
    pub fn reply(&self) -> &str {
        self.messages.last().map(ModelMessage::content).unwrap_or_default()
    }
}

/// The error returned when the model backend fails.
///
/// Action failures never produce this error; they are reported to the
/// model as tool results instead.
#[derive(Debug)]
pub struct DialogueError {
    source: Box<dyn ModelProviderError>,
    turn: usize,
}

impl DialogueError {
    /// Returns the kind of the underlying backend error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// Returns the 1-based number of the model call that failed.
    #[inline]
    pub fn turn(&self) -> usize {
        self.turn
    }
}

impl Display for DialogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model backend failed on turn {}: {}",
            self.turn, self.source
        )
    }
}

impl StdError for DialogueError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

impl Dialogue {
    /// Runs the conversation until the model gives a final answer.
    ///
    /// Each model call sees every earlier message, including the results of
    /// all actions from the previous turn. Actions within one turn run one
    /// after another in the order the model listed them, and every call
    /// gets exactly one tool result message.
    ///
    /// # Errors
    ///
    /// Only a failing model call aborts the run. The messages and state of
    /// the failed run are dropped.
    ///
    /// # Cancel safety
    ///
    /// Dropping the future abandons the run and everything it produced.
    pub async fn run(
        &self,
        messages: Vec<ModelMessage>,
        mut state: SessionState,
    ) -> Result<DialogueOutcome, DialogueError> {
        let mut conversation = Conversation::new(messages);
        if conversation.ensure_system_prompt(&self.system_prompt) {
            debug!("inserted the default system prompt");
        }

        let tools: Vec<ModelTool> =
            list_actions().iter().map(|d| d.to_model_tool()).collect();
        let mut turns = 0;

        loop {
            if self.max_turns.is_some_and(|max| turns >= max) {
                warn!("turn limit ({turns}) reached, stopping the dialogue");
                conversation.push(ModelMessage::assistant(TURN_LIMIT_MESSAGE));
                return Ok(DialogueOutcome {
                    messages: conversation.into_messages(),
                    state,
                    finish: Finish::TurnLimitReached,
                    turns,
                });
            }
            turns += 1;

            let request = ModelRequest {
                messages: conversation.messages().to_vec(),
                tools: tools.clone(),
                tool_choice: ToolChoice::Auto,
            };
            let turn = self
                .model_client
                .send_request(request)
                .await
                .map_err(|source| DialogueError {
                    source,
                    turn: turns,
                })?;

            let content = turn.content.unwrap_or_default();
            if turn.tool_calls.is_empty() {
                debug!("final answer after {turns} turn(s)");
                conversation.push(ModelMessage::assistant(content));
                return Ok(DialogueOutcome {
                    messages: conversation.into_messages(),
                    state,
                    finish: Finish::Answered,
                    turns,
                });
            }

            let calls = turn.tool_calls;
            info!("turn {turns}: running {} action(s)", calls.len());
            conversation.push(ModelMessage::Assistant(AssistantMessage {
                content,
                tool_calls: calls.clone(),
            }));
            for call in &calls {
                let payload =
                    self.dispatch_table.dispatch(call, &mut state).await;
                conversation.push(ModelMessage::Tool(ToolCallResult {
                    id: call.id.clone(),
                    content: payload.to_string(),
                }));
            }
        }
    }

    /// Returns the dispatch table this dialogue uses.
    #[inline]
    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.dispatch_table
    }
}
