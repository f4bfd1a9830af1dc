use travel_agent_model::ModelProvider;

use super::{DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT, Dialogue};
use crate::action::{Action, ActionObject, ActionObjectImpl, DispatchTable};
use crate::model_client::ModelClient;

/// [`Dialogue`] builder.
pub struct DialogueBuilder {
    model_client: ModelClient,
    system_prompt: String,
    max_turns: Option<usize>,
    actions: Vec<Box<dyn ActionObject>>,
}

impl DialogueBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            max_turns: Some(DEFAULT_MAX_TURNS),
            actions: vec![],
        }
    }

    /// Sets the system prompt inserted into conversations that don't start
    /// with a system message.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Limits the number of model calls in one run. `0` removes the limit,
    /// same as [`without_turn_limit`](Self::without_turn_limit).
    #[inline]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = (max_turns > 0).then_some(max_turns);
        self
    }

    /// Removes the turn limit. A model that never stops calling actions
    /// will then keep the run going forever.
    #[inline]
    pub fn without_turn_limit(mut self) -> Self {
        self.max_turns = None;
        self
    }

    /// Registers an action handler. A later handler for the same action
    /// replaces an earlier one.
    #[inline]
    pub fn with_action<A: Action>(mut self, action: A) -> Self {
        self.actions.push(Box::new(ActionObjectImpl(action)));
        self
    }

    /// Builds the dialogue.
    #[inline]
    pub fn build(self) -> Dialogue {
        Dialogue {
            model_client: self.model_client,
            dispatch_table: DispatchTable::with_actions(self.actions),
            system_prompt: self.system_prompt,
            max_turns: self.max_turns,
        }
    }
}
