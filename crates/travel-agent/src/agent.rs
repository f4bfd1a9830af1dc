use std::sync::Arc;

use travel_agent_core::{Dialogue, DialogueBuilder, DialogueError};
use travel_agent_model::{ModelMessage, ModelProvider};
use travel_agent_openai_model::OpenAIProvider;

use crate::actions::*;
use crate::chat::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::AppConfig;
use crate::providers::{
    DuffelClient, DuffelError, HotelProvider, StubHotelProvider,
};

/// A travel agent builder.
///
/// See [`TravelAgent`].
pub struct TravelAgentBuilder {
    dialogue_builder: DialogueBuilder,
    duffel: Option<Arc<DuffelClient>>,
    hotel_provider: Arc<dyn HotelProvider>,
}

impl TravelAgentBuilder {
    /// Creates a builder with a specified model provider.
    ///
    /// Flights stay disabled until a Duffel client is attached, and hotels
    /// come from [`StubHotelProvider`].
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        Self {
            dialogue_builder: DialogueBuilder::with_model_provider(provider),
            duffel: None,
            hotel_provider: Arc::new(StubHotelProvider),
        }
    }

    /// Sets the client used by the flight actions.
    #[inline]
    pub fn with_duffel(mut self, duffel: DuffelClient) -> Self {
        self.duffel = Some(Arc::new(duffel));
        self
    }

    /// Sets the provider used by the hotel actions.
    #[inline]
    pub fn with_hotel_provider(
        mut self,
        provider: impl HotelProvider + 'static,
    ) -> Self {
        self.hotel_provider = Arc::new(provider);
        self
    }

    /// Sets the system prompt for conversations that don't bring one.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.dialogue_builder =
            self.dialogue_builder.with_system_prompt(prompt);
        self
    }

    /// Sets the turn limit of each run, `None` for no limit.
    #[inline]
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.dialogue_builder = match max_turns {
            Some(max_turns) => self.dialogue_builder.with_max_turns(max_turns),
            None => self.dialogue_builder.without_turn_limit(),
        };
        self
    }

    /// Builds a new agent with all four actions registered.
    pub fn build(self) -> TravelAgent {
        let dialogue = self
            .dialogue_builder
            .with_action(SearchFlightsAction::new(self.duffel.clone()))
            .with_action(BookFlightAction::new(self.duffel))
            .with_action(SearchHotelsAction::new(self.hotel_provider.clone()))
            .with_action(BookHotelAction::new(self.hotel_provider))
            .build();

        TravelAgent { dialogue }
    }
}

/// A travel booking assistant.
///
/// The agent keeps nothing between calls; every [`chat`] carries the whole
/// conversation and the session state, and hands both back updated. It is
/// basically a wrapper around [`Dialogue`].
///
/// [`chat`]: TravelAgent::chat
pub struct TravelAgent {
    dialogue: Dialogue,
}

impl TravelAgent {
    /// Creates an agent talking to an OpenAI-compatible backend, with
    /// flights enabled when the config has Duffel settings.
    pub fn from_config(config: &AppConfig) -> Result<Self, DuffelError> {
        let mut builder = TravelAgentBuilder::with_model_provider(
            OpenAIProvider::new(config.openai.clone()),
        )
        .with_max_turns(config.max_turns);
        match &config.duffel {
            Some(duffel) => {
                let duffel = DuffelClient::new(duffel.clone())?;
                builder = builder.with_duffel(duffel);
            }
            None => warn!("Duffel is not configured, flights are disabled"),
        }
        Ok(builder.build())
    }

    /// Runs one round of conversation.
    ///
    /// # Errors
    ///
    /// Fails only when the model backend fails. Action failures are
    /// handled inside the conversation.
    pub async fn chat(
        &self,
        req: ChatRequest,
    ) -> Result<ChatResponse, DialogueError> {
        let messages: Vec<ModelMessage> =
            req.messages.into_iter().map(Into::into).collect();
        let state = req.state.unwrap_or_default();

        let outcome = self.dialogue.run(messages, state).await?;
        debug!("chat finished: {:?}", outcome.finish);

        Ok(ChatResponse {
            messages: outcome
                .messages
                .iter()
                .filter_map(ChatMessage::from_model)
                .collect(),
            state: outcome.state,
        })
    }

    /// Returns the underlying dialogue.
    #[inline]
    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }
}
