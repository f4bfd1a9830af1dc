use std::sync::Arc;

use serde_json::json;
use travel_agent_core::action::params::SearchHotelsParams;
use travel_agent_core::{Action, ActionName, ActionResult, SessionState};

use super::provider_failure;
use crate::providers::HotelProvider;

/// Searches hotels with a [`HotelProvider`].
///
/// Remembers the results in [`SessionState::last_hotel_results`].
#[derive(Clone)]
pub struct SearchHotelsAction {
    provider: Arc<dyn HotelProvider>,
}

impl SearchHotelsAction {
    /// Creates the action on top of the given provider.
    #[inline]
    pub fn new(provider: Arc<dyn HotelProvider>) -> Self {
        Self { provider }
    }
}

impl Action for SearchHotelsAction {
    type Input = SearchHotelsParams;

    fn name(&self) -> ActionName {
        ActionName::SearchHotels
    }

    fn execute<'a>(
        &'a self,
        input: SearchHotelsParams,
        state: &'a mut SessionState,
    ) -> impl Future<Output = ActionResult> + Send + 'a {
        async move {
            let hotels = self
                .provider
                .search(
                    &input.city,
                    &input.check_in,
                    &input.check_out,
                    input.guests(),
                )
                .await
                .map_err(provider_failure)?;
            let result = json!({ "hotels": hotels });
            state.last_hotel_results = Some(hotels);
            Ok(result)
        }
    }
}
