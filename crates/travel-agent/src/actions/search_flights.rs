use std::sync::Arc;

use serde_json::{Value, json};
use travel_agent_core::action::Error as ActionError;
use travel_agent_core::action::params::SearchFlightsParams;
use travel_agent_core::{Action, ActionName, ActionResult, SessionState};

use super::{OFFER_LIST_LIMIT, duffel_not_configured, provider_failure};
use crate::providers::DuffelClient;

/// Searches flights through Duffel.
///
/// Remembers the offer request id in
/// [`SessionState::last_offer_request_id`].
#[derive(Clone, Debug)]
pub struct SearchFlightsAction {
    duffel: Option<Arc<DuffelClient>>,
}

impl SearchFlightsAction {
    /// Creates the action. Without a client every call reports that
    /// flights are not configured.
    #[inline]
    pub fn new(duffel: Option<Arc<DuffelClient>>) -> Self {
        Self { duffel }
    }
}

impl Action for SearchFlightsAction {
    type Input = SearchFlightsParams;

    fn name(&self) -> ActionName {
        ActionName::SearchFlights
    }

    fn execute<'a>(
        &'a self,
        input: SearchFlightsParams,
        state: &'a mut SessionState,
    ) -> impl Future<Output = ActionResult> + Send + 'a {
        async move {
            let Some(duffel) = &self.duffel else {
                return Err(duffel_not_configured());
            };

            let offer_request = duffel
                .create_offer_request(
                    &input.slices,
                    &input.passengers,
                    input.cabin_class,
                    input.max_connections,
                )
                .await
                .map_err(provider_failure)?;
            let Some(id) = offer_request.get("id").and_then(Value::as_str)
            else {
                return Err(ActionError::execution_error()
                    .with_reason("Duffel returned an offer request without id"));
            };
            let id = id.to_owned();

            let mut offers = offer_request
                .get("offers")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if offers.is_empty() {
                debug!("no embedded offers, listing offers of {id}");
                offers = duffel
                    .list_offers(&id, OFFER_LIST_LIMIT)
                    .await
                    .map_err(provider_failure)?;
            }

            state.last_offer_request_id = Some(id.clone());
            Ok(json!({ "offer_request_id": id, "offers": offers }))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use travel_agent_core::action::ErrorKind;

    use super::*;
    use crate::providers::DuffelConfigBuilder;

    fn params() -> SearchFlightsParams {
        serde_json::from_value(json!({
            "slices": [{
                "origin": "SFO",
                "destination": "LHR",
                "departure_date": "2024-06-01"
            }],
            "passengers": [{ "type": "adult" }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_not_configured() {
        let action = SearchFlightsAction::new(None);
        let mut state = SessionState::default();
        let err = action.execute(params(), &mut state).await.unwrap_err();
        assert_eq!(
            err.to_payload(),
            json!({ "error": "Duffel not configured." })
        );
        assert_eq!(state, SessionState::default());
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_state() {
        let config = DuffelConfigBuilder::with_access_token("x")
            .with_base_url("http://127.0.0.1:9")
            .build();
        let duffel = DuffelClient::new(config).unwrap();
        let action = SearchFlightsAction::new(Some(Arc::new(duffel)));
        let mut state = SessionState::default();
        let err = action.execute(params(), &mut state).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExecutionError);
        assert!(err.reason().starts_with("Duffel request failed"));
        assert_eq!(state.last_offer_request_id, None);
    }
}
