use std::sync::Arc;

use serde_json::{Value, json};
use travel_agent_core::action::params::BookFlightParams;
use travel_agent_core::{Action, ActionName, ActionResult, SessionState};

use super::{duffel_not_configured, provider_failure};
use crate::providers::DuffelClient;

/// Books a flight offer through Duffel.
///
/// Remembers the order id in [`SessionState::last_order_id`].
#[derive(Clone, Debug)]
pub struct BookFlightAction {
    duffel: Option<Arc<DuffelClient>>,
}

impl BookFlightAction {
    /// Creates the action. Without a client every call reports that
    /// flights are not configured.
    #[inline]
    pub fn new(duffel: Option<Arc<DuffelClient>>) -> Self {
        Self { duffel }
    }
}

impl Action for BookFlightAction {
    type Input = BookFlightParams;

    fn name(&self) -> ActionName {
        ActionName::BookFlight
    }

    fn execute<'a>(
        &'a self,
        input: BookFlightParams,
        state: &'a mut SessionState,
    ) -> impl Future<Output = ActionResult> + Send + 'a {
        async move {
            let Some(duffel) = &self.duffel else {
                return Err(duffel_not_configured());
            };

            let passengers = input.passengers.unwrap_or_default();
            let order = duffel
                .create_order(&input.offer_id, &passengers, None)
                .await
                .map_err(provider_failure)?;

            state.last_order_id =
                order.get("id").and_then(Value::as_str).map(str::to_owned);
            info!("created order for offer {}", input.offer_id);
            Ok(json!({ "order": order }))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_not_configured() {
        let action = BookFlightAction::new(None);
        let mut state = SessionState::default();
        let params =
            serde_json::from_value(json!({ "offer_id": "off_1" })).unwrap();
        let err = action.execute(params, &mut state).await.unwrap_err();
        assert_eq!(
            err.to_payload(),
            json!({ "error": "Duffel not configured." })
        );
        assert_eq!(state.last_order_id, None);
    }
}
