use std::sync::Arc;

use serde_json::json;
use travel_agent_core::action::params::BookHotelParams;
use travel_agent_core::{Action, ActionName, ActionResult, SessionState};

use super::provider_failure;
use crate::providers::HotelProvider;

/// Books a hotel offer with a [`HotelProvider`].
///
/// Remembers the confirmation in [`SessionState::last_hotel_booking`].
#[derive(Clone)]
pub struct BookHotelAction {
    provider: Arc<dyn HotelProvider>,
}

impl BookHotelAction {
    /// Creates the action on top of the given provider.
    #[inline]
    pub fn new(provider: Arc<dyn HotelProvider>) -> Self {
        Self { provider }
    }
}

impl Action for BookHotelAction {
    type Input = BookHotelParams;

    fn name(&self) -> ActionName {
        ActionName::BookHotel
    }

    fn execute<'a>(
        &'a self,
        input: BookHotelParams,
        state: &'a mut SessionState,
    ) -> impl Future<Output = ActionResult> + Send + 'a {
        async move {
            let booking = self
                .provider
                .book(&input.offer_id, &input.traveler, &input.payment)
                .await
                .map_err(provider_failure)?;
            info!(
                "hotel offer {} booked: {}",
                booking.offer_id, booking.status
            );
            let result = json!({ "booking": booking });
            state.last_hotel_booking = Some(booking);
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use travel_agent_core::records::{HotelBooking, HotelOffer};

    use super::*;
    use crate::providers::{HotelError, StubHotelProvider};

    struct SoldOut;

    #[async_trait]
    impl HotelProvider for SoldOut {
        async fn search(
            &self,
            _city: &str,
            _check_in: &str,
            _check_out: &str,
            _guests: u32,
        ) -> Result<Vec<HotelOffer>, HotelError> {
            Ok(vec![])
        }

        async fn book(
            &self,
            offer_id: &str,
            _traveler: &Map<String, Value>,
            _payment: &Map<String, Value>,
        ) -> Result<HotelBooking, HotelError> {
            Err(HotelError::new(format!("{offer_id} is sold out")))
        }
    }

    fn params() -> BookHotelParams {
        serde_json::from_value(json!({
            "offer_id": "stub_offer_123",
            "traveler": { "name": "Ada Lovelace" },
            "payment": { "card": "tok_visa" }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_book_hotel() {
        let action = BookHotelAction::new(Arc::new(StubHotelProvider));
        let mut state = SessionState::default();
        let result = action.execute(params(), &mut state).await.unwrap();
        assert_eq!(result["booking"]["confirmation_number"], "STUB-ABC123");
        assert_eq!(
            state.last_hotel_booking.unwrap().traveler["name"],
            "Ada Lovelace"
        );
    }

    #[tokio::test]
    async fn test_provider_error() {
        let action = BookHotelAction::new(Arc::new(SoldOut));
        let mut state = SessionState::default();
        let err = action.execute(params(), &mut state).await.unwrap_err();
        assert_eq!(
            err.to_payload(),
            json!({ "error": "stub_offer_123 is sold out" })
        );
        assert_eq!(state.last_hotel_booking, None);
    }
}
