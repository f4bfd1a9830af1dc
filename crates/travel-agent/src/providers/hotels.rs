//! Hotel inventory providers.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use async_trait::async_trait;
use serde_json::{Map, Value};
use travel_agent_core::records::{HotelBooking, HotelOffer, Money};

/// Error type for [`HotelProvider`]s.
#[derive(Debug)]
pub struct HotelError {
    message: String,
}

impl HotelError {
    /// Creates an error with the given message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for HotelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for HotelError {}

/// A source of bookable hotel offers.
#[async_trait]
pub trait HotelProvider: Send + Sync {
    /// Searches offers in `city` for the given stay.
    async fn search(
        &self,
        city: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<Vec<HotelOffer>, HotelError>;

    /// Books an offer returned by [`search`](HotelProvider::search).
    async fn book(
        &self,
        offer_id: &str,
        traveler: &Map<String, Value>,
        payment: &Map<String, Value>,
    ) -> Result<HotelBooking, HotelError>;
}

/// A provider that answers every search with one demo hotel and confirms
/// every booking without contacting anyone.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubHotelProvider;

impl StubHotelProvider {
    const NAME: &str = "stub";
}

#[async_trait]
impl HotelProvider for StubHotelProvider {
    async fn search(
        &self,
        city: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<Vec<HotelOffer>, HotelError> {
        Ok(vec![HotelOffer {
            provider: Self::NAME.to_owned(),
            hotel_name: "Demo Hotel".to_owned(),
            city: city.to_owned(),
            check_in: check_in.to_owned(),
            check_out: check_out.to_owned(),
            guests,
            total_price: Money {
                amount: "199.00".to_owned(),
                currency: "USD".to_owned(),
            },
            offer_id: "stub_offer_123".to_owned(),
            refundable: false,
        }])
    }

    async fn book(
        &self,
        offer_id: &str,
        traveler: &Map<String, Value>,
        _payment: &Map<String, Value>,
    ) -> Result<HotelBooking, HotelError> {
        Ok(HotelBooking {
            provider: Self::NAME.to_owned(),
            status: "CONFIRMED".to_owned(),
            offer_id: offer_id.to_owned(),
            confirmation_number: "STUB-ABC123".to_owned(),
            traveler: traveler.clone(),
            note: Some(
                "This is a stub booking. Plug in a real hotel provider to \
                 make real reservations."
                    .to_owned(),
            ),
        })
    }
}
