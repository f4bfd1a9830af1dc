//! Handlers for the actions in the catalog.

mod book_flight;
mod book_hotel;
mod search_flights;
mod search_hotels;

use std::fmt::Display;

use travel_agent_core::action::Error as ActionError;

pub use book_flight::BookFlightAction;
pub use book_hotel::BookHotelAction;
pub use search_flights::SearchFlightsAction;
pub use search_hotels::SearchHotelsAction;

/// Number of offers fetched when an offer request comes back without any.
pub const OFFER_LIST_LIMIT: usize = 30;

#[inline]
fn duffel_not_configured() -> ActionError {
    ActionError::execution_error().with_reason("Duffel not configured.")
}

#[inline]
fn provider_failure(err: impl Display) -> ActionError {
    ActionError::execution_error().with_reason(err.to_string())
}
