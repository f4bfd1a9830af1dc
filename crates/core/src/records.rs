//! Provider records that the session state keeps by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An amount of money as returned by providers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount, kept as text to avoid rounding.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A summary of one bookable hotel offer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOffer {
    /// Name of the provider that produced the offer.
    pub provider: String,
    /// Hotel name.
    pub hotel_name: String,
    /// City of the hotel.
    pub city: String,
    /// Check-in date.
    pub check_in: String,
    /// Check-out date.
    pub check_out: String,
    /// Number of guests the offer covers.
    pub guests: u32,
    /// Total price of the stay.
    pub total_price: Money,
    /// Id to pass to `book_hotel`.
    pub offer_id: String,
    /// Whether the booking can be cancelled for a refund.
    pub refundable: bool,
}

/// A hotel booking confirmation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotelBooking {
    /// Name of the provider that made the booking.
    pub provider: String,
    /// Booking status reported by the provider.
    pub status: String,
    /// The booked offer.
    pub offer_id: String,
    /// Confirmation number to show the traveler.
    pub confirmation_number: String,
    /// Traveler details as sent with the booking.
    pub traveler: Map<String, Value>,
    /// Free-form note from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
