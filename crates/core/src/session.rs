//! Caller-owned state threaded through one dialogue run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::{HotelBooking, HotelOffer};

/// Side-channel data that actions leave behind for later turns.
///
/// The well-known fields are written by the built-in actions. Any other
/// key a caller sends is kept in [`extra`](SessionState::extra) and handed
/// back untouched, so the serialized form round-trips as a flat JSON
/// object. Writers of the same key overwrite each other.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Id of the most recent flight offer request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_offer_request_id: Option<String>,
    /// Id of the most recently created flight order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order_id: Option<String>,
    /// Offers returned by the most recent hotel search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hotel_results: Option<Vec<HotelOffer>>,
    /// Confirmation of the most recent hotel booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hotel_booking: Option<HotelBooking>,
    /// Keys this crate doesn't know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_keys_round_trip() {
        let input = json!({
            "last_offer_request_id": "orq_1",
            "selected_offer_id": "off_9",
            "ui": { "step": 3 }
        });
        let state: SessionState = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(state.last_offer_request_id.as_deref(), Some("orq_1"));
        assert_eq!(state.extra["selected_offer_id"], "off_9");
        assert_eq!(serde_json::to_value(&state).unwrap(), input);
    }

    #[test]
    fn test_empty_state() {
        let state: SessionState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(state, SessionState::default());
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({}));
    }
}
