//! Typed arguments for each action.
//!
//! These types are both the deserialization targets for model-supplied
//! arguments and the source of the parameter schemas in the catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of hotel guests assumed when the model doesn't say.
pub const DEFAULT_HOTEL_GUESTS: u32 = 2;

/// One leg of a journey.
///
/// Fields other than the named ones are passed on to the flight provider
/// as they are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Slice {
    /// IATA airport or city code, e.g. SFO or NYC.
    pub origin: String,
    /// IATA airport or city code, e.g. LHR.
    pub destination: String,
    /// Departure date as YYYY-MM-DD.
    pub departure_date: String,
    /// Other provider fields, such as a departure time window.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Slice {
    /// Creates a slice without extra fields.
    #[inline]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            extra: Map::new(),
        }
    }
}

/// Passenger category used for pricing.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PassengerType {
    /// 18 or older.
    Adult,
    /// 2 to 17.
    Child,
    /// Under 2, travelling on a lap.
    InfantWithoutSeat,
    /// Under 2, with a seat of their own.
    InfantWithSeat,
}

/// A passenger in a flight search, described by either a category or an
/// age.
///
/// Fields other than the named ones are passed on to the flight provider
/// as they are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Passenger {
    /// Passenger category.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub passenger_type: Option<PassengerType>,
    /// Age in years, instead of a category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Given name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Date of birth as YYYY-MM-DD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born_on: Option<String>,
    /// Title such as mr, ms or mrs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Other provider fields, such as loyalty programme accounts.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Passenger {
    /// Creates an anonymous passenger of the given type.
    #[inline]
    pub fn of_type(passenger_type: PassengerType) -> Self {
        Self {
            passenger_type: Some(passenger_type),
            age: None,
            given_name: None,
            family_name: None,
            born_on: None,
            title: None,
            extra: Map::new(),
        }
    }
}

/// Requested cabin.
#[allow(missing_docs)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// Arguments of `search_flights`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchFlightsParams {
    /// Journey legs, one per direction.
    pub slices: Vec<Slice>,
    /// Travelling passengers.
    pub passengers: Vec<Passenger>,
    /// Cabin to search in, any cabin if absent.
    pub cabin_class: Option<CabinClass>,
    /// Maximum number of connections per slice.
    pub max_connections: Option<u32>,
}

/// Arguments of `book_flight`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BookFlightParams {
    /// Id of the offer to book.
    pub offer_id: String,
    /// Full passenger records as required by the airline.
    pub passengers: Option<Vec<Map<String, Value>>>,
}

/// Arguments of `search_hotels`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchHotelsParams {
    /// City name.
    pub city: String,
    /// Check-in date as YYYY-MM-DD.
    pub check_in: String,
    /// Check-out date as YYYY-MM-DD.
    pub check_out: String,
    /// Number of guests, 2 if absent.
    pub guests: Option<u32>,
}

impl SearchHotelsParams {
    /// Returns the number of guests, falling back to
    /// [`DEFAULT_HOTEL_GUESTS`].
    #[inline]
    pub fn guests(&self) -> u32 {
        self.guests.unwrap_or(DEFAULT_HOTEL_GUESTS)
    }
}

/// Arguments of `book_hotel`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BookHotelParams {
    /// Id of the hotel offer to book.
    pub offer_id: String,
    /// Lead traveler details.
    pub traveler: Map<String, Value>,
    /// Payment details.
    pub payment: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_hotel_guests_default() {
        let params: SearchHotelsParams = serde_json::from_value(json!({
            "city": "Paris",
            "check_in": "2024-06-01",
            "check_out": "2024-06-03"
        }))
        .unwrap();
        assert_eq!(params.guests(), 2);

        let params: SearchHotelsParams = serde_json::from_value(json!({
            "city": "Paris",
            "check_in": "2024-06-01",
            "check_out": "2024-06-03",
            "guests": null
        }))
        .unwrap();
        assert_eq!(params.guests(), 2);

        let params: SearchHotelsParams = serde_json::from_value(json!({
            "city": "Paris",
            "check_in": "2024-06-01",
            "check_out": "2024-06-03",
            "guests": 4
        }))
        .unwrap();
        assert_eq!(params.guests(), 4);
    }

    #[test]
    fn test_rejects_missing_and_unknown_fields() {
        let err = serde_json::from_value::<SearchFlightsParams>(json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("slices"));

        let err = serde_json::from_value::<BookFlightParams>(json!({
            "offer_id": "off_1",
            "seat": "12A"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("seat"));
    }

    #[test]
    fn test_passenger_wire_format() {
        let passenger: Passenger =
            serde_json::from_value(json!({ "type": "infant_with_seat" }))
                .unwrap();
        assert_eq!(
            passenger,
            Passenger::of_type(PassengerType::InfantWithSeat)
        );
        assert_eq!(
            serde_json::to_value(Passenger::of_type(PassengerType::Adult))
                .unwrap(),
            json!({ "type": "adult" })
        );

        let passenger: Passenger =
            serde_json::from_value(json!({ "age": 14 })).unwrap();
        assert_eq!(passenger.passenger_type, None);
        assert_eq!(passenger.age, Some(14));
    }

    #[test]
    fn test_unnamed_fields_are_kept() {
        let input = json!({
            "slices": [{
                "origin": "SFO",
                "destination": "LHR",
                "departure_date": "2024-06-01",
                "departure_time": { "from": "09:00", "to": "17:00" }
            }],
            "passengers": [{
                "type": "adult",
                "fare_type": "student",
                "loyalty_programme_accounts": [
                    { "airline_iata_code": "BA", "account_number": "123" }
                ]
            }]
        });
        let params: SearchFlightsParams =
            serde_json::from_value(input.clone()).unwrap();
        assert_eq!(params.slices[0].extra["departure_time"]["from"], "09:00");
        assert_eq!(params.passengers[0].extra["fare_type"], "student");

        let output = serde_json::to_value(&params).unwrap();
        assert_eq!(output["slices"], input["slices"]);
        assert_eq!(output["passengers"], input["passengers"]);
    }
}
