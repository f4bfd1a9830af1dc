use std::fmt::{self, Display};
use std::str::FromStr;

/// The closed set of actions the model may invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionName {
    /// Search flights with the flight provider.
    SearchFlights,
    /// Book a flight offer.
    BookFlight,
    /// Search hotels with the hotel provider.
    SearchHotels,
    /// Book a hotel offer.
    BookHotel,
}

impl ActionName {
    /// All actions, in catalog order.
    pub const ALL: [ActionName; 4] = [
        ActionName::SearchFlights,
        ActionName::BookFlight,
        ActionName::SearchHotels,
        ActionName::BookHotel,
    ];

    /// Returns the wire name of the action.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::SearchFlights => "search_flights",
            ActionName::BookFlight => "book_flight",
            ActionName::SearchHotels => "search_hotels",
            ActionName::BookHotel => "book_hotel",
        }
    }
}

impl Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a name outside the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownActionName;

impl FromStr for ActionName {
    type Err = UnknownActionName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or(UnknownActionName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for name in ActionName::ALL {
            assert_eq!(name.as_str().parse::<ActionName>(), Ok(name));
        }
        assert_eq!(
            "cancel_flight".parse::<ActionName>(),
            Err(UnknownActionName)
        );
        assert_eq!(
            "Search_Flights".parse::<ActionName>(),
            Err(UnknownActionName)
        );
    }
}
