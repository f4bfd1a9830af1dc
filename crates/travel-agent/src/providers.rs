//! Clients for the booking backends the actions talk to.

mod duffel;
mod hotels;

pub use duffel::{
    DuffelClient, DuffelConfig, DuffelConfigBuilder, DuffelError,
};
pub use hotels::{HotelError, HotelProvider, StubHotelProvider};
