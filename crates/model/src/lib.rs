//! An abstraction layer for the model backend that drives the dialogue.
//!
//! This crate establishes the protocol between the dialogue loop and any
//! tool-calling model service: the messages that are sent, the action
//! declarations the model may choose from, and the single assistant turn
//! that comes back.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
