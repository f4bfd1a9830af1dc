//! An out-of-the-box travel booking agent that assembles the actions and
//! model providers.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to bring the agent into your own service.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod actions;
mod agent;
pub mod chat;
pub mod config;
pub mod providers;

pub use agent::{TravelAgent, TravelAgentBuilder};
pub use chat::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
pub use config::AppConfig;

/// Re-exports of [`travel_agent_core`] crate.
pub mod core {
    pub use travel_agent_core::*;
}
