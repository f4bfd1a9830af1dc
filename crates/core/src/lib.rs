//! Core logic of the travel agent: the action catalog, the dispatch table,
//! session state, and the dialogue loop that ties them to a model.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod action;
pub mod conversation;
mod dialogue;
mod model_client;
pub mod records;
pub mod session;

pub use action::{Action, ActionName, ActionResult, DispatchTable};
pub use dialogue::{
    DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT, Dialogue, DialogueBuilder,
    DialogueError, DialogueOutcome, Finish, TURN_LIMIT_MESSAGE,
};
pub use session::SessionState;
