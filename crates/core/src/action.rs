//! Actions the model can invoke, their catalog, and the dispatch table.

mod catalog;
mod dispatch;
mod error;
mod name;
mod object;
pub mod params;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::session::SessionState;
pub use catalog::{ActionDeclaration, list_actions};
pub use dispatch::DispatchTable;
pub use error::{Error, ErrorKind};
pub use name::{ActionName, UnknownActionName};
pub(crate) use object::{ActionObject, ActionObjectImpl};

/// The result of executing an action.
///
/// `Ok` carries the success payload. `Err` is turned into an
/// `{"error": <reason>}` payload before it reaches the model.
pub type ActionResult = Result<Value, Error>;

/// A handler for one of the actions in the catalog.
///
/// Handlers receive arguments that have already been deserialized into
/// [`Action::Input`]; arguments that don't fit are rejected with an
/// [`ErrorKind::InvalidInput`] error without calling the handler.
///
/// The session state is lent to the handler for the duration of the call,
/// so it can leave breadcrumbs (such as the last offer request id) for
/// later turns.
pub trait Action: Send + Sync + 'static {
    /// The type of input that the action accepts.
    type Input: DeserializeOwned + Send;

    /// Returns the catalog entry this handler implements.
    fn name(&self) -> ActionName;

    /// Executes the action with the given input.
    ///
    /// Failures must be reported through the returned [`ActionResult`].
    fn execute<'a>(
        &'a self,
        input: Self::Input,
        state: &'a mut SessionState,
    ) -> impl Future<Output = ActionResult> + Send + 'a;
}
