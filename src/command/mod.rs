mod dispatch;
mod types;

pub use dispatch::{CommandDispatchResult, Effect, dispatch};
pub use types::{ActionId, Command, CommandOutcome};
