mod core;
mod effects;
mod event_bus;
mod event_loop;
mod events;
mod state;
pub(crate) mod terminal_session;
mod view_ops;


pub use core::{App, RenderSubsystem, Services};
pub use events::LoopControl;
pub use state::{AppState, ENVIRONMENT_ENV, Mode, Session, StatusState};
