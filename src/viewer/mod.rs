mod controller;
mod state;

pub use controller::{ControlView, PaginationView, ViewerController, ViewerView};
pub use state::{PageCursor, ViewerState};
