pub mod drop;
mod handler;
pub mod keymap;

pub use handler::{InputOutcome, handle_input_event};
pub use keymap::KeymapPreset;
