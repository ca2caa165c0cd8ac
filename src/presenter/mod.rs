mod factory;
mod image_ops;
mod ratatui;
mod terminal_cell;
mod traits;

pub use factory::create_presenter;
pub use ratatui::RatatuiImagePresenter;
pub use traits::{ImagePresenter, PresenterCaps, PresenterKind};
