use ratatui::Frame;
use ratatui::layout::Rect;

use crate::backend::RgbaFrame;
use crate::error::AppResult;
use crate::render::cache::RenderedPageKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterKind {
    RatatuiImage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterCaps {
    pub backend_name: &'static str,
    pub cell_px: Option<(u16, u16)>,
    /// Largest render scale worth producing for this graphics protocol.
    pub preferred_max_render_scale: f32,
}

/// Draws the current page image inside the viewer body.
pub trait ImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn status_label(&self) -> String {
        self.capabilities().backend_name.to_string()
    }

    /// Prepares `frame` for drawing into `area`. Re-showing the same key into
    /// the same area is a no-op.
    fn show(&mut self, key: RenderedPageKey, frame: &RgbaFrame, area: Rect) -> AppResult<()>;

    fn clear(&mut self);

    fn current_key(&self) -> Option<RenderedPageKey>;

    /// Returns whether an image was drawn.
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool>;

    fn capabilities(&self) -> PresenterCaps;
}
