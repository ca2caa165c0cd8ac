use std::sync::Arc;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl RgbaFrame {
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels_to_vec(&self) -> Vec<u8> {
        self.pixels.as_ref().to_vec()
    }
}

/// Parsed document the viewer pages through. Page indices are 0-based.
pub trait DocumentEngine: Send {
    fn page_count(&self) -> usize;
    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame>;
}
