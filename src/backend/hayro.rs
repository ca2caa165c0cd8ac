use std::sync::Arc;

use hayro::hayro_interpret::InterpreterSettings;
use hayro::hayro_syntax::Pdf;
use hayro::vello_cpu::color::palette::css::WHITE;
use hayro::{RenderSettings, render};

use crate::error::{AppError, AppResult};

use super::traits::{DocumentEngine, RgbaFrame};

pub const PDF_HEADER: &[u8] = b"%PDF-";

pub struct PdfDoc {
    pdf: Pdf,
}

impl DocumentEngine for PdfDoc {
    fn page_count(&self) -> usize {
        PdfDoc::page_count(self)
    }

    fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        PdfDoc::render_page(self, page, scale)
    }
}

impl PdfDoc {
    /// Parses `bytes` fetched from `address`.
    pub fn open_with_shared_bytes(address: &str, bytes: Arc<Vec<u8>>) -> AppResult<Self> {
        if !bytes.as_slice().starts_with(PDF_HEADER) {
            return Err(AppError::document("input is not a valid PDF header"));
        }
        let pdf = Pdf::new(bytes)
            .map_err(|_| AppError::document(format!("failed to parse PDF {address} with hayro")))?;

        Ok(Self { pdf })
    }

    pub fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    pub fn render_page(&self, page: usize, scale: f32) -> AppResult<RgbaFrame> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::invalid_argument(
                "scale must be a positive finite value",
            ));
        }

        let page_ref = self
            .pdf
            .pages()
            .get(page)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            bg_color: WHITE,
            ..Default::default()
        };
        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(page_ref, &interpreter_settings, &render_settings);

        Ok(RgbaFrame {
            width: pixmap.width() as u32,
            height: pixmap.height() as u32,
            pixels: pixmap.data_as_u8_slice().to_vec().into(),
        })
    }
}
