use image::imageops::FilterType;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use ratatui_image::Resize;
use ratatui_image::StatefulImage;
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use tracing::{debug, info};

use crate::backend::RgbaFrame;
use crate::error::{AppError, AppResult};
use crate::render::cache::RenderedPageKey;

use super::image_ops::{create_protocol_with_picker, downscale_frame_for_area};
use super::terminal_cell::{picker_with_resolved_cell_size, protocol_type_label};
use super::traits::{ImagePresenter, PresenterCaps};

pub(crate) const ENCODE_FAILURE_MESSAGE: &str = "failed to encode terminal image";
const ENCODE_RESIZE_FILTER: FilterType = FilterType::Nearest;

struct ShownPage {
    key: RenderedPageKey,
    area: Rect,
    protocol: StatefulProtocol,
}

pub struct RatatuiImagePresenter {
    picker: Picker,
    protocol_type: ProtocolType,
    protocol_label: &'static str,
    terminal_initialized: bool,
    shown: Option<ShownPage>,
}

impl Default for RatatuiImagePresenter {
    fn default() -> Self {
        Self {
            picker: Picker::halfblocks(),
            protocol_type: ProtocolType::Halfblocks,
            protocol_label: "halfblocks",
            terminal_initialized: false,
            shown: None,
        }
    }
}

impl RatatuiImagePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_protocol(
        frame: &mut Frame<'_>,
        area: Rect,
        protocol: &mut StatefulProtocol,
    ) -> AppResult<()> {
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(
            StatefulImage::<StatefulProtocol>::default()
                .resize(Resize::Fit(Some(ENCODE_RESIZE_FILTER))),
            area,
            protocol,
        );

        if let Some(result) = protocol.last_encoding_result() {
            result.map_err(|_| AppError::unsupported(ENCODE_FAILURE_MESSAGE))?;
        }
        Ok(())
    }
}

impl ImagePresenter for RatatuiImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        if self.terminal_initialized {
            return Ok(());
        }

        if let Ok(picker) = Picker::from_query_stdio() {
            let protocol_type = picker.protocol_type();
            self.protocol_type = protocol_type;
            self.protocol_label = protocol_type_label(protocol_type);
            self.picker = picker_with_resolved_cell_size(picker, protocol_type);
            self.shown = None;
            info!(protocol = self.protocol_label, "terminal graphics detected");
        }

        self.terminal_initialized = true;
        Ok(())
    }

    fn status_label(&self) -> String {
        format!("ratatui-image/{}", self.protocol_label)
    }

    fn show(&mut self, key: RenderedPageKey, frame: &RgbaFrame, area: Rect) -> AppResult<()> {
        if let Some(shown) = &self.shown
            && shown.key == key
            && shown.area == area
        {
            return Ok(());
        }

        let scaled = downscale_frame_for_area(frame.clone(), area, self.picker.font_size())?;
        debug!(
            viewer = key.viewer,
            page = key.page,
            width = scaled.width,
            height = scaled.height,
            "encoding page image"
        );
        let protocol = create_protocol_with_picker(&self.picker, scaled)?;
        self.shown = Some(ShownPage {
            key,
            area,
            protocol,
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.shown = None;
    }

    fn current_key(&self) -> Option<RenderedPageKey> {
        self.shown.as_ref().map(|shown| shown.key)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool> {
        if area.width == 0 || area.height == 0 {
            return Ok(false);
        }
        let Some(shown) = self.shown.as_mut() else {
            return Ok(false);
        };

        let target = shown
            .protocol
            .size_for(Resize::Fit(Some(ENCODE_RESIZE_FILTER)), area);
        let render_area = center_rect_within(area, target.width, target.height);
        if let Err(err) = Self::draw_protocol(frame, render_area, &mut shown.protocol) {
            self.shown = None;
            return Err(err);
        }
        Ok(true)
    }

    fn capabilities(&self) -> PresenterCaps {
        PresenterCaps {
            backend_name: "ratatui-image",
            cell_px: Some(self.picker.font_size()),
            preferred_max_render_scale: preferred_max_render_scale(self.protocol_type),
        }
    }
}

fn preferred_max_render_scale(protocol: ProtocolType) -> f32 {
    match protocol {
        ProtocolType::Kitty | ProtocolType::Iterm2 | ProtocolType::Sixel => 2.5,
        ProtocolType::Halfblocks => 1.0,
    }
}

fn center_rect_within(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
