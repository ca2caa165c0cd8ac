use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::warn;

use crate::command::ActionId;
use crate::error::AppResult;
use crate::render::cache::RenderedPageKey;
use crate::ui::{self, BannerView, PromptView, ScreenView, StatusLine};

use super::core::{App, RenderSubsystem};
use super::state::Mode;
use super::terminal_session::TerminalSurface;

impl App {
    pub fn screen_view(&self) -> ScreenView {
        let prompt = (self.state.mode == Mode::Prompt).then(|| PromptView {
            input: self.state.prompt.value().to_string(),
            cursor: self.state.prompt.cursor(),
        });

        ScreenView {
            banner: BannerView::from_query(&self.messages),
            upload: self.session.upload.view(&self.files),
            viewer: self.session.viewer.as_ref().map(|viewer| viewer.view()),
            status: StatusLine {
                environment: self.state.environment.clone(),
                counter: self.session.counter.state().count,
                action: self.state.status.last_action_id.map(ActionId::as_str),
                message: self.state.status.message.clone(),
                presenter: self.render.presenter.status_label(),
            },
            prompt,
        }
    }

    /// Draws one frame. Presenter failures are reported in the status bar
    /// rather than aborting the loop.
    pub(crate) fn draw<S: TerminalSurface>(&mut self, surface: &mut S) -> AppResult<()> {
        if self.needs_clear {
            surface.clear()?;
            self.needs_clear = false;
        }
        let view = self.screen_view();
        let key = self.requested_page_key();
        let render = &mut self.render;
        let mut page_result = Ok(());

        surface.draw(|frame| {
            let page_area = ui::draw_screen(frame, &view);
            page_result = render.draw_page(frame, page_area, key);
            if let Some(prompt) = &view.prompt {
                let area = frame.area();
                ui::draw_prompt_overlay(frame, area, prompt);
            }
        })?;
        self.needs_redraw = false;

        if let Err(err) = page_result {
            warn!(error = %err, "page image draw failed");
            self.state.status.set(ActionId::RenderPage, err.to_string());
        }
        Ok(())
    }
}

impl RenderSubsystem {
    fn draw_page(
        &mut self,
        frame: &mut Frame<'_>,
        area: Option<Rect>,
        key: Option<RenderedPageKey>,
    ) -> AppResult<()> {
        let (Some(area), Some(key)) = (area, key) else {
            self.presenter.clear();
            return Ok(());
        };
        match self.cache.get(&key) {
            Some(page) => {
                self.presenter.show(key, page, area)?;
                self.presenter.render(frame, area)?;
            }
            None => self.presenter.clear(),
        }
        Ok(())
    }
}
