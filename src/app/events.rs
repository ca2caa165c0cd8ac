use crossterm::event::Event;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::backend::RgbaFrame;
use crate::command::{ActionId, CommandOutcome, dispatch};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::input::handle_input_event;
use crate::render::cache::RenderedPageKey;
use crate::upload::{DocumentSlot, UploadView};

use super::core::{App, LoadedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub fn handle_event(
        &mut self,
        event: DomainEvent,
        tx: &UnboundedSender<DomainEvent>,
    ) -> AppResult<LoopControl> {
        match event {
            DomainEvent::Input(event) => {
                if matches!(event, Event::Resize(_, _)) {
                    self.needs_clear = true;
                }
                let outcome = handle_input_event(&mut self.state, event, self.keymap);
                if outcome.redraw {
                    self.needs_redraw = true;
                }
                if let Some(command) = outcome.command {
                    let _ = tx.send(DomainEvent::Command(command));
                }
            }
            DomainEvent::InputError(message) => {
                self.state
                    .status
                    .set(ActionId::Input, format!("input error: {message}"));
                self.needs_redraw = true;
            }
            DomainEvent::Command(command) => {
                let result = dispatch(&mut self.state, &mut self.session, command);
                self.needs_redraw = true;
                if result.outcome == CommandOutcome::QuitRequested {
                    return Ok(LoopControl::Break);
                }
                self.apply_effects(result.effects, tx);
                self.sync_page_render(tx);
            }
            DomainEvent::UploadAccepted { ticket } => {
                if ticket.slot == self.session.upload.slot() && self.session.upload.on_upload_accepted()
                {
                    self.needs_redraw = true;
                }
            }
            DomainEvent::UploadFinished { ticket, result } => {
                let refetch = self.session.upload.on_upload_finished(ticket, result);
                if let Some(refetch) = refetch {
                    info!(slot = refetch.ticket.slot, "upload stored, refetching documents");
                    self.state.status.set(ActionId::Upload, "upload complete");
                    self.refetch_files(tx);
                } else if let Some(error) = self.session.upload.last_error()
                    && ticket.slot == self.session.upload.slot()
                {
                    let message = error.to_string();
                    self.state.status.set(ActionId::Upload, message);
                }
                self.needs_redraw = true;
            }
            DomainEvent::FilesResolved(result) => {
                if let Err(err) = &result {
                    warn!(error = %err, "document query failed");
                    self.state.status.set(ActionId::Query, err.to_string());
                }
                self.files.resolve(result);
                self.sync_viewer(tx);
                self.needs_redraw = true;
            }
            DomainEvent::MessagesResolved(result) => {
                if let Err(err) = &result {
                    warn!(error = %err, "message query failed");
                }
                self.messages.resolve(result);
                self.needs_redraw = true;
            }
            DomainEvent::DocumentLoaded {
                viewer,
                engine,
            } => {
                let Some(controller) = self.session.viewer_mut(viewer) else {
                    debug!(viewer, "dropping document for a disposed viewer");
                    return Ok(LoopControl::Continue);
                };
                controller.on_document_loaded(engine.page_count());
                self.render.loaded = Some(LoadedDocument { viewer, engine });
                self.sync_page_render(tx);
                self.needs_redraw = true;
            }
            DomainEvent::DocumentFailed { viewer, reason } => {
                if let Some(controller) = self.session.viewer_mut(viewer) {
                    controller.on_document_failed(reason.clone());
                    self.state.status.set(ActionId::Document, reason);
                    self.needs_redraw = true;
                }
            }
            DomainEvent::PageRendered {
                viewer,
                page,
                result,
            } => {
                self.on_page_rendered(viewer, page, result);
                self.sync_page_render(tx);
            }
            DomainEvent::RedrawTick => {
                self.needs_redraw = true;
            }
        }
        Ok(LoopControl::Continue)
    }

    fn on_page_rendered(
        &mut self,
        viewer: u64,
        page: usize,
        result: AppResult<RgbaFrame>,
    ) {
        let key = RenderedPageKey::new(viewer, page);
        if self.render.in_flight == Some(key) {
            self.render.in_flight = None;
        }
        let requested = self.requested_page_key();
        let Some(controller) = self.session.viewer_mut(viewer) else {
            debug!(viewer, page, "dropping render for a disposed viewer");
            return;
        };

        match result {
            Ok(frame) => {
                // Only the page the viewer asked for may move its cursor; a
                // late render for a page navigated away from is just cached.
                if requested == Some(key) {
                    controller.on_page_rendered(page);
                    self.needs_redraw = true;
                }
                self.render.cache.insert(key, frame);
            }
            Err(err) => {
                warn!(viewer, page, error = %err, "page render failed");
                self.render.failed.insert(key);
                self.state
                    .status
                    .set(ActionId::RenderPage, format!("page {page}: {err}"));
                self.needs_redraw = true;
            }
        }
    }

    /// Binds the viewer to the first document record, disposing the previous
    /// instance when the address changes.
    pub(crate) fn sync_viewer(&mut self, tx: &UnboundedSender<DomainEvent>) {
        let previous = self.session.viewer.as_ref().map(|viewer| viewer.id());
        match self.session.upload.view(&self.files) {
            UploadView::Ready {
                document: DocumentSlot::Document(document),
                ..
            } => {
                let Some(id) = self.session.bind_viewer(&document) else {
                    return;
                };
                if let Some(previous) = previous {
                    self.render.release_viewer(previous);
                }
                info!(viewer = id, address = %document.url, "viewer bound");
                self.load_document(id, document, tx);
            }
            UploadView::Ready { .. } => {
                if self.session.unbind_viewer()
                    && let Some(previous) = previous
                {
                    self.render.release_viewer(previous);
                }
            }
            UploadView::Loading => {}
        }
    }
}
