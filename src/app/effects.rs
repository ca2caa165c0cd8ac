use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::backend::{DocumentSource, SharedEngine, open_default_engine};
use crate::command::Effect;
use crate::document::DocumentRef;
use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;
use crate::render::cache::RenderedPageKey;
use crate::upload::UploadRequest;

use super::core::App;

impl App {
    /// Issues the initial queries.
    pub fn start(&mut self, tx: &UnboundedSender<DomainEvent>) {
        self.refetch_files(tx);
        self.refetch_messages(tx);
        self.needs_redraw = true;
    }

    pub(crate) fn apply_effects(&mut self, effects: Vec<Effect>, tx: &UnboundedSender<DomainEvent>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload(request) => self.submit_upload(request, tx),
                Effect::RefetchFiles => self.refetch_files(tx),
                Effect::RefetchMessages => self.refetch_messages(tx),
            }
        }
    }

    pub(crate) fn refetch_files(&mut self, tx: &UnboundedSender<DomainEvent>) {
        self.files.begin_fetch();
        let queries = Arc::clone(&self.services.queries);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(DomainEvent::FilesResolved(queries.all_files().await));
        });
    }

    pub(crate) fn refetch_messages(&mut self, tx: &UnboundedSender<DomainEvent>) {
        self.messages.begin_fetch();
        let queries = Arc::clone(&self.services.queries);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(DomainEvent::MessagesResolved(queries.all_messages().await));
        });
    }

    /// Signals acceptance first so the controller flips to uploading before
    /// any completion can arrive on the same channel.
    fn submit_upload(&mut self, request: UploadRequest, tx: &UnboundedSender<DomainEvent>) {
        let UploadRequest { ticket, payload } = request;
        let _ = tx.send(DomainEvent::UploadAccepted { ticket });

        let uploads = Arc::clone(&self.services.uploads);
        let tx = tx.clone();
        tokio::spawn(async move {
            info!(slot = ticket.slot, seq = ticket.seq, file = %payload.file_name, "uploading");
            let result = uploads.upload(payload).await;
            let _ = tx.send(DomainEvent::UploadFinished { ticket, result });
        });
    }

    pub(crate) fn load_document(
        &mut self,
        viewer: u64,
        document: DocumentRef,
        tx: &UnboundedSender<DomainEvent>,
    ) {
        let documents = Arc::clone(&self.services.documents);
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match fetch_and_parse(documents.as_ref(), &document.url).await {
                Ok(engine) => DomainEvent::DocumentLoaded { viewer, engine },
                Err(err) => {
                    warn!(viewer, address = %document.url, error = %err, "document load failed");
                    DomainEvent::DocumentFailed {
                        viewer,
                        reason: err.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    /// Starts rendering the page the current viewer asks for, unless it is
    /// cached or another render is still running.
    pub(crate) fn sync_page_render(&mut self, tx: &UnboundedSender<DomainEvent>) {
        let Some(key) = self.requested_page_key() else {
            return;
        };
        if self.render.cache.contains(&key)
            || self.render.failed.contains(&key)
            || self.render.in_flight.is_some()
        {
            return;
        }
        let Some(loaded) = self.render.loaded.as_ref().filter(|doc| doc.viewer == key.viewer)
        else {
            return;
        };

        let engine = loaded.engine.clone();
        let scale = self.render_scale();
        self.render.in_flight = Some(key);
        debug!(viewer = key.viewer, page = key.page, scale, "render requested");

        let tx = tx.clone();
        tokio::spawn(async move {
            let page = key.page;
            let result = tokio::task::spawn_blocking(move || {
                engine.render_page(page.saturating_sub(1), scale)
            })
            .await
            .unwrap_or_else(|err| Err(AppError::unsupported(format!("render task failed: {err}"))));
            let _ = tx.send(DomainEvent::PageRendered {
                viewer: key.viewer,
                page,
                result,
            });
        });
    }

    /// Key of the page the loaded viewer currently displays (1-based).
    pub(crate) fn requested_page_key(&self) -> Option<RenderedPageKey> {
        let viewer = self.session.viewer.as_ref()?;
        let page = viewer.state().current_page()?;
        Some(RenderedPageKey::new(viewer.id(), page))
    }
}

/// Downloads the document and parses it once for every later page render.
async fn fetch_and_parse(documents: &dyn DocumentSource, address: &str) -> AppResult<SharedEngine> {
    let bytes = documents.fetch(address).await?;
    let owned_address = address.to_string();
    tokio::task::spawn_blocking(move || {
        open_default_engine(&owned_address, bytes).map(SharedEngine::new)
    })
    .await
    .map_err(|err| AppError::document(format!("document task failed: {err}")))?
}
