use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{DocumentSource, HttpDocumentSource, SharedEngine};
use crate::config::Config;
use crate::document::DocumentRef;
use crate::error::AppResult;
use crate::input::KeymapPreset;
use crate::presenter::{ImagePresenter, PresenterKind, create_presenter};
use crate::query::{GraphqlClient, Message, QueryState, QueryTransport};
use crate::render::cache::{RenderedPageCache, RenderedPageKey};
use crate::transport::{HttpUploadTransport, UploadTransport};

use super::state::{AppState, Session};

/// Network seams the application talks through.
#[derive(Clone)]
pub struct Services {
    pub uploads: Arc<dyn UploadTransport>,
    pub queries: Arc<dyn QueryTransport>,
    pub documents: Arc<dyn DocumentSource>,
}

impl Services {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let timeout = Duration::from_millis(config.server.request_timeout_ms);
        Ok(Self {
            uploads: Arc::new(HttpUploadTransport::new(&config.server.files_uri, timeout)?),
            queries: Arc::new(GraphqlClient::new(&config.server.graphql_uri, timeout)?),
            documents: Arc::new(HttpDocumentSource::new(&config.server.files_uri, timeout)?),
        })
    }
}

/// Parsed document bound to the current viewer instance.
pub(crate) struct LoadedDocument {
    pub(crate) viewer: u64,
    pub(crate) engine: SharedEngine,
}

pub struct RenderSubsystem {
    pub presenter: Box<dyn ImagePresenter>,
    pub cache: RenderedPageCache,
    pub(crate) loaded: Option<LoadedDocument>,
    pub(crate) in_flight: Option<RenderedPageKey>,
    /// Pages whose render failed; not retried for the same viewer.
    pub(crate) failed: HashSet<RenderedPageKey>,
}

impl RenderSubsystem {
    /// Forgets everything tied to a disposed viewer instance.
    pub(crate) fn release_viewer(&mut self, viewer: u64) {
        self.cache.purge_viewer(viewer);
        if self.loaded.as_ref().is_some_and(|doc| doc.viewer == viewer) {
            self.loaded = None;
        }
        if self.in_flight.is_some_and(|key| key.viewer == viewer) {
            self.in_flight = None;
        }
        self.failed.retain(|key| key.viewer != viewer);
        self.presenter.clear();
    }
}

pub struct App {
    pub state: AppState,
    pub session: Session,
    pub config: Config,
    pub files: QueryState<Vec<DocumentRef>>,
    pub messages: QueryState<Vec<Message>>,
    pub render: RenderSubsystem,
    pub(crate) services: Services,
    pub(crate) keymap: KeymapPreset,
    pub(crate) needs_redraw: bool,
    pub(crate) needs_clear: bool,
}

impl App {
    pub fn new(config: Config) -> AppResult<Self> {
        let services = Services::from_config(&config)?;
        Self::new_with_services(config, services)
    }

    pub fn new_with_services(config: Config, services: Services) -> AppResult<Self> {
        let presenter = create_presenter(PresenterKind::RatatuiImage)?;
        Ok(Self {
            state: AppState::default(),
            session: Session::default(),
            keymap: KeymapPreset::parse(&config.keymap.preset),
            render: RenderSubsystem {
                presenter,
                cache: RenderedPageCache::new(config.render.page_cache_entries),
                loaded: None,
                in_flight: None,
                failed: HashSet::new(),
            },
            files: QueryState::default(),
            messages: QueryState::default(),
            services,
            config,
            needs_redraw: true,
            needs_clear: false,
        })
    }

    /// Scale passed to the engine, capped at what the terminal protocol can show.
    pub(crate) fn render_scale(&self) -> f32 {
        let caps = self.render.presenter.capabilities();
        self.config
            .render
            .page_scale
            .min(caps.preferred_max_render_scale)
            .max(0.25)
    }
}
