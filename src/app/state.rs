use tui_input::Input;

use crate::command::ActionId;
use crate::counter::CounterStore;
use crate::document::DocumentRef;
use crate::upload::UploadController;
use crate::viewer::ViewerController;

pub const ENVIRONMENT_ENV: &str = "PDFDROP_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a path for the drop target.
    Prompt,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

impl StatusState {
    pub fn set(&mut self, action: ActionId, message: impl Into<String>) {
        self.last_action_id = Some(action);
        self.message = message.into();
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    pub prompt: Input,
    pub environment: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            status: StatusState::default(),
            prompt: Input::default(),
            environment: detect_environment(),
        }
    }
}

fn detect_environment() -> String {
    if let Ok(value) = std::env::var(ENVIRONMENT_ENV)
        && !value.trim().is_empty()
    {
        return value;
    }
    if cfg!(debug_assertions) {
        "development".to_string()
    } else {
        "production".to_string()
    }
}

/// Controllers owned by the running application.
///
/// Every controller instance gets a distinct id so completions issued for a
/// disposed instance can be recognised and dropped.
#[derive(Debug)]
pub struct Session {
    pub upload: UploadController,
    pub viewer: Option<ViewerController>,
    pub counter: CounterStore,
    next_instance: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            upload: UploadController::new(1),
            viewer: None,
            counter: CounterStore::default(),
            next_instance: 2,
        }
    }
}

impl Session {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_instance;
        self.next_instance = self.next_instance.saturating_add(1);
        id
    }

    /// Replaces the upload controller with a fresh one in its empty state.
    pub fn reset_upload_slot(&mut self) -> u64 {
        let slot = self.allocate_id();
        self.upload = UploadController::new(slot);
        slot
    }

    /// Binds a new viewer unless the current one already shows `document`.
    /// Returns the id of a newly created viewer.
    pub fn bind_viewer(&mut self, document: &DocumentRef) -> Option<u64> {
        if let Some(viewer) = &self.viewer
            && viewer.document() == document
        {
            return None;
        }
        let id = self.allocate_id();
        self.viewer = Some(ViewerController::new(id, document.clone()));
        Some(id)
    }

    pub fn unbind_viewer(&mut self) -> bool {
        self.viewer.take().is_some()
    }

    pub fn viewer_mut(&mut self, id: u64) -> Option<&mut ViewerController> {
        self.viewer.as_mut().filter(|viewer| viewer.id() == id)
    }
}
