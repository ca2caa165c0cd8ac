use crossterm::event::Event;

use crate::backend::{RgbaFrame, SharedEngine};
use crate::command::Command;
use crate::document::DocumentRef;
use crate::error::AppResult;
use crate::query::Message;
use crate::transport::StoredFile;
use crate::upload::UploadTicket;

/// Everything the event loop reacts to. Completions of spawned work carry the
/// identity of the controller instance that started them.
#[derive(Debug)]
pub enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    UploadAccepted {
        ticket: UploadTicket,
    },
    UploadFinished {
        ticket: UploadTicket,
        result: AppResult<StoredFile>,
    },
    FilesResolved(AppResult<Vec<DocumentRef>>),
    MessagesResolved(AppResult<Vec<Message>>),
    DocumentLoaded {
        viewer: u64,
        engine: SharedEngine,
    },
    DocumentFailed {
        viewer: u64,
        reason: String,
    },
    PageRendered {
        viewer: u64,
        page: usize,
        result: AppResult<RgbaFrame>,
    },
    RedrawTick,
}
