use tracing::{debug, info, warn};

use crate::document::DocumentRef;
use crate::error::AppResult;
use crate::query::QueryState;
use crate::transport::{FilePayload, StoredFile};

use super::state::{UploadState, UploadTicket};

pub const DROP_LABEL_IDLE: &str = "Drop a file or click to choose";
pub const DROP_LABEL_UPLOADING: &str = "Uploading File...";

/// Upload the shell must submit to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub ticket: UploadTicket,
    pub payload: FilePayload,
}

/// Asks the shell to re-issue the document query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefetchRequest {
    pub ticket: UploadTicket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZoneView {
    pub label: &'static str,
    pub uploading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSlot {
    Document(DocumentRef),
    NoDocument,
    /// The query failed before producing any record.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadView {
    Loading,
    Ready {
        drop_zone: Option<DropZoneView>,
        document: DocumentSlot,
    },
}

#[derive(Debug, Clone)]
pub struct UploadController {
    slot: u64,
    next_seq: u64,
    pending: Option<UploadTicket>,
    state: UploadState,
    last_error: Option<String>,
}

impl UploadController {
    pub fn new(slot: u64) -> Self {
        Self {
            slot,
            next_seq: 1,
            pending: None,
            state: UploadState::default(),
            last_error: None,
        }
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Takes the first dropped file and returns the upload to submit.
    pub fn on_files_dropped(&mut self, files: Vec<FilePayload>) -> Option<UploadRequest> {
        let payload = files.into_iter().next()?;
        if self.state.has_file {
            debug!(slot = self.slot, "drop ignored: slot already holds an upload");
            return None;
        }
        if self.pending.is_some() {
            debug!(slot = self.slot, "drop ignored: upload already in flight");
            return None;
        }

        let ticket = UploadTicket {
            slot: self.slot,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.saturating_add(1);
        self.pending = Some(ticket);
        info!(slot = self.slot, seq = ticket.seq, file = %payload.file_name, "file dropped");
        Some(UploadRequest { ticket, payload })
    }

    pub fn on_upload_accepted(&mut self) -> bool {
        if self.pending.is_none() || self.state.uploading {
            return false;
        }
        self.state.uploading = true;
        true
    }

    pub fn on_upload_finished(
        &mut self,
        ticket: UploadTicket,
        result: AppResult<StoredFile>,
    ) -> Option<RefetchRequest> {
        if self.pending != Some(ticket) {
            debug!(
                slot = self.slot,
                ticket_slot = ticket.slot,
                seq = ticket.seq,
                "ignoring completion for a disposed or stale upload"
            );
            return None;
        }
        self.pending = None;
        self.state.uploading = false;

        match result {
            Ok(stored) => {
                info!(slot = self.slot, id = ?stored.id, "upload completed");
                self.state.has_file = true;
                self.last_error = None;
                Some(RefetchRequest { ticket })
            }
            Err(err) => {
                warn!(slot = self.slot, error = %err, "upload failed");
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    pub fn view(&self, files: &QueryState<Vec<DocumentRef>>) -> UploadView {
        if files.is_initial_load() {
            return UploadView::Loading;
        }

        let drop_zone = (!self.state.has_file).then(|| DropZoneView {
            label: if self.state.uploading {
                DROP_LABEL_UPLOADING
            } else {
                DROP_LABEL_IDLE
            },
            uploading: self.state.uploading,
            error: self.last_error.clone(),
        });

        let document = match (&files.data, &files.error) {
            (Some(records), _) => match records.first() {
                Some(record) if record.has_address() => DocumentSlot::Document(record.clone()),
                _ => DocumentSlot::NoDocument,
            },
            (None, Some(error)) => DocumentSlot::Unavailable(error.clone()),
            (None, None) => DocumentSlot::NoDocument,
        };

        UploadView::Ready {
            drop_zone,
            document,
        }
    }
}
