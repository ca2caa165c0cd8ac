mod controller;
mod state;

pub use controller::{
    DROP_LABEL_IDLE, DROP_LABEL_UPLOADING, DocumentSlot, DropZoneView, RefetchRequest,
    UploadController, UploadRequest, UploadView,
};
pub use state::{UploadState, UploadTicket};
