#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadState {
    pub uploading: bool,
    /// Set by the first successful upload and never cleared.
    pub has_file: bool,
}

/// Identifies an upload issued by one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket {
    pub slot: u64,
    pub seq: u64,
}
