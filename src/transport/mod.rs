use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

mod http;

pub use http::HttpUploadTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadContent {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A dropped file. Path-backed payloads are read only when uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub file_name: String,
    pub content: PayloadContent,
}

impl FilePayload {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Self {
            file_name,
            content: PayloadContent::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content: PayloadContent::Bytes(bytes),
        }
    }

    pub async fn into_bytes(self) -> AppResult<(String, Vec<u8>)> {
        let bytes = match self.content {
            PayloadContent::Bytes(bytes) => bytes,
            PayloadContent::Path(path) => tokio::fs::read(&path).await.map_err(|source| {
                AppError::io_with_context(source, format!("failed to read {}", path.display()))
            })?,
        };
        Ok((self.file_name, bytes))
    }
}

/// Server acknowledgement for an uploaded file. Only success matters to the
/// upload flow; the fields are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(&self, payload: FilePayload) -> AppResult<StoredFile>;
}
