use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::error::{AppError, AppResult};

use super::hayro::PDF_HEADER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAddress {
    Remote(Url),
    Local(PathBuf),
}

/// Resolves a document address from the file service.
///
/// Absolute URLs are used as-is, `file://` URLs and existing local paths are
/// read from disk, anything else is joined onto `base`, which is treated as a
/// directory.
pub fn resolve_address(base: &str, address: &str) -> AppResult<ResolvedAddress> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::invalid_argument("document address must not be empty"));
    }

    if let Ok(url) = Url::parse(address) {
        return match url.scheme() {
            "http" | "https" => Ok(ResolvedAddress::Remote(url)),
            "file" => url
                .to_file_path()
                .map(ResolvedAddress::Local)
                .map_err(|_| AppError::invalid_argument(format!("bad file url: {address}"))),
            other => Err(AppError::unsupported(format!("address scheme {other}"))),
        };
    }

    let local = PathBuf::from(address);
    if local.is_absolute() && local.is_file() {
        return Ok(ResolvedAddress::Local(local));
    }

    let mut base = Url::parse(base)
        .map_err(|err| AppError::invalid_argument(format!("bad base uri {base}: {err}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(address)
        .map(ResolvedAddress::Remote)
        .map_err(|err| AppError::invalid_argument(format!("bad document address {address}: {err}")))
}

/// Fetches raw document bytes for an address.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, address: &str) -> AppResult<Arc<Vec<u8>>>;
}

#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    http: reqwest::Client,
    base: String,
}

impl HttpDocumentSource {
    pub fn new(base: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::http(err, "failed to build document client"))?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, address: &str) -> AppResult<Arc<Vec<u8>>> {
        let bytes = match resolve_address(&self.base, address)? {
            ResolvedAddress::Remote(url) => {
                debug!(%url, "downloading document");
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|err| AppError::http(err, format!("download of {url} failed")))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::document(format!("{url} returned {status}")));
                }
                response
                    .bytes()
                    .await
                    .map_err(|err| AppError::http(err, format!("download of {url} interrupted")))?
                    .to_vec()
            }
            ResolvedAddress::Local(path) => {
                debug!(path = %path.display(), "reading local document");
                tokio::fs::read(&path).await.map_err(|source| {
                    AppError::io_with_context(source, format!("failed to read {}", path.display()))
                })?
            }
        };

        if !bytes.starts_with(PDF_HEADER) {
            return Err(AppError::document("input is not a valid PDF header"));
        }
        Ok(Arc::new(bytes))
    }
}
