use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

use super::{FilePayload, StoredFile, UploadTransport};

/// Multipart form field the file service reads the upload from.
pub const UPLOAD_FIELD: &str = "data";

#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpUploadTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::http(err, "failed to build upload client"))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn upload(&self, payload: FilePayload) -> AppResult<StoredFile> {
        let (file_name, bytes) = payload.into_bytes().await?;
        debug!(file = %file_name, bytes = bytes.len(), endpoint = %self.endpoint, "uploading file");

        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes).file_name(file_name.clone()));
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AppError::http(err, format!("upload of {file_name} failed")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upload(format!("server returned {status}")));
        }

        let stored: StoredFile = response
            .json()
            .await
            .map_err(|err| AppError::http(err, "upload response was not JSON"))?;
        info!(file = %file_name, id = ?stored.id, "upload stored");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::HttpUploadTransport;
    use crate::error::AppError;
    use crate::transport::{FilePayload, UploadTransport};

    async fn accept_upload(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            if field.name() != Some("data") {
                continue;
            }
            let name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            return Ok(Json(json!({
                "id": "file-1",
                "name": name,
                "url": "/files/file-1",
                "size": bytes.len(),
            })));
        }
        Err(StatusCode::UNPROCESSABLE_ENTITY)
    }

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}/files")
    }

    #[tokio::test]
    async fn upload_sends_payload_in_data_field() {
        let endpoint = spawn_server(Router::new().route("/files", post(accept_upload))).await;
        let transport = HttpUploadTransport::new(endpoint, Duration::from_secs(5)).expect("client");

        let stored = transport
            .upload(FilePayload::from_bytes("scan.pdf", b"%PDF-1.4 test".to_vec()))
            .await
            .expect("upload should succeed");

        assert_eq!(stored.id.as_deref(), Some("file-1"));
        assert_eq!(stored.name.as_deref(), Some("scan.pdf"));
        assert_eq!(stored.size, Some(13));
    }

    #[tokio::test]
    async fn server_error_is_an_upload_failure() {
        let router = Router::new().route(
            "/files",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let endpoint = spawn_server(router).await;
        let transport = HttpUploadTransport::new(endpoint, Duration::from_secs(5)).expect("client");

        let err = transport
            .upload(FilePayload::from_bytes("scan.pdf", b"%PDF-1.4".to_vec()))
            .await
            .expect_err("500 should fail");
        assert!(matches!(err, AppError::Upload(_)));
    }
}
