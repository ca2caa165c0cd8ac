use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::document::DocumentRef;
use crate::error::{AppError, AppResult};

use super::{Message, QueryTransport};

pub const LATEST_PDF_QUERY: &str =
    "query LatestPdf { allFiles(orderBy: createdAt_DESC) { url name } }";
pub const ALL_MESSAGES_QUERY: &str = "query AllMessages { allMessages { text } }";

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllFilesData {
    #[serde(default)]
    all_files: Vec<DocumentRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllMessagesData {
    #[serde(default)]
    all_messages: Vec<Message>,
}

/// Decodes a GraphQL response body, turning reported errors into `AppError::Query`.
pub(crate) fn decode_response<T: DeserializeOwned>(query: &'static str, body: &str) -> AppResult<T> {
    let response: GraphqlResponse<T> = serde_json::from_str(body)
        .map_err(|err| AppError::query(query, format!("malformed response: {err}")))?;

    if !response.errors.is_empty() {
        let messages = response
            .errors
            .into_iter()
            .map(|err| err.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::query(query, messages));
    }

    response
        .data
        .ok_or_else(|| AppError::query(query, "response carried no data"))
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::http(err, "failed to build GraphQL client"))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query_name: &'static str,
        query: &str,
    ) -> AppResult<T> {
        debug!(query = query_name, endpoint = %self.endpoint, "issuing GraphQL query");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|err| AppError::http(err, format!("{query_name} request failed")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::http(err, format!("{query_name} response unreadable")))?;
        if !status.is_success() {
            return Err(AppError::query(query_name, format!("server returned {status}")));
        }
        decode_response(query_name, &body)
    }
}

#[async_trait]
impl QueryTransport for GraphqlClient {
    async fn all_files(&self) -> AppResult<Vec<DocumentRef>> {
        let data: AllFilesData = self.execute("allFiles", LATEST_PDF_QUERY).await?;
        Ok(data.all_files)
    }

    async fn all_messages(&self) -> AppResult<Vec<Message>> {
        let data: AllMessagesData = self.execute("allMessages", ALL_MESSAGES_QUERY).await?;
        Ok(data.all_messages)
    }
}
