use async_trait::async_trait;
use serde::Deserialize;

use crate::document::DocumentRef;
use crate::error::AppResult;

mod graphql;
mod state;

pub use graphql::{ALL_MESSAGES_QUERY, GraphqlClient, LATEST_PDF_QUERY};
pub use state::QueryState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub text: String,
}

/// Resolves the application's named queries.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Uploaded files, newest first.
    async fn all_files(&self) -> AppResult<Vec<DocumentRef>>;
    async fn all_messages(&self) -> AppResult<Vec<Message>>;
}
