//! Outbound client for the query endpoint.

use async_trait::async_trait;
use url::Url;

use super::types::{QueryRequest, QueryResponse};
use crate::error::QueryError;

/// Anything that can answer a user query.
///
/// The server uses [`HttpQueryBackend`]; tests substitute canned backends.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Run one query round trip.
    async fn query(&self, query: &str) -> Result<QueryResponse, QueryError>;
}

/// `POST {query: ...}` to a configured URL with reqwest.
///
/// No timeout is set on the client; a request runs until the platform gives
/// up on it.
#[derive(Debug, Clone)]
pub struct HttpQueryBackend {
    client: reqwest::Client,
    url: Url,
}

impl HttpQueryBackend {
    /// Backend with a default reqwest client.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Backend sharing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Endpoint URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QueryBackend for HttpQueryBackend {
    async fn query(&self, query: &str) -> Result<QueryResponse, QueryError> {
        tracing::debug!(url = %self.url, query_len = query.len(), "Sending query");

        let response = self
            .client
            .post(self.url.clone())
            .json(&QueryRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
            });
        }

        // Read the body first so a bad payload surfaces as `Malformed`
        // rather than as a transport error.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
