//! Error types.
//!
//! [`QueryError`] covers everything that can go wrong talking to the query
//! endpoint. It never reaches the browser: the dispatcher swaps in demo
//! content instead. [`AppError`] covers routing faults on our own endpoints.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// htmx response header that triggers a full client-side redirect.
pub const HX_REDIRECT: &str = "hx-redirect";

/// Failure of a single `/query` round trip.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Connection, TLS or body read failure.
    #[error("query endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("query endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a valid query response.
    #[error("malformed query response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors returned by the chat routes.
#[derive(Error, Debug)]
pub enum AppError {
    /// No conversation with this id (expired or never created).
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    /// A query for this conversation is still in flight.
    #[error("a query is already in flight for this conversation")]
    Busy,

    /// The submitted message was blank.
    #[error("message must not be empty")]
    EmptyMessage,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ConversationNotFound(_) => StatusCode::NOT_FOUND,
            Self::Busy => StatusCode::CONFLICT,
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting chat request");
        let body = format!(
            r#"<p class="app-error text-sm text-danger">{}</p>"#,
            html_escape::encode_text(&self.to_string())
        );
        let mut response = (self.status(), Html(body)).into_response();
        // htmx ignores 4xx bodies; an expired conversation would leave the
        // tab inert. Send the browser to a fresh one instead.
        if matches!(self, Self::ConversationNotFound(_)) {
            response
                .headers_mut()
                .insert(HX_REDIRECT, HeaderValue::from_static("/"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_errors_map_to_statuses() {
        assert_eq!(
            AppError::ConversationNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Busy.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::EmptyMessage.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_conversation_redirects_htmx_home() {
        let response = AppError::ConversationNotFound("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/");

        let response = AppError::Busy.into_response();
        assert!(response.headers().get(HX_REDIRECT).is_none());
    }

    #[test]
    fn status_error_mentions_code() {
        let err = QueryError::Status { status: 503 };
        assert_eq!(err.to_string(), "query endpoint returned HTTP 503");
    }
}
