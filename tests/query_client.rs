//! `HttpQueryBackend` against a local stub of the query service.

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use rag_chat_htmx::error::QueryError;
use rag_chat_htmx::query::{DispatchOutcome, HttpQueryBackend, QueryBackend, QueryDispatcher};
use rag_chat_htmx::session::ConversationStore;

async fn spawn_stub(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/query")).unwrap()
}

/// A port nothing listens on.
async fn closed_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/query")).unwrap()
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "answer": format!("You asked: {query}"),
        "docs": [
            {"id": 12, "title": "Hubble Deep Field", "score": 0.91, "snippet": "Ten days of exposure."},
            {"id": "a-7", "title": "JWST First Light", "score": 0.88}
        ],
        "chart": [
            {"title": "Galaxy Formation Surveys", "score": 0.7}
        ]
    }))
}

#[tokio::test]
async fn parses_successful_response() {
    let url = spawn_stub(Router::new().route("/query", post(echo))).await;
    let backend = HttpQueryBackend::new(url.clone());
    assert_eq!(backend.url(), &url);

    let response = backend.query("deep field").await.unwrap();
    assert_eq!(response.answer, "You asked: deep field");
    assert_eq!(response.docs.len(), 2);
    assert_eq!(response.docs[0].id, "12");
    assert_eq!(response.docs[0].snippet.as_deref(), Some("Ten days of exposure."));
    assert_eq!(response.docs[1].id, "a-7");
    assert!(response.docs[1].snippet.is_none());
    assert_eq!(response.chart[0].title, "Galaxy Formation Surveys");
}

#[tokio::test]
async fn missing_lists_default_to_empty() {
    let app = Router::new().route(
        "/query",
        post(|| async { Json(json!({"answer": "Just text.", "docs": null})) }),
    );
    let backend = HttpQueryBackend::new(spawn_stub(app).await);

    let response = backend.query("anything").await.unwrap();
    assert_eq!(response.answer, "Just text.");
    assert!(response.docs.is_empty());
    assert!(response.chart.is_empty());
    assert!(!response.has_results());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let app = Router::new().route(
        "/query",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "index offline") }),
    );
    let backend = HttpQueryBackend::new(spawn_stub(app).await);

    let err = backend.query("anything").await.unwrap_err();
    assert!(matches!(err, QueryError::Status { status: 500 }));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let app = Router::new().route("/query", post(|| async { "<html>not json</html>" }));
    let backend = HttpQueryBackend::new(spawn_stub(app).await);

    let err = backend.query("anything").await.unwrap_err();
    assert!(matches!(err, QueryError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let backend = HttpQueryBackend::new(closed_url().await);

    let err = backend.query("anything").await.unwrap_err();
    assert!(matches!(err, QueryError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn dispatcher_falls_back_when_endpoint_is_down() {
    let store = ConversationStore::new("welcome");
    let conversation = store.create();
    let dispatcher = QueryDispatcher::new(Arc::new(HttpQueryBackend::new(closed_url().await)));

    let outcome = dispatcher.submit(&conversation, "Mars rovers").await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Fallback);

    let state = conversation.snapshot();
    assert_eq!(state.documents().len(), 3);
    assert_eq!(state.studies().len(), 4);
    assert!(!state.is_loading());
}
