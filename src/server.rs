use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::query::HttpQueryBackend;
use crate::session::{ChatState, ConversationStore, Panel};
use crate::ui::chat::render_conversation;
use crate::ui::page::{not_found_page, render_conversation_page};

/// Largest accepted form body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "backend.config.loaded",
        query_url = %config.backend.query_url,
        "Query endpoint configured"
    );

    let backend = HttpQueryBackend::new(config.backend.query_url.clone());
    let state = AppState::new(Arc::clone(&config), Arc::new(backend));

    spawn_conversation_sweeper(
        state.conversations.clone(),
        Duration::from_secs(config.session.idle_timeout_secs),
        Duration::from_secs(config.session.sweep_interval_secs.max(1)),
    );

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// All routes, with tracing and body-size layers applied.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(index_handler))
        .route("/c/{id}", get(conversation_page))
        .route("/health", get(health))
        .route(
            "/api/conversations/{id}",
            get(api_get_conversation).delete(api_delete_conversation),
        )
        .route("/api/conversations/{id}/messages", post(api_send_message))
        .route("/api/conversations/{id}/shell", get(api_get_shell))
        .route(
            "/api/conversations/{id}/panel/{panel}",
            post(api_select_panel),
        )
        .route(
            "/api/conversations/{id}/sidebar/toggle",
            post(api_toggle_sidebar),
        )
        .nest_service("/static", static_dir)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_conversation_sweeper(store: ConversationStore, idle_timeout: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = store.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                tracing::debug!(
                    removed,
                    remaining = store.len(),
                    "Expired idle conversations"
                );
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Start a fresh conversation.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let conversation = state.conversations.create();
    tracing::debug!(conversation_id = %conversation.id(), "Created conversation");
    Html(render_conversation_page(
        &state.shell.title,
        &render_conversation(&conversation, &state.shell),
    ))
}

/// GET /c/:id - Reopen an existing conversation.
async fn conversation_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.conversations.get(&id) {
        Some(conversation) => Html(render_conversation_page(
            &state.shell.title,
            &render_conversation(&conversation, &state.shell),
        ))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Html(not_found_page(&state.shell.title))).into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body of the message input.
#[derive(Debug, Deserialize)]
struct MessageForm {
    message: String,
}

/// Query parameters for the shell fragment.
#[derive(Debug, Deserialize)]
struct ShellQuery {
    /// Wait for the in-flight query (if any) before rendering.
    #[serde(default)]
    wait: bool,
}

/// POST /api/conversations/:id/messages - Submit a user turn.
///
/// Returns immediately with the user turn shown and input disabled; the
/// query runs on its own task.
async fn api_send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>, AppError> {
    tracing::info!(
        conversation_id = %id,
        message_len = form.message.len(),
        "Received chat message"
    );

    let conversation = state.conversations.require(&id)?;
    let pending = state.dispatcher.begin(&conversation, &form.message)?;

    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        dispatcher.complete(pending).await;
    });

    Ok(Html(
        render_conversation(&conversation, &state.shell).into_fragment(),
    ))
}

/// GET /api/conversations/:id/shell - Current shell fragment.
async fn api_get_shell(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ShellQuery>,
) -> Result<Html<String>, AppError> {
    let conversation = state.conversations.require(&id)?;
    if query.wait {
        conversation.wait_idle().await;
    }
    Ok(Html(
        render_conversation(&conversation, &state.shell).into_fragment(),
    ))
}

/// POST /api/conversations/:id/panel/:panel - Show a results panel.
async fn api_select_panel(
    State(state): State<AppState>,
    Path((id, panel)): Path<(String, Panel)>,
) -> Result<Html<String>, AppError> {
    let conversation = state.conversations.require(&id)?;
    conversation.update(|s| s.select_panel(panel));
    tracing::debug!(conversation_id = %id, panel = panel.as_str(), "Panel selected");
    Ok(Html(
        render_conversation(&conversation, &state.shell).into_fragment(),
    ))
}

/// POST /api/conversations/:id/sidebar/toggle - Show or hide the sidebar.
async fn api_toggle_sidebar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let conversation = state.conversations.require(&id)?;
    conversation.update(ChatState::toggle_sidebar);
    Ok(Html(
        render_conversation(&conversation, &state.shell).into_fragment(),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Conversation snapshot for API responses.
#[derive(Debug, Serialize)]
struct ConversationDto {
    id: String,
    #[serde(flatten)]
    state: ChatState,
}

/// GET /api/conversations/:id - Conversation state as JSON.
async fn api_get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDto>, AppError> {
    let conversation = state.conversations.require(&id)?;
    Ok(Json(ConversationDto {
        id: conversation.id().to_string(),
        state: conversation.snapshot(),
    }))
}

/// DELETE /api/conversations/:id - Forget a conversation.
async fn api_delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    match state.conversations.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health - Liveness check.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
