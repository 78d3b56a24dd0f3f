//! RAG Chat: Axum + HTMX front end for a retrieval-augmented assistant
//!
//! A chat thread, a text input and a results sidebar (retrieved documents and
//! a relevance chart) for an external `/query` service. All retrieval and
//! generation happens behind that service; this crate only renders state and
//! forwards queries.
//!
//! # Architecture
//!
//! - **Server**: Axum routes returning server-rendered HTML fragments
//! - **Dispatch**: one outbound `/query` call per user turn, with demo fallback
//! - **State**: in-memory conversations, one per browser tab
//! - **UI**: HTML strings + HTMX + Alpine.js, no client build step
//!
//! # Modules
//!
//! - [`config`]: layered configuration
//! - [`query`]: wire contract, HTTP client, fallback content and dispatcher
//! - [`session`]: conversation state and storage
//! - [`ui`]: HTML rendering
//! - [`server`]: router and handlers

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod error;
pub mod query;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use config::AppConfig;
use query::{QueryBackend, QueryDispatcher};
use session::ConversationStore;
use ui::chat::ShellOptions;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Live conversations.
    pub conversations: ConversationStore,
    /// Sends user turns to the query endpoint.
    pub dispatcher: QueryDispatcher,
    /// Presentation settings for the shell.
    pub shell: Arc<ShellOptions>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State answering queries through `backend`.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            conversations: ConversationStore::new(config.ui.welcome_message.clone()),
            dispatcher: QueryDispatcher::new(backend),
            shell: Arc::new(ShellOptions::from(&config.ui)),
            config,
        }
    }
}
