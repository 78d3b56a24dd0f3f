//! Authoritative UI state of one chat.
//!
//! [`ChatState`] is plain data plus the transitions the layout shell allows.
//! Locking and async signalling live in [`super::Conversation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::query::fallback;
use crate::query::{QueryResponse, RetrievedDocument, StudyRecord};

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The person typing.
    User,
    /// The RAG assistant (or the demo fallback).
    Assistant,
}

/// One message in the thread. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    id: String,
    text: String,
    author: Author,
    sent_at: DateTime<Utc>,
}

impl ChatTurn {
    fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            author,
            sent_at: Utc::now(),
        }
    }

    /// A turn typed by the user.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    /// A turn from the assistant.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Author::Assistant, text)
    }

    /// Opaque identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Author of the turn.
    #[must_use]
    pub fn author(&self) -> Author {
        self.author
    }

    /// True for user turns.
    #[must_use]
    pub fn is_from_user(&self) -> bool {
        self.author == Author::User
    }

    /// When the turn was appended.
    #[must_use]
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

/// Which results panel the sidebar shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Retrieved documents list.
    #[default]
    Documents,
    /// Top related studies chart.
    Chart,
}

impl Panel {
    /// Path segment / serialized name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Chart => "chart",
        }
    }
}

/// A transient toast, shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Bold first line.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// Everything the layout shell renders.
#[derive(Debug, Clone, Serialize)]
pub struct ChatState {
    turns: Vec<ChatTurn>,
    documents: Vec<RetrievedDocument>,
    studies: Vec<StudyRecord>,
    loading: bool,
    sidebar_visible: bool,
    active_panel: Panel,
    notice: Option<Notice>,
}

impl ChatState {
    /// Fresh state holding only the assistant's welcome turn.
    #[must_use]
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(welcome)],
            documents: Vec::new(),
            studies: Vec::new(),
            loading: false,
            sidebar_visible: true,
            active_panel: Panel::Documents,
            notice: None,
        }
    }

    /// Turns in submission order.
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Documents from the latest query.
    #[must_use]
    pub fn documents(&self) -> &[RetrievedDocument] {
        &self.documents
    }

    /// Studies from the latest query.
    #[must_use]
    pub fn studies(&self) -> &[StudyRecord] {
        &self.studies
    }

    /// True while a query is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the results sidebar is shown.
    #[must_use]
    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    /// Currently selected results panel.
    #[must_use]
    pub fn active_panel(&self) -> Panel {
        self.active_panel
    }

    /// Pending toast, if any, without consuming it.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Append the user's turn and enter the awaiting-response state.
    ///
    /// Returns the trimmed query text to send.
    pub fn begin_request(&mut self, text: &str) -> Result<String, AppError> {
        if self.loading {
            return Err(AppError::Busy);
        }
        let query = text.trim();
        if query.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        self.turns.push(ChatTurn::user(query));
        self.loading = true;
        Ok(query.to_string())
    }

    /// Apply a successful response.
    pub fn apply_response(&mut self, response: QueryResponse) {
        let has_results = response.has_results();
        self.turns.push(ChatTurn::assistant(response.answer));
        self.documents = response.docs;
        self.studies = response.chart;
        if has_results {
            self.sidebar_visible = true;
        }
    }

    /// Substitute demo content after a failed query.
    pub fn apply_fallback(&mut self, query: &str) {
        self.turns.push(ChatTurn::assistant(fallback::demo_answer(query)));
        self.documents = fallback::demo_documents();
        self.studies = fallback::demo_studies();
        self.sidebar_visible = true;
        self.notice = Some(fallback::demo_notice());
    }

    /// Leave the awaiting-response state.
    pub fn finish_request(&mut self) {
        self.loading = false;
    }

    /// Show `panel` in the sidebar, opening the sidebar if it was hidden.
    pub fn select_panel(&mut self, panel: Panel) {
        self.active_panel = panel;
        self.sidebar_visible = true;
    }

    /// Flip sidebar visibility.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }

    /// Remove and return the pending toast.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
