//! Layout shell: header, thread, input and results sidebar.

use chrono::{FixedOffset, Offset, Utc};

use super::{render_header, render_input_area, render_message_list};
use crate::config::{DEFAULT_NOTICE_DISMISS_MS, DEFAULT_TITLE, UiConfig};
use crate::session::{ChatState, Conversation, Notice, Panel};
use crate::ui::components::text;
use crate::ui::results::{render_chart_panel, render_document_panel};

/// Presentation settings for the shell.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Header title.
    pub title: String,
    /// Offset used for turn time labels.
    pub utc_offset: FixedOffset,
    /// How long a toast stays up.
    pub notice_dismiss_ms: u64,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            utc_offset: Utc.fix(),
            notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
        }
    }
}

impl From<&UiConfig> for ShellOptions {
    fn from(config: &UiConfig) -> Self {
        // Out-of-range offsets fall back to UTC.
        let utc_offset = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        Self {
            title: config.title.clone(),
            utc_offset,
            notice_dismiss_ms: config.notice_dismiss_ms,
        }
    }
}

/// Base URL of a conversation's fragment routes.
#[must_use]
pub fn conversation_url(conversation_id: &str) -> String {
    format!("/api/conversations/{conversation_id}")
}

/// Id of the body-level toast container. It sits outside `#chat-root`, so
/// shell swaps never remove a toast before it dismisses itself.
pub const TOAST_CONTAINER_ID: &str = "toasts";

/// One self-dismissing toast.
#[must_use]
pub fn render_toast(notice: &Notice, dismiss_ms: u64) -> String {
    format!(
        r#"<div class="toast max-w-sm rounded-lg border border-panelBorder bg-panel p-4 shadow-lg" role="status" x-data x-init="setTimeout(() => $el.remove(), {dismiss_ms})"><p class="font-semibold text-sm">{title}</p><p class="text-sm text-textMuted">{description}</p></div>"#,
        title = text(&notice.title),
        description = text(&notice.description),
    )
}

fn render_sidebar(state: &ChatState) -> String {
    if !state.sidebar_visible() {
        return String::new();
    }
    let panel = match state.active_panel() {
        Panel::Documents => render_document_panel(state.documents(), true),
        Panel::Chart => render_chart_panel(state.studies(), true),
    };
    // Below the chat on narrow viewports, a right-hand column on wide ones.
    format!(
        r#"<aside class="results-panel w-full h-80 md:h-auto md:w-80 lg:w-96 shrink-0 border-t md:border-t-0 md:border-l border-panelBorder bg-panel flex flex-col overflow-hidden">{panel}</aside>"#
    )
}

/// Render the `#chat-root` fragment for `state`.
#[must_use]
pub fn render_shell(
    conversation_id: &str,
    state: &ChatState,
    options: &ShellOptions,
) -> String {
    let base = conversation_url(conversation_id);
    let pending_url = state
        .is_loading()
        .then(|| format!("{base}/shell?wait=true"));

    let header = render_header(
        &options.title,
        &base,
        state.active_panel(),
        state.sidebar_visible(),
    );
    let messages = render_message_list(state.turns(), options.utc_offset, pending_url.as_deref());
    let input = render_input_area(&format!("{base}/messages"), state.is_loading());
    let sidebar = render_sidebar(state);

    format!(
        r#"<div id="chat-root" class="chat-root h-full flex flex-col bg-background" data-conversation-id="{id}" data-loading="{loading}" data-sidebar="{sidebar_visible}" data-panel="{panel}">{header}<div class="chat-body flex-1 flex flex-col md:flex-row overflow-hidden min-h-0"><section class="chat-column flex-1 flex flex-col min-h-0">{messages}{input}</section>{sidebar}</div></div>"#,
        id = text(conversation_id),
        loading = state.is_loading(),
        sidebar_visible = state.sidebar_visible(),
        panel = state.active_panel().as_str(),
    )
}

/// A rendered conversation: the `#chat-root` fragment and its pending toast.
#[derive(Debug, Clone)]
pub struct RenderedConversation {
    /// The `#chat-root` element.
    pub root: String,
    /// Toast markup, if a notice was pending.
    pub toast: Option<String>,
}

impl RenderedConversation {
    /// Response body for an htmx swap of `#chat-root`; the toast is appended
    /// out of band to the toast container.
    #[must_use]
    pub fn into_fragment(self) -> String {
        match self.toast {
            Some(toast) => format!(
                r#"{root}<div id="{TOAST_CONTAINER_ID}" hx-swap-oob="beforeend">{toast}</div>"#,
                root = self.root,
            ),
            None => self.root,
        }
    }
}

/// Render a conversation, consuming its pending toast.
#[must_use]
pub fn render_conversation(
    conversation: &Conversation,
    options: &ShellOptions,
) -> RenderedConversation {
    let (state, notice) = conversation.update(|state| {
        let notice = state.take_notice();
        (state.clone(), notice)
    });
    RenderedConversation {
        root: render_shell(conversation.id(), &state, options),
        toast: notice.map(|notice| render_toast(&notice, options.notice_dismiss_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryResponse, StudyRecord};
    use crate::session::ConversationStore;

    #[test]
    fn fresh_shell_has_welcome_and_empty_documents() {
        let state = ChatState::new("Welcome!");
        let html = render_shell("c1", &state, &ShellOptions::default());

        assert!(html.starts_with(r#"<div id="chat-root""#));
        assert!(html.contains("Welcome!"));
        assert!(html.contains("No documents retrieved yet"));
        assert!(html.contains(r#"data-loading="false""#));
        assert!(html.contains(r#"hx-post="/api/conversations/c1/messages""#));
        assert!(!html.contains("toast"));
    }

    #[test]
    fn loading_shell_disables_input_and_polls() {
        let mut state = ChatState::new("Welcome!");
        state.begin_request("Europa").unwrap();
        let html = render_shell("c1", &state, &ShellOptions::default());

        assert!(html.contains(r#"data-loading="true""#));
        assert!(html.contains("required disabled>"));
        assert!(html.contains(r#"hx-get="/api/conversations/c1/shell?wait=true""#));
    }

    #[test]
    fn hidden_sidebar_renders_no_panel() {
        let mut state = ChatState::new("hi");
        state.toggle_sidebar();
        let html = render_shell("c1", &state, &ShellOptions::default());
        assert!(!html.contains("results-panel"));
        assert!(!html.contains("Retrieved Documents"));
    }

    #[test]
    fn chart_panel_replaces_documents_when_selected() {
        let mut state = ChatState::new("hi");
        state.apply_response(QueryResponse {
            answer: "ok".into(),
            docs: vec![],
            chart: vec![StudyRecord {
                title: "Ion Thruster Lifetime".into(),
                score: 0.64,
            }],
        });
        state.select_panel(Panel::Chart);

        let html = render_shell("c1", &state, &ShellOptions::default());
        assert!(html.contains("Top Related Studies"));
        assert!(!html.contains("Retrieved Documents"));
        assert_eq!(html.matches("results-panel").count(), 1);
    }

    #[test]
    fn notice_is_shown_once() {
        let store = ConversationStore::new("hi");
        let conversation = store.create();
        conversation.update(|state| state.apply_fallback("Titan"));

        let options = ShellOptions::default();
        let first = render_conversation(&conversation, &options);
        let toast = first.toast.as_deref().unwrap();
        assert!(toast.contains("Demo Mode"));
        assert!(toast.contains("setTimeout(() => $el.remove(), 4000)"));

        let second = render_conversation(&conversation, &options);
        assert!(second.toast.is_none());
        assert!(!second.into_fragment().contains("Demo Mode"));
    }

    #[test]
    fn toast_lives_outside_chat_root() {
        let store = ConversationStore::new("hi");
        let conversation = store.create();
        conversation.update(|state| state.apply_fallback("Titan"));

        let rendered = render_conversation(&conversation, &ShellOptions::default());
        assert!(!rendered.root.contains("Demo Mode"));

        let root_len = rendered.root.len();
        let fragment = rendered.into_fragment();
        let (root, rest) = fragment.split_at(root_len);
        assert!(root.ends_with("</div>"));
        assert!(rest.starts_with(r#"<div id="toasts" hx-swap-oob="beforeend">"#));
        assert!(rest.contains("Demo Mode"));
    }

    #[test]
    fn bad_offset_falls_back_to_utc() {
        let config = UiConfig {
            title: "T".into(),
            welcome_message: "W".into(),
            utc_offset_minutes: 100_000,
            notice_dismiss_ms: 10,
        };
        let options = ShellOptions::from(&config);
        assert_eq!(options.utc_offset, Utc.fix());
        assert_eq!(options.notice_dismiss_ms, 10);
    }
}
