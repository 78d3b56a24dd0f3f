//! Full HTML documents.

use crate::ui::chat::{RenderedConversation, TOAST_CONTAINER_ID};
use crate::ui::components::{ButtonSize, ButtonVariant, button, text};

/// Wrap `content` in the application document, with `toasts` already placed
/// in the toast container.
///
/// Scripts are served locally from `/static/vendor` (no CDN).
#[must_use]
pub fn html_shell(title: &str, content: &str, toasts: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Retrieval-augmented research assistant">
    <title>{title}</title>

    <!-- HTMX and Alpine (local) -->
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script defer src="/static/vendor/alpine.min.js"></script>

    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="h-screen bg-background text-textPrimary antialiased">
    <div id="app-shell" class="flex flex-col h-screen overflow-hidden">
        {content}
    </div>
    <div id="{TOAST_CONTAINER_ID}" class="fixed bottom-4 right-4 z-50 flex flex-col gap-2" aria-live="polite">{toasts}</div>
</body>
</html>"#,
        title = text(title),
    )
}

/// Full page for a rendered conversation.
#[must_use]
pub fn render_conversation_page(title: &str, rendered: &RenderedConversation) -> String {
    html_shell(title, &rendered.root, rendered.toast.as_deref().unwrap_or_default())
}

/// Page shown for unknown or expired conversations.
#[must_use]
pub fn not_found_page(title: &str) -> String {
    let home = button(
        ButtonVariant::Primary,
        ButtonSize::Md,
        "",
        r#"type="button" onclick="window.location.href='/'""#,
        "Start a new chat",
    );
    html_shell(
        title,
        &format!(
            r#"<div class="flex flex-col items-center justify-center py-20"><h1 class="text-4xl font-bold mb-4">404</h1><p class="text-textMuted mb-6">This conversation has expired or never existed.</p>{home}</div>"#
        ),
        "",
    )
}
