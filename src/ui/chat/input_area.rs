//! Chat input area.

use crate::ui::components::{ButtonSize, ButtonVariant, attr, button, icons};

/// Message form posting to `action_url`.
///
/// `disabled` renders the textarea and send button disabled; htmx also
/// disables them for the duration of the POST itself.
#[must_use]
pub fn render_input_area(action_url: &str, disabled: bool) -> String {
    let (disabled_attr, alpine_guard, placeholder) = if disabled {
        ("disabled", "", "Waiting for the assistant...")
    } else {
        (
            "",
            r#":disabled="!message.trim()""#,
            "Ask about NASA missions, research, or projects...",
        )
    };

    let send = button(
        ButtonVariant::Primary,
        ButtonSize::Icon,
        "shrink-0 h-11 w-11 rounded-xl",
        &format!(r#"type="submit" aria-label="Send message" {disabled_attr} {alpine_guard}"#),
        &icons::send("h-5 w-5"),
    );

    format!(
        r##"<div class="input-area border-t border-panelBorder p-3 md:p-4 bg-panel/50 backdrop-blur-sm shrink-0"><form class="flex gap-2 max-w-4xl mx-auto" hx-post="{action}" hx-target="#chat-root" hx-swap="outerHTML" hx-disabled-elt="find textarea, find button" x-data="{{ message: '' }}"><div class="flex-1"><textarea name="message" placeholder="{placeholder}" class="w-full min-h-[44px] max-h-[120px] md:max-h-[200px] px-4 py-3 rounded-xl border border-panelBorder bg-background text-textPrimary placeholder:text-textMuted resize-none focus:outline-none focus:ring-2 focus:ring-primary" rows="1" x-model="message" x-on:keydown.enter="if (!$event.shiftKey) {{ $event.preventDefault(); if (message.trim()) $el.form.requestSubmit() }}" required {disabled_attr}></textarea></div>{send}</form><p class="text-xs text-textMuted mt-2 text-center hidden md:block">Press Enter to send, Shift+Enter for new line</p></div>"##,
        action = attr(action_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_is_enabled() {
        let html = render_input_area("/api/conversations/abc/messages", false);
        assert!(html.contains(r#"hx-post="/api/conversations/abc/messages""#));
        assert!(!html.contains("required disabled"));
        assert!(!html.contains(r#""Send message" disabled"#));
        assert!(html.contains(r#":disabled="!message.trim()""#));
    }

    #[test]
    fn loading_input_is_disabled() {
        let html = render_input_area("/api/conversations/abc/messages", true);
        assert!(html.contains("required disabled>"));
        assert!(html.contains(r#""Send message" disabled"#));
        assert!(!html.contains(":disabled"));
    }

    #[test]
    fn shift_enter_keeps_newline() {
        let html = render_input_area("/x", false);
        assert!(html.contains("if (!$event.shiftKey) { $event.preventDefault();"));
        assert!(!html.contains("keydown.enter.prevent"));
    }
}
