//! Chat message list.

use chrono::{DateTime, FixedOffset, Utc};

use crate::session::ChatTurn;
use crate::ui::components::{attr, icons, text};

/// `HH:MM` time-of-day label in `offset`.
#[must_use]
pub fn format_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%H:%M").to_string()
}

/// One chat bubble. User turns sit right in the primary colour, assistant
/// turns sit left in the muted message colour.
#[must_use]
pub fn render_message(turn: &ChatTurn, offset: FixedOffset) -> String {
    let (row, bubble, time_align, author) = if turn.is_from_user() {
        (
            "justify-end",
            "message--user bg-primary text-white rounded-br-sm",
            "text-right",
            "user",
        )
    } else {
        (
            "justify-start",
            "message--assistant bg-messageAi text-textPrimary rounded-bl-sm",
            "text-left",
            "assistant",
        )
    };

    format!(
        r#"<div class="message flex w-full mb-4 {row}" data-turn-id="{id}" data-author="{author}"><div class="max-w-[80%] rounded-lg px-4 py-3 shadow-md {bubble}"><p class="text-sm leading-relaxed whitespace-pre-wrap">{body}</p><p class="text-xs mt-1 opacity-70 {time_align}"><time datetime="{datetime}">{label}</time></p></div></div>"#,
        id = attr(turn.id()),
        body = text(turn.text()),
        datetime = turn.sent_at().to_rfc3339(),
        label = format_time(turn.sent_at(), offset),
    )
}

/// All turns in order, scrolled to the newest one.
///
/// With `pending_url` set, a "searching" indicator follows the last turn and
/// fetches `pending_url` as soon as it is swapped in.
#[must_use]
pub fn render_message_list(
    turns: &[ChatTurn],
    offset: FixedOffset,
    pending_url: Option<&str>,
) -> String {
    let messages: String = turns
        .iter()
        .map(|turn| render_message(turn, offset))
        .collect();

    let pending = pending_url.map_or_else(String::new, |url| {
        format!(
            r##"<div class="thinking flex items-center gap-2 text-sm text-textMuted" hx-get="{url}" hx-trigger="load" hx-target="#chat-root" hx-swap="outerHTML">{spinner}<span>Searching documents...</span></div>"##,
            url = attr(url),
            spinner = icons::loader(""),
        )
    });

    format!(
        r#"<div id="message-list" class="message-list flex-1 overflow-y-auto p-3 md:p-4" x-data x-init="$nextTick(() => {{ $el.scrollTop = $el.scrollHeight }})" aria-live="polite" aria-label="Chat messages"><div class="w-full max-w-4xl mx-auto space-y-4">{messages}{pending}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    #[test]
    fn time_label_uses_offset() {
        let at = Utc.with_ymd_and_hms(2024, 7, 20, 20, 17, 40).unwrap();
        assert_eq!(format_time(at, Utc.fix()), "20:17");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_time(at, tokyo), "05:17");
    }

    #[test]
    fn user_and_assistant_are_distinguished() {
        let user = render_message(&ChatTurn::user("Hi"), Utc.fix());
        let bot = render_message(&ChatTurn::assistant("Hello"), Utc.fix());

        assert!(user.contains("justify-end"));
        assert!(user.contains(r#"data-author="user""#));
        assert!(bot.contains("justify-start"));
        assert!(bot.contains(r#"data-author="assistant""#));
        assert!(user.contains("<time datetime="));
    }

    #[test]
    fn message_text_is_escaped() {
        let html = render_message(&ChatTurn::user("<script>alert(1)</script>"), Utc.fix());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn list_keeps_order_and_autoscrolls() {
        let turns = vec![
            ChatTurn::assistant("first"),
            ChatTurn::user("second"),
            ChatTurn::assistant("third"),
        ];
        let html = render_message_list(&turns, Utc.fix(), None);

        let a = html.find("first").unwrap();
        let b = html.find("second").unwrap();
        let c = html.find("third").unwrap();
        assert!(a < b && b < c);
        assert!(html.contains("$el.scrollTop = $el.scrollHeight"));
        assert!(!html.contains("thinking"));
    }

    #[test]
    fn pending_indicator_polls() {
        let html = render_message_list(&[], Utc.fix(), Some("/api/conversations/x/shell?wait=true"));
        assert!(html.contains(r#"hx-get="/api/conversations/x/shell?wait=true""#));
        assert!(html.contains(r#"hx-trigger="load""#));
    }
}
