//! Inline SVG icons (lucide paths).

/// Common icon size class.
const ICON_SIZE: &str = "h-4 w-4";

fn svg(class: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="{ICON_SIZE} {class}" aria-hidden="true">{body}</svg>"#
    )
}

/// Send/paper-plane icon.
#[must_use]
pub fn send(class: &str) -> String {
    svg(
        class,
        r#"<line x1="22" y1="2" x2="11" y2="13"/><polygon points="22 2 15 22 11 13 2 9 22 2"/>"#,
    )
}

/// Loader/spinner icon.
#[must_use]
pub fn loader(class: &str) -> String {
    svg(
        &format!("animate-spin {class}"),
        r#"<path d="M21 12a9 9 0 1 1-6.219-8.56"/>"#,
    )
}

/// Sparkles icon for the app title.
#[must_use]
pub fn sparkles(class: &str) -> String {
    svg(
        class,
        r#"<path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z"/>"#,
    )
}

/// Document icon for the documents panel.
#[must_use]
pub fn file_text(class: &str) -> String {
    svg(
        class,
        r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/><path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M10 9H8"/><path d="M16 13H8"/><path d="M16 17H8"/>"#,
    )
}

/// Bar chart icon for the studies panel.
#[must_use]
pub fn bar_chart(class: &str) -> String {
    svg(
        class,
        r#"<path d="M3 3v18h18"/><path d="M18 17V9"/><path d="M13 17V5"/><path d="M8 17v-3"/>"#,
    )
}

/// Sidebar icon shown while the sidebar is hidden.
#[must_use]
pub fn panel_open(class: &str) -> String {
    svg(
        class,
        r#"<rect width="18" height="18" x="3" y="3" rx="2"/><path d="M9 3v18"/><path d="m14 9 3 3-3 3"/>"#,
    )
}

/// Sidebar icon shown while the sidebar is visible.
#[must_use]
pub fn panel_close(class: &str) -> String {
    svg(
        class,
        r#"<rect width="18" height="18" x="3" y="3" rx="2"/><path d="M9 3v18"/><path d="m16 15-3-3 3-3"/>"#,
    )
}
