//! Card container with header and content sections.

/// Card container.
#[must_use]
pub fn card(class: &str, content: &str) -> String {
    format!(
        r#"<div class="card rounded-xl border border-panelBorder bg-panel text-textPrimary shadow-sm {class}">{content}</div>"#
    )
}

/// Card header holding an icon and a title.
#[must_use]
pub fn card_header(icon: &str, title: &str) -> String {
    format!(
        r#"<div class="card-header flex flex-col space-y-1.5 p-4 pb-3 shrink-0"><h3 class="flex items-center gap-2 text-lg font-semibold">{icon}{title}</h3></div>"#
    )
}

/// Card body section.
#[must_use]
pub fn card_content(class: &str, content: &str) -> String {
    format!(r#"<div class="card-content {class}">{content}</div>"#)
}
