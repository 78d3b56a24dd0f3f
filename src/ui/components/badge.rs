//! Badge for scores and status labels.

/// Render a pill badge around trusted `content`.
#[must_use]
pub fn badge(class: &str, content: &str) -> String {
    format!(
        r#"<span class="badge inline-flex items-center rounded-full border border-panelBorder bg-panel px-2.5 py-0.5 text-xs font-semibold text-textPrimary transition-colors {class}">{content}</span>"#
    )
}
