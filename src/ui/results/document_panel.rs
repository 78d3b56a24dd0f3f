//! Retrieved documents panel.

use crate::query::RetrievedDocument;
use crate::ui::components::{badge, card, card_content, card_header, icons, text};

/// Score as a percentage with one decimal place (`0.923` -> `"92.3%"`).
///
/// Ties round away from zero (`0.3125` -> `"31.3%"`).
#[must_use]
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", (score * 1000.0).round() / 10.0)
}

fn render_document(document: &RetrievedDocument) -> String {
    let snippet = document
        .snippet
        .as_deref()
        .filter(|snippet| !snippet.is_empty())
        .map_or_else(String::new, |snippet| {
            format!(
                r#"<p class="text-xs text-textMuted line-clamp-3">{}</p>"#,
                text(snippet)
            )
        });

    card(
        "document p-3 hover:shadow-md transition-shadow",
        &format!(
            r#"<div class="flex justify-between items-start mb-2"><h4 class="font-medium text-sm leading-tight">{title}</h4>{score}</div>{snippet}"#,
            title = text(&document.title),
            score = badge("ml-2 shrink-0", &format_percent(document.score)),
        ),
    )
}

/// Ranked document list; empty string when not `visible`.
#[must_use]
pub fn render_document_panel(documents: &[RetrievedDocument], visible: bool) -> String {
    if !visible {
        return String::new();
    }

    let body = if documents.is_empty() {
        r#"<p class="text-textMuted text-center py-8">No documents retrieved yet</p>"#.to_string()
    } else {
        documents.iter().map(render_document).collect()
    };

    card(
        "document-panel h-full flex flex-col",
        &format!(
            "{header}{content}",
            header = card_header(&icons::file_text("h-5 w-5"), "Retrieved Documents"),
            content = card_content(
                "flex-1 overflow-y-auto space-y-3 p-4 pt-0",
                &body
            ),
        ),
    )
}
