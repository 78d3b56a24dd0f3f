//! Chat header with panel selectors and the sidebar toggle.

use crate::session::Panel;
use crate::ui::components::{ButtonSize, ButtonVariant, button, icons, text};

/// Header bar. Panel buttons post to `{base_url}/panel/{panel}`, the toggle
/// to `{base_url}/sidebar/toggle`.
#[must_use]
pub fn render_header(
    title: &str,
    base_url: &str,
    active_panel: Panel,
    sidebar_visible: bool,
) -> String {
    let docs = panel_button(base_url, Panel::Documents, active_panel, "Docs");
    let studies = panel_button(base_url, Panel::Chart, active_panel, "Studies");

    let (toggle_icon, toggle_label) = if sidebar_visible {
        (icons::panel_close(""), "Hide results")
    } else {
        (icons::panel_open(""), "Show results")
    };
    let toggle = button(
        ButtonVariant::Ghost,
        ButtonSize::Sm,
        "sidebar-toggle",
        &format!(
            r##"hx-post="{base_url}/sidebar/toggle" hx-target="#chat-root" hx-swap="outerHTML" aria-label="{toggle_label}" aria-expanded="{sidebar_visible}""##
        ),
        &toggle_icon,
    );

    format!(
        r#"<header class="chat-header border-b border-panelBorder bg-panel shadow-sm shrink-0"><div class="flex items-center justify-between p-3 md:p-4"><div class="flex items-center gap-2 md:gap-3">{logo}<h1 class="text-lg md:text-xl font-semibold text-textPrimary">{title}</h1></div><nav class="flex items-center gap-1 md:gap-2">{docs}{studies}{toggle}</nav></div></header>"#,
        logo = icons::sparkles("h-6 w-6 text-primary"),
        title = text(title),
    )
}

fn panel_button(base_url: &str, panel: Panel, active: Panel, label: &str) -> String {
    let pressed = panel == active;
    let icon = match panel {
        Panel::Documents => icons::file_text(""),
        Panel::Chart => icons::bar_chart(""),
    };
    let class = if pressed {
        "panel-button bg-primary text-white"
    } else {
        "panel-button"
    };

    button(
        ButtonVariant::Outline,
        ButtonSize::Sm,
        class,
        &format!(
            r##"hx-post="{base_url}/panel/{panel}" hx-target="#chat-root" hx-swap="outerHTML" aria-pressed="{pressed}" data-panel="{panel}""##,
            panel = panel.as_str(),
        ),
        &format!(r#"{icon}<span class="hidden md:inline">{label}</span>"#),
    )
}
