//! Results sidebar panels.

mod chart_panel;
mod document_panel;

pub use chart_panel::{ChartBar, MAX_LABEL_CHARS, chart_bars, render_chart_panel, truncate_title};
pub use document_panel::{format_percent, render_document_panel};
