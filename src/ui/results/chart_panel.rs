//! "Top related studies" horizontal bar chart, rendered as inline SVG.

use crate::query::StudyRecord;
use crate::ui::components::{attr, card, card_content, card_header, icons, text};

/// Longest category label before it gets an ellipsis.
pub const MAX_LABEL_CHARS: usize = 20;

const AXIS_TICKS: [u8; 5] = [0, 25, 50, 75, 100];

// Geometry in SVG user units.
const LABEL_WIDTH: f64 = 130.0;
const PLOT_WIDTH: f64 = 240.0;
const RIGHT_MARGIN: f64 = 30.0;
const ROW_HEIGHT: f64 = 36.0;
const BAR_HEIGHT: f64 = 22.0;
const TOP_MARGIN: f64 = 5.0;
const AXIS_HEIGHT: f64 = 24.0;

/// Shorten `title` to [`MAX_LABEL_CHARS`] characters plus `...`.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_LABEL_CHARS {
        let head: String = title.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// One chart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    /// Axis label, possibly truncated.
    pub label: String,
    /// Untruncated title for the tooltip.
    pub full_title: String,
    /// Score in whole percent, `0..=100`.
    pub percent: u8,
}

impl ChartBar {
    /// Build a bar from a study.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_study(study: &StudyRecord) -> Self {
        let percent = (study.score * 100.0).round().clamp(0.0, 100.0) as u8;
        Self {
            label: truncate_title(&study.title),
            full_title: study.title.clone(),
            percent,
        }
    }

    /// Hover text: full title and score.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!("{}: {}% Relevance Score", self.full_title, self.percent)
    }
}

/// Bars for `studies`, in order.
#[must_use]
pub fn chart_bars(studies: &[StudyRecord]) -> Vec<ChartBar> {
    studies.iter().map(ChartBar::from_study).collect()
}

fn x_for(percent: u8) -> f64 {
    LABEL_WIDTH + PLOT_WIDTH * f64::from(percent) / 100.0
}

fn render_svg(bars: &[ChartBar]) -> String {
    let rows = f64::from(u32::try_from(bars.len()).unwrap_or(u32::MAX));
    let plot_bottom = TOP_MARGIN + rows * ROW_HEIGHT;
    let height = plot_bottom + AXIS_HEIGHT;
    let width = LABEL_WIDTH + PLOT_WIDTH + RIGHT_MARGIN;

    let mut svg = format!(
        r#"<svg class="studies-chart w-full h-auto" viewBox="0 0 {width} {height}" role="img" aria-label="Relevance of top related studies" xmlns="http://www.w3.org/2000/svg">"#
    );

    for tick in AXIS_TICKS {
        let x = x_for(tick);
        svg.push_str(&format!(
            r#"<line class="grid-line opacity-30" x1="{x}" y1="{TOP_MARGIN}" x2="{x}" y2="{plot_bottom}" stroke="currentColor" stroke-dasharray="3 3"/><text class="axis-tick" x="{x}" y="{y}" text-anchor="middle" font-size="11" fill="currentColor">{tick}%</text>"#,
            y = plot_bottom + 16.0,
        ));
    }

    let mut y = TOP_MARGIN;
    for bar in bars {
        let bar_y = y + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
        let text_y = y + ROW_HEIGHT / 2.0 + 4.0;
        svg.push_str(&format!(
            r#"<g class="chart-bar" data-full-title="{full_attr}"><title>{tooltip}</title><text class="bar-label" x="{label_x}" y="{text_y}" text-anchor="end" font-size="11" fill="currentColor">{label}</text><rect class="bar text-primary" x="{LABEL_WIDTH}" y="{bar_y}" width="{bar_width}" height="{BAR_HEIGHT}" rx="4" fill="currentColor"/><text class="bar-value" x="{value_x}" y="{text_y}" font-size="11" fill="currentColor">{percent}%</text></g>"#,
            full_attr = attr(&bar.full_title),
            tooltip = text(&bar.tooltip()),
            label_x = LABEL_WIDTH - 6.0,
            label = text(&bar.label),
            bar_width = x_for(bar.percent) - LABEL_WIDTH,
            value_x = x_for(bar.percent) + 4.0,
            percent = bar.percent,
        ));
        y += ROW_HEIGHT;
    }

    svg.push_str("</svg>");
    svg
}

/// Chart card; empty string when not `visible`.
#[must_use]
pub fn render_chart_panel(studies: &[StudyRecord], visible: bool) -> String {
    if !visible {
        return String::new();
    }

    let body = if studies.is_empty() {
        r#"<div class="text-textMuted text-center py-8">No studies data available</div>"#
            .to_string()
    } else {
        format!(
            r#"<div class="h-full w-full">{}</div>"#,
            render_svg(&chart_bars(studies))
        )
    };

    card(
        "chart-panel h-full flex flex-col",
        &format!(
            "{header}{content}",
            header = card_header(&icons::bar_chart("h-5 w-5"), "Top Related Studies"),
            content = card_content("flex-1 overflow-y-auto p-4 pt-0", &body),
        ),
    )
}
