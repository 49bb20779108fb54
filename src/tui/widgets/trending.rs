// Trending keywords widget: one card per keyword with growth, volume,
// related queries, and a 7-day trend sparkline.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::analysis::types::{TrendPoint, TrendingKeyword};
use crate::tui::ViewState;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the trending keyword cards into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Trending Keywords (7 Days) ");

    if state.session.trending.is_empty() {
        let paragraph = Paragraph::new("  Enter data above and press Enter to analyze")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let scroll_offset = state.scroll_offset.get("trending").copied().unwrap_or(0);
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = state.session.trending.len();
    let max_offset = total.saturating_sub(1);
    let scroll_offset = scroll_offset.min(max_offset);

    let items: Vec<ListItem> = state
        .session
        .trending
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|(i, keyword)| keyword_card(i, keyword))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Format one trending keyword as a multi-line card.
fn keyword_card<'a>(index: usize, keyword: &TrendingKeyword) -> ListItem<'a> {
    let growth_color = growth_color(keyword.growth_percentage);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{:>2}. {}", index + 1, keyword.keyword),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            growth_label(keyword.growth_percentage),
            Style::default().fg(growth_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Vol: {}", keyword.search_volume),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if !keyword.trend_graph_data.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", spark_line(&keyword.trend_graph_data)),
            Style::default().fg(Color::Red),
        )));
    }

    if !keyword.related_queries.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    related: {}", keyword.related_queries.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

/// Return the growth annotation for a keyword, e.g. "+120% Growth".
pub fn growth_label(growth_percentage: i64) -> String {
    format!("{:+}% Growth", growth_percentage)
}

/// Growth is green even at zero; only a decline turns red.
pub fn growth_color(growth_percentage: i64) -> Color {
    if growth_percentage >= 0 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Render trend points as a block-character sparkline.
///
/// Values are scaled to the min/max of the series; negative values are
/// clamped to zero. A flat series renders at mid height.
pub fn spark_line(points: &[TrendPoint]) -> String {
    if points.is_empty() {
        return String::new();
    }

    let values: Vec<f64> = points.iter().map(|p| p.value.max(0.0)).collect();
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    let min = values.iter().cloned().fold(f64::MAX, f64::min);
    let range = max - min;

    values
        .iter()
        .map(|v| {
            let level = if range <= f64::EPSILON {
                3
            } else {
                (((v - min) / range) * 7.0).round() as usize
            };
            SPARK_LEVELS[level.min(7)]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
