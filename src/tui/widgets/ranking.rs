// Ranking keywords widget: table of SEO terms extracted from the pasted
// titles, with category and power score.

use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::analysis::types::RankingCategory;
use crate::tui::ViewState;

/// Width of the power score bar in segments.
const POWER_BAR_SEGMENTS: u32 = 10;

/// Render the ranking keyword table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Title Keyword Extractor ({}) ", state.session.ranking.len()));

    if state.session.ranking.is_empty() {
        let paragraph = Paragraph::new("  Enter data above and press Enter to analyze")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Keyword Term"),
        Cell::from("Category"),
        Cell::from("Power Score"),
        Cell::from("Occurrence"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(0);

    let scroll_offset = state.scroll_offset.get("ranking-titles").copied().unwrap_or(0);
    let visible_rows = (area.height as usize).saturating_sub(3);
    let max_offset = state.session.ranking.len().saturating_sub(1);
    let scroll_offset = scroll_offset.min(max_offset);

    let rows: Vec<Row> = state
        .session
        .ranking
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|(i, keyword)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(keyword.term.clone()),
                Cell::from(keyword.category.label())
                    .style(Style::default().fg(category_color(keyword.category))),
                Cell::from(format!("{} {:>3}", power_bar(keyword.score), keyword.score)),
                Cell::from(format!("x{}", keyword.occurrence)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(17),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Return the color for a keyword category.
pub fn category_color(category: RankingCategory) -> Color {
    match category {
        RankingCategory::HighVolume => Color::Blue,
        RankingCategory::Trending => Color::Green,
        RankingCategory::HighCtr => Color::Magenta,
        RankingCategory::SeoPower => Color::Gray,
    }
}

/// Return a visual bar for a 0-100 power score.
pub fn power_bar(score: u32) -> String {
    let filled = (score.min(100) * POWER_BAR_SEGMENTS / 100) as usize;
    let empty = POWER_BAR_SEGMENTS as usize - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
