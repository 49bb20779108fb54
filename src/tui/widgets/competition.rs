// Zero-competition widget: competition score, volume stats, and the
// opportunity analysis for the searched keyword.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::analysis::types::DifficultyLabel;
use crate::tui::ViewState;

/// Width of the competition score bar in segments.
const SCORE_BAR_SEGMENTS: u32 = 20;

/// Render the zero-competition result into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Zero Competition Finder ");

    let Some(result) = &state.session.competition else {
        let paragraph = Paragraph::new("  Enter data above and press Enter to analyze")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let color = score_color(result.competition_score);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                result.keyword.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", result.difficulty_label.label()),
                Style::default()
                    .fg(difficulty_color(result.difficulty_label))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Competition Score  ", Style::default().fg(Color::Gray)),
            Span::styled(score_bar(result.competition_score), Style::default().fg(color)),
            Span::styled(
                format!(" {}/100", result.competition_score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        stat_line("Search Volume", &result.search_volume_estimate),
        stat_line("Video Count", &result.video_count),
        stat_line("Avg Views (Top 10)", &result.avg_views),
        Line::from(""),
        Line::from(Span::styled(
            "Top Ranking Channels",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if result.top_channels.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none reported)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for channel in &result.top_channels {
            lines.push(Line::from(format!("  - {}", channel)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Opportunity Analysis",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(result.opportunity_analysis.clone()));

    let scroll = state
        .scroll_offset
        .get("zero-competition")
        .copied()
        .unwrap_or(0) as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn stat_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<20}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Return a visual bar for a 0-100 competition score.
pub fn score_bar(score: u32) -> String {
    let filled = (score.min(100) * SCORE_BAR_SEGMENTS / 100) as usize;
    let empty = SCORE_BAR_SEGMENTS as usize - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

/// Return the color for a competition score: low scores are the opportunity.
pub fn score_color(score: u32) -> Color {
    if score < 20 {
        Color::Green
    } else if score < 50 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Return the color for a difficulty label.
pub fn difficulty_color(label: DifficultyLabel) -> Color {
    match label {
        DifficultyLabel::Zero => Color::Green,
        DifficultyLabel::Low => Color::Green,
        DifficultyLabel::Medium => Color::Yellow,
        DifficultyLabel::High => Color::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
