// Status bar widget: tab selector and fetch status indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{AnalysisTab, FetchStatus};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [tab bar] [fetch status]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        " TubeRank ",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));

    spans.extend(tab_spans(state.session.active_tab));

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    let (label, color) = status_indicator(state.session.status);
    spans.push(Span::styled(label, Style::default().fg(color)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Build tab indicator spans with descriptive labels and active tab highlighted.
/// E.g. "[1:Competition] [2:Trending] [3:Titles] [4:Niche]"
pub fn tab_spans(active: AnalysisTab) -> Vec<Span<'static>> {
    let tabs = [
        (AnalysisTab::ZeroCompetition, "1:Competition"),
        (AnalysisTab::Trending, "2:Trending"),
        (AnalysisTab::RankingTitles, "3:Titles"),
        (AnalysisTab::NicheEngine, "4:Niche"),
    ];

    let mut spans = Vec::new();
    for (tab, label) in tabs {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Return the fetch status label and its color.
pub fn status_indicator(status: FetchStatus) -> (&'static str, Color) {
    match status {
        FetchStatus::Idle => ("idle", Color::DarkGray),
        FetchStatus::Loading => ("Analyzing...", Color::Yellow),
        FetchStatus::Success => ("ready", Color::Green),
        FetchStatus::Error => ("error", Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
