// Sources widget: the web pages the model grounded its answer on.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::analysis::types::GroundingSource;
use crate::tui::ViewState;

/// Render the grounding source list into the given area.
///
/// The caller only gives this panel space when sources exist, but an
/// empty list still renders as just the frame.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = source_lines(&state.session.sources);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Data Sources (Search Grounding) "),
    );
    frame.render_widget(paragraph, area);
}

/// Format sources as numbered title lines with the URI dimmed alongside.
pub fn source_lines(sources: &[GroundingSource]) -> Vec<Line<'static>> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. {}", i + 1, source.title),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {}", source.uri),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
