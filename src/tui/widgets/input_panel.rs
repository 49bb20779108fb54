// Input panel widget: the active tab's query input with a per-tab
// placeholder and the grounding attribution line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::AnalysisTab;
use crate::tui::ViewState;

/// Render the input panel into the given area.
///
/// Shows the active tab's input buffer, or a dim placeholder when the
/// buffer is empty. While editing, the border turns yellow and a block
/// cursor is appended to the text.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let tab = state.session.active_tab;
    let value = input_value(state, tab);

    let mut input_spans = Vec::new();
    if value.is_empty() && !state.editing {
        input_spans.push(Span::styled(
            placeholder(tab),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        input_spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ));
        if state.editing {
            input_spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
    }

    let attribution = Line::from(Span::styled(
        "Powered by Gemini 2.5 Flash Search Grounding",
        Style::default().fg(Color::DarkGray),
    ));

    let border = if state.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(vec![Line::from(input_spans), attribution]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", tab.title())),
    );
    frame.render_widget(paragraph, area);
}

/// The input buffer backing a tab.
pub fn input_value<'a>(state: &'a ViewState, tab: AnalysisTab) -> &'a str {
    match tab {
        AnalysisTab::ZeroCompetition => &state.keyword_input,
        AnalysisTab::Trending | AnalysisTab::NicheEngine => &state.niche_input,
        AnalysisTab::RankingTitles => &state.titles_input,
    }
}

/// Placeholder shown while a tab's input is empty.
pub fn placeholder(tab: AnalysisTab) -> &'static str {
    match tab {
        AnalysisTab::ZeroCompetition => "Enter a keyword (e.g. 'vegan recipes for beginners')",
        AnalysisTab::Trending => "Enter a niche (Tab cycles presets)",
        AnalysisTab::RankingTitles => "Paste video titles separated by ';'",
        AnalysisTab::NicheEngine => "Enter a niche (Tab cycles presets)",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_value_tracks_active_tab() {
        let mut state = ViewState::default();
        state.keyword_input = "keyword".to_string();
        state.niche_input = "niche".to_string();
        state.titles_input = "a; b".to_string();

        assert_eq!(input_value(&state, AnalysisTab::ZeroCompetition), "keyword");
        assert_eq!(input_value(&state, AnalysisTab::Trending), "niche");
        assert_eq!(input_value(&state, AnalysisTab::NicheEngine), "niche");
        assert_eq!(input_value(&state, AnalysisTab::RankingTitles), "a; b");
    }

    #[test]
    fn placeholder_mentions_separator_for_titles() {
        assert!(placeholder(AnalysisTab::RankingTitles).contains(';'));
    }

    #[test]
    fn placeholder_mentions_presets_for_niche_tabs() {
        assert!(placeholder(AnalysisTab::Trending).contains("preset"));
        assert!(placeholder(AnalysisTab::NicheEngine).contains("preset"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_while_editing() {
        let backend = ratatui::backend::TestBackend::new(80, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.editing = true;
        state.keyword_input = "retro gaming".to_string();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
