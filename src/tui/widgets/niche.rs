// Niche strategy widget: sub-topic trends, viral video ideas, and the
// channels dominating the niche.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::analysis::types::ViralPotential;
use crate::tui::ViewState;

/// Render the niche strategy bundle into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Niche Strategy Engine ");

    let Some(bundle) = &state.session.niche else {
        let paragraph = Paragraph::new("  Enter data above and press Enter to analyze")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![section("Sub-Topic Trends")];
    for trend in &bundle.trends {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<28}", trend.keyword),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:+}%", trend.growth_percentage),
                Style::default().fg(if trend.growth_percentage >= 0 {
                    Color::Green
                } else {
                    Color::Red
                }),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section("Viral Video Ideas"));
    for idea in &bundle.ideas {
        let (badge, badge_color) = potential_badge(idea.viral_potential);
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{}] ", badge),
                Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                idea.topic.to_uppercase(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  \"{}\"", idea.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", idea.reasoning),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section("Top Channels"));
    for channel in &bundle.top_channels {
        lines.push(Line::from(format!("  - {}", channel)));
    }

    let scroll = state
        .scroll_offset
        .get("niche-engine")
        .copied()
        .unwrap_or(0) as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Return the badge text and color for a viral potential rating.
pub fn potential_badge(potential: ViralPotential) -> (&'static str, Color) {
    match potential {
        ViralPotential::High => ("HIGH", Color::Red),
        ViralPotential::Medium => ("MEDIUM", Color::Yellow),
        ViralPotential::Low => ("LOW", Color::DarkGray),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{NicheBundle, NicheIdea, TrendingKeyword};

    fn sample_bundle() -> NicheBundle {
        NicheBundle {
            trends: vec![TrendingKeyword {
                keyword: "dopamine detox".to_string(),
                growth_percentage: 40,
                search_volume: "20k".to_string(),
                related_queries: vec![],
                trend_graph_data: vec![],
            }],
            ideas: vec![NicheIdea {
                title: "I Tried a Dopamine Detox for 30 Days".to_string(),
                topic: "Self Improvement".to_string(),
                viral_potential: ViralPotential::High,
                reasoning: "Strong curiosity hook with a time-boxed experiment.".to_string(),
            }],
            top_channels: vec!["HealthyGamerGG".to_string(), "Better Ideas".to_string()],
        }
    }

    #[test]
    fn potential_badge_values() {
        assert_eq!(potential_badge(ViralPotential::High), ("HIGH", Color::Red));
        assert_eq!(
            potential_badge(ViralPotential::Medium),
            ("MEDIUM", Color::Yellow)
        );
        assert_eq!(potential_badge(ViralPotential::Low), ("LOW", Color::DarkGray));
    }

    #[test]
    fn render_does_not_panic_without_result() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_result() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.session.niche = Some(sample_bundle());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_empty_sections() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.session.niche = Some(NicheBundle {
            trends: vec![],
            ideas: vec![],
            top_channels: vec![],
        });
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
