// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the research dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Input Panel (4 rows)                              |
// +--------------------------------------------------+
// | Results (fill)                                    |
// +--------------------------------------------------+
// | Sources (6 rows, only when grounding is present)  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: tab selector and fetch status.
    pub status_bar: Rect,
    /// Second zone: the active tab's input field.
    pub input_panel: Rect,
    /// Middle section: tab-switched result content.
    pub results: Rect,
    /// Below the results: grounding sources, collapsed when empty.
    pub sources: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
///
/// Fixed heights for the status bar, input panel, and help bar; the
/// results zone takes the rest. The sources zone only gets rows when
/// `show_sources` is set, otherwise it collapses to zero height.
pub fn build_layout(area: Rect, show_sources: bool) -> AppLayout {
    let sources_height = if show_sources { 6 } else { 0 };

    // Vertical: status(1) | input(4) | results(fill) | sources(6|0) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // status bar
            Constraint::Length(4),              // input panel
            Constraint::Min(8),                 // results
            Constraint::Length(sources_height), // grounding sources
            Constraint::Length(1),              // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        input_panel: vertical[1],
        results: vertical[2],
        sources: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_visible_rects_nonzero() {
        let layout = build_layout(test_area(), true);
        let rects = [
            ("status_bar", layout.status_bar),
            ("input_panel", layout.input_panel),
            ("results", layout.results),
            ("sources", layout.sources),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_status_bar_height_is_one() {
        let layout = build_layout(test_area(), true);
        assert_eq!(
            layout.status_bar.height, 1,
            "Status bar should be exactly 1 row"
        );
    }

    #[test]
    fn layout_input_panel_height_is_four() {
        let layout = build_layout(test_area(), true);
        assert_eq!(
            layout.input_panel.height, 4,
            "Input panel should be exactly 4 rows"
        );
    }

    #[test]
    fn layout_help_bar_height_is_one() {
        let layout = build_layout(test_area(), false);
        assert_eq!(
            layout.help_bar.height, 1,
            "Help bar should be exactly 1 row"
        );
    }

    #[test]
    fn layout_sources_collapse_when_hidden() {
        let hidden = build_layout(test_area(), false);
        assert_eq!(hidden.sources.height, 0, "Hidden sources should collapse");

        let shown = build_layout(test_area(), true);
        assert_eq!(shown.sources.height, 6, "Shown sources should be 6 rows");
    }

    #[test]
    fn layout_results_reclaim_hidden_source_rows() {
        let hidden = build_layout(test_area(), false);
        let shown = build_layout(test_area(), true);
        assert_eq!(
            hidden.results.height,
            shown.results.height + 6,
            "Results should absorb the collapsed sources rows"
        );
    }

    #[test]
    fn layout_zones_stack_vertically() {
        let layout = build_layout(test_area(), true);
        assert!(layout.status_bar.y < layout.input_panel.y);
        assert!(layout.input_panel.y < layout.results.y);
        assert!(layout.results.y < layout.sources.y);
        assert!(layout.sources.y < layout.help_bar.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area, true);
        let all_rects = [
            layout.status_bar,
            layout.input_panel,
            layout.results,
            layout.sources,
            layout.help_bar,
        ];
        for rect in &all_rects {
            assert!(
                rect.x + rect.width <= area.width,
                "Rect {:?} exceeds area width {}",
                rect,
                area.width
            );
            assert!(
                rect.y + rect.height <= area.height,
                "Rect {:?} exceeds area height {}",
                rect,
                area.height
            );
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        // Minimum viable terminal size
        let area = Rect::new(0, 0, 40, 16);
        let layout = build_layout(area, false);
        let rects = [
            layout.status_bar,
            layout.input_panel,
            layout.results,
            layout.help_bar,
        ];
        for rect in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "Small terminal: rect {:?} has zero area",
                rect
            );
        }
    }
}
