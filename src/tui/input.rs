// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app controller, or into local ViewState mutations (e.g. editing the
// active tab's input, scrolling, cycling niche presets).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::{AnalysisTab, FetchStatus, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app controller (e.g. SwitchTab, Analyze, Quit). Returns `None`
/// when the key press was handled locally by mutating `ViewState`
/// (e.g. editing input text, scrolling).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Quit confirmation mode: only y/q confirm, n/Esc cancel, everything else blocked
    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    // Editing mode: capture printable characters into the active input
    if view_state.editing {
        return handle_editing_mode(key_event, view_state);
    }

    // Normal mode key dispatch
    match key_event.code {
        // Tab switching goes through the controller so the reducer can
        // clear stale error and source state.
        KeyCode::Char('1') => Some(UserCommand::SwitchTab(AnalysisTab::ZeroCompetition)),
        KeyCode::Char('2') => Some(UserCommand::SwitchTab(AnalysisTab::Trending)),
        KeyCode::Char('3') => Some(UserCommand::SwitchTab(AnalysisTab::RankingTitles)),
        KeyCode::Char('4') => Some(UserCommand::SwitchTab(AnalysisTab::NicheEngine)),

        // Input editing
        KeyCode::Char('i') => {
            view_state.editing = true;
            None
        }

        // Niche preset cycling, only where a niche input is in play
        KeyCode::Tab => {
            cycle_niche_preset(view_state);
            None
        }

        // Re-submit the current input without re-entering editing mode
        KeyCode::Enter => submit_command(view_state),

        // CSV export of the active tab
        KeyCode::Char('x') => Some(UserCommand::ExportCsv),

        // Scrolling (results panel)
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, page_size());
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, page_size());
            None
        }

        // Escape: dismiss the export notice if one is showing
        KeyCode::Esc => {
            view_state.notice = None;
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Handle key events while in quit confirmation mode.
///
/// In quit confirmation mode:
/// - `y` or `q` confirms quit (sends UserCommand::Quit)
/// - `n` or `Esc` cancels (returns to normal mode)
/// - All other keys are blocked (no-op)
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None, // Block all other input
    }
}

/// Handle key events while in editing mode.
///
/// In editing mode:
/// - Printable characters are appended to the active tab's input
/// - Backspace removes the last character
/// - Enter exits editing mode and submits the input
/// - Esc exits editing mode and keeps the text
fn handle_editing_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.editing = false;
            None
        }
        KeyCode::Enter => {
            view_state.editing = false;
            submit_command(view_state)
        }
        KeyCode::Backspace => {
            active_input_mut(view_state).pop();
            None
        }
        KeyCode::Char(c) => {
            active_input_mut(view_state).push(c);
            None
        }
        _ => None,
    }
}

/// Build the Analyze command for the active tab's current input.
///
/// Returns `None` while a fetch is already loading; the input is kept so
/// the user can submit once the in-flight analysis settles. An empty or
/// whitespace-only input is still submitted: the controller rejects it
/// with the tab's validation message.
fn submit_command(view_state: &ViewState) -> Option<UserCommand> {
    if view_state.session.status == FetchStatus::Loading {
        return None;
    }
    let tab = view_state.session.active_tab;
    Some(UserCommand::Analyze {
        tab,
        input: current_input(view_state),
    })
}

/// The active tab's input, normalized for submission.
///
/// Ranking titles are entered on one line separated by `;` and expanded
/// to one title per line, which is how the prompt wants them.
fn current_input(view_state: &ViewState) -> String {
    match view_state.session.active_tab {
        AnalysisTab::ZeroCompetition => view_state.keyword_input.trim().to_string(),
        AnalysisTab::Trending | AnalysisTab::NicheEngine => {
            view_state.niche_input.trim().to_string()
        }
        AnalysisTab::RankingTitles => view_state
            .titles_input
            .split(';')
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Mutable access to the input buffer backing the active tab.
fn active_input_mut(view_state: &mut ViewState) -> &mut String {
    match view_state.session.active_tab {
        AnalysisTab::ZeroCompetition => &mut view_state.keyword_input,
        AnalysisTab::Trending | AnalysisTab::NicheEngine => &mut view_state.niche_input,
        AnalysisTab::RankingTitles => &mut view_state.titles_input,
    }
}

/// Advance the niche input to the next configured preset.
///
/// Only active on the tabs that take a niche; if the current input is not
/// one of the presets the cycle restarts from the first.
fn cycle_niche_preset(view_state: &mut ViewState) {
    let on_niche_tab = matches!(
        view_state.session.active_tab,
        AnalysisTab::Trending | AnalysisTab::NicheEngine
    );
    if !on_niche_tab || view_state.niche_presets.is_empty() {
        return;
    }

    let next = match view_state
        .niche_presets
        .iter()
        .position(|preset| preset == &view_state.niche_input)
    {
        Some(i) => (i + 1) % view_state.niche_presets.len(),
        None => 0,
    };
    view_state.niche_input = view_state.niche_presets[next].clone();
}

/// Get the widget key for scroll state based on the active tab.
fn active_scroll_key(view_state: &ViewState) -> &'static str {
    view_state.session.active_tab.slug()
}

/// Scroll up by the given number of lines.
fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let key = active_scroll_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll down by the given number of lines.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let key = active_scroll_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
