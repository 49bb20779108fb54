// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the controller's session state
// plus purely local concerns (input buffers, scroll offsets, modals).
// The controller pushes `UiUpdate` messages over an mpsc channel; the
// TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::analysis::session::SessionState;
use crate::protocol::{AnalysisTab, FetchStatus, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state for rendering.
///
/// `session` is a mirror of the controller's session state, replaced
/// wholesale on every snapshot. Everything else is local to the view and
/// survives snapshots: input buffers, editing and modal flags, scroll
/// offsets, and the export notice.
pub struct ViewState {
    /// Latest session snapshot from the controller.
    pub session: SessionState,
    /// Input buffer for the zero-competition tab.
    pub keyword_input: String,
    /// Input buffer shared by the trending and niche tabs.
    pub niche_input: String,
    /// Input buffer for the ranking-titles tab, `;`-separated.
    pub titles_input: String,
    /// Whether keystrokes currently edit the active input.
    pub editing: bool,
    /// Whether the quit confirmation modal is showing.
    pub confirm_quit: bool,
    /// Niche presets cycled with Tab, from configuration.
    pub niche_presets: Vec<String>,
    /// Per-widget scroll offsets (keyed by tab slug).
    pub scroll_offset: HashMap<String, usize>,
    /// Transient export outcome shown in the help bar.
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Vec::new())
    }
}

impl ViewState {
    /// Build the initial view state. The niche input starts on the first
    /// configured preset.
    pub fn new(niche_presets: Vec<String>) -> Self {
        let niche_input = niche_presets
            .first()
            .cloned()
            .unwrap_or_else(|| "Psychology".to_string());
        ViewState {
            session: SessionState::default(),
            keyword_input: String::new(),
            niche_input,
            titles_input: String::new(),
            editing: false,
            confirm_quit: false,
            niche_presets,
            scroll_offset: HashMap::new(),
            notice: None,
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SessionSnapshot(snapshot) => {
            state.session = *snapshot;
        }
        UiUpdate::ExportCompleted(path) => {
            state.notice = Some(format!("Exported {}", path.display()));
        }
        UiUpdate::ExportFailed(message) => {
            state.notice = Some(format!("Export failed: {}", message));
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let show_sources = !state.session.sources.is_empty();
    let layout = build_layout(frame.area(), show_sources);

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::input_panel::render(frame, layout.input_panel, state);
    render_results(frame, layout.results, state);
    if show_sources {
        widgets::sources::render(frame, layout.sources, state);
    }
    render_help_bar(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area(), state);
    }
}

/// Render the results zone: loading and error states win over content.
fn render_results(frame: &mut Frame, area: Rect, state: &ViewState) {
    match state.session.status {
        FetchStatus::Loading => render_loading(frame, area),
        FetchStatus::Error => render_error(frame, area, state),
        _ => match state.session.active_tab {
            AnalysisTab::ZeroCompetition => widgets::competition::render(frame, area, state),
            AnalysisTab::Trending => widgets::trending::render(frame, area, state),
            AnalysisTab::RankingTitles => widgets::ranking::render(frame, area, state),
            AnalysisTab::NicheEngine => widgets::niche::render(frame, area, state),
        },
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Analyzing YouTube Data...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Searching Google & Processing Results",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Working "));
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, area: Rect, state: &ViewState) {
    let message = state.session.error.as_deref().unwrap_or("Unknown error");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Analysis Failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  {}", message)),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error "),
    );
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, style) = match &state.notice {
        Some(notice) => (
            format!(" {} (Esc to dismiss)", notice),
            Style::default().fg(Color::Yellow),
        ),
        None => (
            " q:Quit | 1-4:Tabs | i:Edit | Enter:Analyze | Tab:Preset | x:Export | j/k:Scroll"
                .to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::DIM),
        ),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    niche_presets: Vec<String>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Set panic hook to restore terminal on crash.
    //    We capture the original hook and chain ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create ViewState
    let mut view_state = ViewState::new(niche_presets);

    // 4. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 5. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    loop {
        tokio::select! {
            // UI updates from the controller
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let is_quit = matches!(cmd, UserCommand::Quit);
                            let _ = cmd_tx.send(cmd).await;
                            if is_quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) => {
                        // Input error -- break out
                        break;
                    }
                    None => {
                        // Stream ended
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 7. Restore terminal
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
