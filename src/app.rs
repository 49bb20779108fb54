// Application controller: owns the session state and coordinates fetch
// tasks against user commands.
//
// The controller is the only writer of session state. The TUI task sends
// UserCommands, spawned fetch tasks send FetchEvents, and every
// transition goes through the reducer; the resulting snapshot is pushed
// back to the TUI over the ui channel.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::analysis::session::{self, Action, SessionState};
use crate::config::Config;
use crate::export;
use crate::llm::client::LlmClient;
use crate::protocol::{AnalysisTab, FetchEvent, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Mutable state owned by the controller task.
pub struct AppState {
    pub config: Config,
    pub session: SessionState,
    /// Client shared with spawned fetch tasks.
    pub llm_client: Arc<LlmClient>,
    /// Sender cloned into each fetch task so it can report its outcome.
    pub fetch_tx: mpsc::Sender<FetchEvent>,
    /// Handle for the in-flight fetch task, if any. Aborted when a new
    /// submission replaces it.
    pub current_fetch: Option<JoinHandle<()>>,
    /// Monotonic counter tagging each spawned fetch. u64 overflow is not
    /// a practical concern: at one fetch per second it would take ~584
    /// billion years to wrap.
    pub fetch_generation: u64,
    /// Latest generation issued per tab. Events whose generation does not
    /// match the entry for their tab are stale and dropped.
    pub latest_request: HashMap<AnalysisTab, u64>,
}

impl AppState {
    pub fn new(config: Config, llm_client: LlmClient, fetch_tx: mpsc::Sender<FetchEvent>) -> Self {
        AppState {
            config,
            session: SessionState::default(),
            llm_client: Arc::new(llm_client),
            fetch_tx,
            current_fetch: None,
            fetch_generation: 0,
            latest_request: HashMap::new(),
        }
    }

    /// Abort the in-flight fetch task, if any.
    pub fn cancel_fetch_task(&mut self) {
        if let Some(handle) = self.current_fetch.take() {
            handle.abort();
            info!("Cancelled in-flight fetch task");
        }
    }

    /// Validate and submit `input` for analysis on `tab`.
    ///
    /// An empty input is rejected with the tab's validation message and no
    /// fetch is spawned. Otherwise any in-flight fetch is replaced: its
    /// task is aborted and its generation superseded, so even a result
    /// that slips through the abort is discarded on arrival.
    pub fn trigger_analysis(&mut self, tab: AnalysisTab, input: String) {
        if input.is_empty() {
            info!(tab = tab.slug(), "Rejected empty submission");
            session::reduce(
                &mut self.session,
                Action::SubmitRejected {
                    message: session::validation_message(tab).to_string(),
                },
            );
            return;
        }

        self.cancel_fetch_task();

        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.latest_request.insert(tab, generation);
        session::reduce(&mut self.session, Action::FetchStarted);

        let client = Arc::clone(&self.llm_client);
        let tx = self.fetch_tx.clone();
        let handle = tokio::spawn(async move {
            client.run_analysis(tab, input, tx, generation).await;
        });
        self.current_fetch = Some(handle);
        info!(tab = tab.slug(), generation, "Analysis fetch spawned");
    }
}

// ---------------------------------------------------------------------------
// Event handlers
// ---------------------------------------------------------------------------

/// Apply a completed or failed fetch to the session, unless it is stale.
pub async fn handle_fetch_event(
    state: &mut AppState,
    event: FetchEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let (tab, generation) = event.request_key();
    if state.latest_request.get(&tab) != Some(&generation) {
        debug!(tab = tab.slug(), generation, "Discarding stale fetch event");
        return;
    }

    match event {
        FetchEvent::Completed {
            result, sources, ..
        } => {
            session::reduce(
                &mut state.session,
                Action::FetchSucceeded { result, sources },
            );
        }
        FetchEvent::Failed { message, .. } => {
            session::reduce(&mut state.session, Action::FetchFailed { message });
        }
    }
    push_snapshot(state, ui_tx).await;
}

/// Dispatch one user command. Quit is handled by the run loop, not here.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SwitchTab(tab) => {
            info!(tab = tab.slug(), "Tab selected");
            session::reduce(&mut state.session, Action::TabSelected(tab));
            push_snapshot(state, ui_tx).await;
        }
        UserCommand::Analyze { tab, input } => {
            state.trigger_analysis(tab, input);
            push_snapshot(state, ui_tx).await;
        }
        UserCommand::ExportCsv => {
            handle_export(state, ui_tx).await;
        }
        UserCommand::Quit => {}
    }
}

/// Write the CSV summary for the active tab, gated on having any result.
async fn handle_export(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    if !state.session.has_any_result() {
        debug!("Export requested with no results");
        let _ = ui_tx
            .send(UiUpdate::ExportFailed("No results to export yet".into()))
            .await;
        return;
    }

    let dir = Path::new(&state.config.export.directory);
    let tab = state.session.active_tab;
    match export::write_summary(dir, tab) {
        Ok(path) => {
            info!(path = %path.display(), "Export written");
            let _ = ui_tx.send(UiUpdate::ExportCompleted(path)).await;
        }
        Err(e) => {
            warn!("Export failed: {e:#}");
            let _ = ui_tx.send(UiUpdate::ExportFailed(e.to_string())).await;
        }
    }
}

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = UiUpdate::SessionSnapshot(Box::new(state.session.clone()));
    if ui_tx.send(snapshot).await.is_err() {
        debug!("UI receiver dropped; snapshot not delivered");
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Main controller loop: multiplexes fetch events and user commands until
/// a quit command arrives or the command channel closes.
pub async fn run(
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Controller event loop started");

    // Initial snapshot so the TUI renders real state before any input.
    push_snapshot(&state, &ui_tx).await;

    let mut fetch_open = true;
    loop {
        tokio::select! {
            event = fetch_rx.recv(), if fetch_open => {
                match event {
                    Some(event) => handle_fetch_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("Fetch event channel closed");
                        fetch_open = false;
                    }
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    state.cancel_fetch_task();
    info!("Controller event loop exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{CompetitionResult, DifficultyLabel, GroundingSource, TabResult};
    use crate::config::{ApiConfig, CredentialsConfig, ExportConfig, NicheConfig};
    use crate::protocol::FetchStatus;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                model: "gemini-2.5-flash".into(),
                base_url: None,
            },
            export: ExportConfig {
                directory: "exports".into(),
            },
            niche: NicheConfig {
                presets: vec!["Psychology".into(), "Fitness".into()],
            },
            credentials: CredentialsConfig {
                gemini_api_key: None,
            },
        }
    }

    fn make_state() -> (AppState, mpsc::Receiver<FetchEvent>) {
        let (fetch_tx, fetch_rx) = mpsc::channel(16);
        let state = AppState::new(test_config(), LlmClient::Disabled, fetch_tx);
        (state, fetch_rx)
    }

    fn sample_result() -> Box<TabResult> {
        Box::new(TabResult::Competition(CompetitionResult {
            keyword: "vegan recipes".into(),
            competition_score: 18,
            search_volume_estimate: "10k/month".into(),
            video_count: "900".into(),
            top_channels: vec![],
            avg_views: "12k".into(),
            difficulty_label: DifficultyLabel::Zero,
            opportunity_analysis: "Wide open.".into(),
        }))
    }

    fn completed(tab: AnalysisTab, generation: u64) -> FetchEvent {
        FetchEvent::Completed {
            tab,
            generation,
            result: sample_result(),
            sources: vec![GroundingSource {
                uri: "https://example.com".into(),
                title: "Example".into(),
            }],
        }
    }

    // ---- Submission ----

    #[tokio::test]
    async fn empty_submission_is_rejected_without_spawning() {
        let (mut state, mut fetch_rx) = make_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(
            &mut state,
            UserCommand::Analyze {
                tab: AnalysisTab::ZeroCompetition,
                input: String::new(),
            },
            &ui_tx,
        )
        .await;

        assert_eq!(state.session.status, FetchStatus::Error);
        assert_eq!(state.session.error.as_deref(), Some("Please enter a keyword"));
        assert!(state.current_fetch.is_none(), "no task should be spawned");
        assert!(state.latest_request.is_empty());
        assert!(fetch_rx.try_recv().is_err(), "no fetch event should exist");

        // The rejection is still pushed as a snapshot.
        assert!(matches!(
            ui_rx.recv().await.unwrap(),
            UiUpdate::SessionSnapshot(_)
        ));
    }

    #[tokio::test]
    async fn submission_spawns_fetch_and_sets_loading() {
        let (mut state, mut fetch_rx) = make_state();
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        handle_user_command(
            &mut state,
            UserCommand::Analyze {
                tab: AnalysisTab::Trending,
                input: "Fitness".into(),
            },
            &ui_tx,
        )
        .await;

        assert_eq!(state.session.status, FetchStatus::Loading);
        assert_eq!(state.session.error, None);
        assert_eq!(state.fetch_generation, 1);
        assert_eq!(state.latest_request.get(&AnalysisTab::Trending), Some(&1));
        assert!(state.current_fetch.is_some());

        // The disabled client reports its failure through the channel.
        match fetch_rx.recv().await.unwrap() {
            FetchEvent::Failed {
                tab,
                generation,
                message,
            } => {
                assert_eq!(tab, AnalysisTab::Trending);
                assert_eq!(generation, 1);
                assert_eq!(message, "Gemini API key not configured");
            }
            other => panic!("expected Failed event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resubmission_supersedes_previous_generation() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        state.trigger_analysis(AnalysisTab::ZeroCompetition, "first".into());
        state.trigger_analysis(AnalysisTab::ZeroCompetition, "second".into());

        assert_eq!(state.fetch_generation, 2);
        assert_eq!(
            state.latest_request.get(&AnalysisTab::ZeroCompetition),
            Some(&2)
        );

        // A late event from the first submission must be dropped.
        handle_fetch_event(&mut state, completed(AnalysisTab::ZeroCompetition, 1), &ui_tx).await;
        assert_eq!(state.session.status, FetchStatus::Loading);
        assert!(state.session.competition.is_none());
    }

    // ---- Fetch events ----

    #[tokio::test]
    async fn matching_event_lands_result() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        state.latest_request.insert(AnalysisTab::ZeroCompetition, 1);
        session::reduce(&mut state.session, Action::FetchStarted);

        handle_fetch_event(&mut state, completed(AnalysisTab::ZeroCompetition, 1), &ui_tx).await;

        assert_eq!(state.session.status, FetchStatus::Success);
        assert!(state.session.competition.is_some());
        assert_eq!(state.session.sources.len(), 1);
        assert!(matches!(
            ui_rx.recv().await.unwrap(),
            UiUpdate::SessionSnapshot(_)
        ));
    }

    #[tokio::test]
    async fn stale_event_is_discarded_silently() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        state.latest_request.insert(AnalysisTab::ZeroCompetition, 5);

        handle_fetch_event(&mut state, completed(AnalysisTab::ZeroCompetition, 4), &ui_tx).await;

        assert_eq!(state.session.status, FetchStatus::Idle);
        assert!(state.session.competition.is_none());
        assert!(ui_rx.try_recv().is_err(), "no snapshot for a stale event");
    }

    #[tokio::test]
    async fn event_for_unknown_tab_is_discarded() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        // No request was ever issued for this tab.
        handle_fetch_event(&mut state, completed(AnalysisTab::ZeroCompetition, 1), &ui_tx).await;

        assert!(state.session.competition.is_none());
    }

    #[tokio::test]
    async fn late_event_for_other_tab_still_lands() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        // Tab A's request (gen 1) is still the latest for tab A even
        // though tab B has since issued gen 2.
        state.latest_request.insert(AnalysisTab::ZeroCompetition, 1);
        state.latest_request.insert(AnalysisTab::Trending, 2);

        handle_fetch_event(&mut state, completed(AnalysisTab::ZeroCompetition, 1), &ui_tx).await;

        assert!(state.session.competition.is_some());
    }

    // ---- Commands ----

    #[tokio::test]
    async fn switch_tab_clears_error_and_pushes_snapshot() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        session::reduce(
            &mut state.session,
            Action::FetchFailed {
                message: "boom".into(),
            },
        );

        handle_user_command(
            &mut state,
            UserCommand::SwitchTab(AnalysisTab::NicheEngine),
            &ui_tx,
        )
        .await;

        assert_eq!(state.session.active_tab, AnalysisTab::NicheEngine);
        assert_eq!(state.session.error, None);
        assert_eq!(state.session.status, FetchStatus::Idle);

        match ui_rx.recv().await.unwrap() {
            UiUpdate::SessionSnapshot(snapshot) => {
                assert_eq!(snapshot.active_tab, AnalysisTab::NicheEngine);
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn export_without_results_reports_failure() {
        let (mut state, _fetch_rx) = make_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(&mut state, UserCommand::ExportCsv, &ui_tx).await;

        match ui_rx.recv().await.unwrap() {
            UiUpdate::ExportFailed(message) => {
                assert_eq!(message, "No results to export yet");
            }
            other => panic!("expected ExportFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn export_with_results_writes_file() {
        let dir = std::env::temp_dir().join("tuberank_app_export");
        let _ = std::fs::remove_dir_all(&dir);

        let (mut state, _fetch_rx) = make_state();
        state.config.export.directory = dir.to_string_lossy().into_owned();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        session::reduce(
            &mut state.session,
            Action::FetchSucceeded {
                result: sample_result(),
                sources: vec![],
            },
        );

        handle_user_command(&mut state, UserCommand::ExportCsv, &ui_tx).await;

        match ui_rx.recv().await.unwrap() {
            UiUpdate::ExportCompleted(path) => {
                assert!(path.exists());
                assert!(path.ends_with("tuberank_export_zero-competition.csv"));
            }
            other => panic!("expected ExportCompleted, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
