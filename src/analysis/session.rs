// Session state and the pure reducer that advances it.
//
// All state transitions flow through `reduce`, which takes the current
// state and one action and mutates the state in place. The reducer does
// no I/O and never spawns work, so every transition can be unit tested
// without a terminal or a network.

use crate::analysis::types::{
    CompetitionResult, GroundingSource, NicheBundle, RankingKeyword, TabResult, TrendingKeyword,
};
use crate::protocol::{AnalysisTab, FetchStatus};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the dashboard knows for the current session.
///
/// Each tab retains its last successful result independently; `status`,
/// `error`, and `sources` are shared across tabs, mirroring the single
/// request-in-flight model.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub active_tab: AnalysisTab,
    pub status: FetchStatus,
    /// Human-readable message shown in the error banner.
    pub error: Option<String>,
    /// Grounding sources from the most recent successful fetch.
    pub sources: Vec<GroundingSource>,
    pub competition: Option<CompetitionResult>,
    pub trending: Vec<TrendingKeyword>,
    pub ranking: Vec<RankingKeyword>,
    pub niche: Option<NicheBundle>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            active_tab: AnalysisTab::ZeroCompetition,
            status: FetchStatus::Idle,
            error: None,
            sources: Vec::new(),
            competition: None,
            trending: Vec::new(),
            ranking: Vec::new(),
            niche: None,
        }
    }
}

impl SessionState {
    /// True once any tab holds a result. Gates the CSV export.
    pub fn has_any_result(&self) -> bool {
        self.competition.is_some()
            || !self.trending.is_empty()
            || !self.ranking.is_empty()
            || self.niche.is_some()
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// One state transition input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user selected a tab.
    TabSelected(AnalysisTab),
    /// A submission was rejected before any fetch was started.
    SubmitRejected { message: String },
    /// A fetch task was spawned for the active tab.
    FetchStarted,
    /// A fetch completed and its result should be stored.
    FetchSucceeded {
        result: Box<TabResult>,
        sources: Vec<GroundingSource>,
    },
    /// A fetch failed with a user-facing message.
    FetchFailed { message: String },
}

/// The validation message for an empty submission on `tab`.
pub fn validation_message(tab: AnalysisTab) -> &'static str {
    match tab {
        AnalysisTab::ZeroCompetition => "Please enter a keyword",
        AnalysisTab::Trending | AnalysisTab::NicheEngine => "Please enter a niche",
        AnalysisTab::RankingTitles => "Please paste some video titles",
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Advance the session state by one action.
pub fn reduce(state: &mut SessionState, action: Action) {
    match action {
        Action::TabSelected(tab) => {
            state.active_tab = tab;
            state.error = None;
            state.sources.clear();
            // A dismissed error banner should not leave the status stuck
            // on Error; a fetch still in flight keeps showing as Loading.
            if state.status == FetchStatus::Error {
                state.status = FetchStatus::Idle;
            }
        }
        Action::SubmitRejected { message } => {
            state.status = FetchStatus::Error;
            state.error = Some(message);
            state.sources.clear();
        }
        Action::FetchStarted => {
            state.status = FetchStatus::Loading;
            state.error = None;
            state.sources.clear();
        }
        Action::FetchSucceeded { result, sources } => {
            state.status = FetchStatus::Success;
            state.error = None;
            state.sources = sources;
            match *result {
                TabResult::Competition(data) => state.competition = Some(data),
                TabResult::Trending(items) => state.trending = items,
                TabResult::Ranking(items) => state.ranking = items,
                TabResult::Niche(bundle) => state.niche = Some(bundle),
            }
        }
        Action::FetchFailed { message } => {
            state.status = FetchStatus::Error;
            state.error = Some(message);
            // Prior results stay untouched so a failed refresh does not
            // wipe what the user already fetched.
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
