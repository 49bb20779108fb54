// Message types shared between the TUI task, the controller task, and
// spawned fetch tasks. Everything here is plain data; the channels that
// carry these types are wired up in main.rs.

use std::path::PathBuf;

use crate::analysis::session::SessionState;
use crate::analysis::types::{GroundingSource, TabResult};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The four analysis modes, one per dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTab {
    ZeroCompetition,
    Trending,
    RankingTitles,
    NicheEngine,
}

impl AnalysisTab {
    /// All tabs in display order.
    pub const ALL: [AnalysisTab; 4] = [
        AnalysisTab::ZeroCompetition,
        AnalysisTab::Trending,
        AnalysisTab::RankingTitles,
        AnalysisTab::NicheEngine,
    ];

    /// Stable slug used in export file names and log lines.
    pub fn slug(self) -> &'static str {
        match self {
            AnalysisTab::ZeroCompetition => "zero-competition",
            AnalysisTab::Trending => "trending",
            AnalysisTab::RankingTitles => "ranking-titles",
            AnalysisTab::NicheEngine => "niche-engine",
        }
    }

    /// Human-readable panel title.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisTab::ZeroCompetition => "Zero Competition Finder",
            AnalysisTab::Trending => "Trending Keywords (7 Days)",
            AnalysisTab::RankingTitles => "Title Keyword Extractor",
            AnalysisTab::NicheEngine => "Niche Strategy Engine",
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle of the current fetch, as seen by the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

// ---------------------------------------------------------------------------
// Channel messages
// ---------------------------------------------------------------------------

/// Commands sent from the TUI task to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Make `tab` the active tab.
    SwitchTab(AnalysisTab),
    /// Submit `input` for analysis on `tab`.
    Analyze { tab: AnalysisTab, input: String },
    /// Write the CSV summary for the active tab.
    ExportCsv,
    /// Shut the application down.
    Quit,
}

/// Outcome of one spawned fetch task, sent back to the controller.
///
/// Every event carries the generation it was spawned under so the
/// controller can discard results that arrive after a newer request
/// for the same tab was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Completed {
        tab: AnalysisTab,
        generation: u64,
        result: Box<TabResult>,
        sources: Vec<GroundingSource>,
    },
    Failed {
        tab: AnalysisTab,
        generation: u64,
        message: String,
    },
}

impl FetchEvent {
    /// The (tab, generation) pair identifying the request this event answers.
    pub fn request_key(&self) -> (AnalysisTab, u64) {
        match self {
            FetchEvent::Completed {
                tab, generation, ..
            } => (*tab, *generation),
            FetchEvent::Failed {
                tab, generation, ..
            } => (*tab, *generation),
        }
    }
}

/// Updates pushed from the controller to the TUI task.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full copy of the session state after a transition.
    SessionSnapshot(Box<SessionState>),
    ExportCompleted(PathBuf),
    ExportFailed(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
