//! Application state (Model in TEA pattern)

use crate::config::Settings;
use crate::diagram::{DiagramPipeline, SequenceRenderer};
use crate::history::HistoryView;
use crate::preferences::PreferenceStore;
use crate::scroll::ScrollState;
use crate::sessions::SessionList;

/// Id the history sequence diagram is rendered under
pub const HISTORY_DIAGRAM_ID: &str = "history-diagram";

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Paged history list
    #[default]
    History,

    /// Sequence diagram of the history
    Visualize,

    /// Definition of the mock matched by the selected entry
    MockDetail,
}

/// Mock detail view state
#[derive(Debug, Default)]
pub struct MockDetailState {
    pub mock_id: String,
    pub loading: bool,
    /// Pretty-printed mock definition
    pub body: Option<String>,
    pub error: Option<String>,
    pub scroll: ScrollState,
}

impl MockDetailState {
    pub fn loading(mock_id: impl Into<String>) -> Self {
        Self {
            mock_id: mock_id.into(),
            loading: true,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, result: Result<serde_json::Value, String>) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.body = Some(
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
                );
                self.error = None;
            }
            Err(message) => {
                self.body = None;
                self.error = Some(message);
            }
        }
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub settings: Settings,

    /// History list, sort/page state, polling
    pub history: HistoryView,

    /// Sessions known to the server and the one being viewed
    pub sessions: SessionList,

    /// Last session list fetch error
    pub sessions_error: Option<String>,

    /// Visualize view output
    pub diagram: DiagramPipeline<SequenceRenderer>,
    pub diagram_scroll: ScrollState,

    /// Mock detail view, while open
    pub mock_detail: Option<MockDetailState>,

    /// Frame counter for the loading spinner
    pub animation_frame: u64,
}

impl AppState {
    /// Create state viewing `session` (`None` follows the live session).
    pub fn new(settings: Settings, prefs: Box<dyn PreferenceStore>, session: Option<String>) -> Self {
        let history = HistoryView::new(prefs, &settings);
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::History,
            settings,
            history,
            sessions: SessionList::new(session),
            sessions_error: None,
            diagram: DiagramPipeline::new(SequenceRenderer::new()),
            diagram_scroll: ScrollState::new(),
            mock_detail: None,
            animation_frame: 0,
        }
    }

    /// Session id to pass to the server (`None` for the live session).
    pub fn session_param(&self) -> Option<String> {
        self.sessions.selected.clone()
    }

    /// Whether the autorefresh control is available right now.
    pub fn can_poll(&self) -> bool {
        self.sessions.can_poll()
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Scroll state of whatever view is showing.
    pub fn active_scroll(&mut self) -> &mut ScrollState {
        match self.ui_mode {
            UiMode::History => &mut self.history.scroll,
            UiMode::Visualize => &mut self.diagram_scroll,
            UiMode::MockDetail => match self.mock_detail.as_mut() {
                Some(detail) => &mut detail.scroll,
                None => &mut self.history.scroll,
            },
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.history.scroll.tick();
    }
}
