//! Shared state types for the egui UI.
//!
//! Everything here is plain data the renderer consumes; the controller is
//! the only writer.

mod features;
mod status;

pub use features::*;
pub use status::*;

/// Which screen the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Tutorial,
    Quiz,
    Recall,
    Sentence,
    Tracker,
    Settings,
}

impl Screen {
    /// Title shown in the top bar.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Cogpal",
            Screen::Tutorial => "Tutorial",
            Screen::Quiz => "Classification Quiz",
            Screen::Recall => "Timed Recall",
            Screen::Sentence => "Sentence Builder",
            Screen::Tracker => "Performance Tracker",
            Screen::Settings => "Settings",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub screen: Screen,
    pub status: StatusBarState,
    pub home: HomeState,
    pub tutorial: TutorialState,
    pub quiz: QuizState,
    pub recall: RecallState,
    pub sentence: SentenceState,
    pub tracker: TrackerState,
    pub settings: SettingsState,
}
