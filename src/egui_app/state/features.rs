use std::time::Instant;

use crate::exercises::{RecallPhase, Score, SentenceRound};
use crate::library::Card;
use crate::session::{AttemptRow, FeatureAccuracy};

/// Answer feedback shown under a round.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub text: String,
    pub positive: bool,
}

impl Feedback {
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            positive: true,
        }
    }

    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            positive: false,
        }
    }
}

/// Home screen: the child name entry.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub name_input: String,
}

/// Tutorial: one labeled card at a time.
#[derive(Debug, Clone, Default)]
pub struct TutorialState {
    pub card: Option<Card>,
}

/// Classification quiz round state.
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pub card: Option<Card>,
    pub options: Vec<String>,
    pub feedback: Option<Feedback>,
    pub score: Score,
    /// Set once the round is answered; blocks further answers.
    pub answered: bool,
    /// When the card was shown, for the attempt duration.
    pub started_at: Option<Instant>,
    /// Deadline for the automatic advance to the next round.
    pub next_at: Option<Instant>,
    /// Model probability of the true class, captured when the round starts.
    pub confidence: Option<f32>,
}

/// Timed recall round state.
#[derive(Debug, Clone, Default)]
pub struct RecallState {
    pub phase: RecallPhase,
    pub card: Option<Card>,
    pub options: Vec<String>,
    pub feedback: Option<Feedback>,
    /// Deadline at which the study phase ends and the card is hidden.
    pub hide_at: Option<Instant>,
    /// When the options appeared, for the recall duration.
    pub asked_at: Option<Instant>,
    pub confidence: Option<f32>,
}

/// Sentence builder round state.
#[derive(Debug, Clone, Default)]
pub struct SentenceState {
    pub round: Option<SentenceRound>,
    /// Index of the sentence in the bank, logged as the item id.
    pub item_id: Option<usize>,
    pub feedback: Option<Feedback>,
    pub started_at: Option<Instant>,
    pub next_at: Option<Instant>,
    /// Reason the feature is unavailable (no sentence bank).
    pub unavailable: Option<String>,
}

/// Performance tracker report data.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    pub rows: Vec<FeatureAccuracy>,
    pub recent: Vec<AttemptRow>,
    pub loaded: bool,
}

/// Settings screen: resolved paths for display.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub images_dir: String,
    pub sentences_path: String,
    pub models_dir: String,
}
