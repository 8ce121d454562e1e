/// Phases of one timed recall round.
///
/// `Study` shows the card for a fixed duration, `Ask` hides it and offers
/// the options, `Feedback` shows the result until the next round is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecallPhase {
    /// No round running; the Start button is shown.
    #[default]
    Idle,
    /// The card is visible and being memorized.
    Study,
    /// The card is hidden and the options are shown.
    Ask,
    /// The answer was given; feedback is visible.
    Feedback,
}

impl RecallPhase {
    /// Whether the card image should be rendered in this phase.
    pub fn shows_card(self) -> bool {
        matches!(self, RecallPhase::Study)
    }

    /// Whether the option buttons accept input in this phase.
    pub fn accepts_answer(self) -> bool {
        matches!(self, RecallPhase::Ask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_study_shows_the_card() {
        assert!(RecallPhase::Study.shows_card());
        assert!(!RecallPhase::Ask.shows_card());
        assert!(!RecallPhase::Feedback.shows_card());
    }

    #[test]
    fn only_ask_accepts_answers() {
        assert!(RecallPhase::Ask.accepts_answer());
        assert!(!RecallPhase::Study.accepts_answer());
        assert!(!RecallPhase::Idle.accepts_answer());
    }
}
