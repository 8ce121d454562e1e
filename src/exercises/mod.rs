//! Round logic for the exercises, kept free of UI types so it can be
//! tested deterministically with a seeded RNG.

mod quiz;
mod recall;
mod sentence;

use std::time::Duration;

pub use quiz::{MAX_OPTIONS, build_options};
pub use recall::RecallPhase;
pub use sentence::SentenceRound;

/// How long an answered quiz round shows feedback before auto-advancing.
pub const QUIZ_FEEDBACK_DURATION: Duration = Duration::from_millis(1500);
/// How long a recall card stays visible before it is hidden.
pub const RECALL_STUDY_DURATION: Duration = Duration::from_secs(3);
/// How long a finished sentence shows feedback before the next one.
pub const SENTENCE_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Per-session correct/total counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Score line shown above the quiz, e.g. `Score: 3/5`.
    pub fn line(&self) -> String {
        format!("Score: {}/{}", self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_counts_correct_answers() {
        let mut score = Score::default();
        score.record(true);
        score.record(false);
        score.record(true);
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 3);
        assert_eq!(score.line(), "Score: 2/3");
    }
}
