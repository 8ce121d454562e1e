use std::time::Instant;

use super::AppController;
use crate::egui_app::state::Feedback;
use crate::exercises::{SENTENCE_FEEDBACK_DURATION, SentenceRound};
use crate::session::Feature;

impl AppController {
    /// Start a fresh sentence session and arm the first round.
    pub fn sentence_reset(&mut self) {
        let unavailable = self.ui.sentence.unavailable.clone();
        self.ui.sentence = Default::default();
        self.ui.sentence.unavailable = unavailable;
        self.sentence_next();
    }

    /// Arm the next sentence round.
    pub fn sentence_next(&mut self) {
        let sentence = &mut self.ui.sentence;
        sentence.feedback = None;
        sentence.next_at = None;
        sentence.round = None;
        sentence.item_id = None;

        let Some(bank) = &self.sentences else {
            return;
        };
        let Some((index, text)) = bank.draw(&mut self.rng) else {
            return;
        };
        let round = SentenceRound::new(text, &mut self.rng);

        let sentence = &mut self.ui.sentence;
        sentence.round = Some(round);
        sentence.item_id = Some(index);
        sentence.started_at = Some(Instant::now());
    }

    /// Handle a word button click; completion scores and logs the round.
    pub fn sentence_pick(&mut self, slot: usize) {
        let Some(round) = self.ui.sentence.round.as_mut() else {
            return;
        };
        if round.is_complete() {
            return;
        }
        round.pick(slot);
        if !round.is_complete() {
            return;
        }

        let correct = round.is_correct();
        let built = round.built();
        let target = round.target().to_string();
        let duration = self
            .ui
            .sentence
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or_default();
        let item_id = self
            .ui
            .sentence
            .item_id
            .map(|index| index.to_string())
            .unwrap_or_default();

        let sentence = &mut self.ui.sentence;
        sentence.feedback = Some(if correct {
            Feedback::correct("Correct Sentence!")
        } else {
            Feedback::wrong(format!("Wrong! Correct: {target}"))
        });
        sentence.next_at = Some(Instant::now() + SENTENCE_FEEDBACK_DURATION);

        self.log_attempt(
            Feature::SentenceBuilder,
            item_id,
            built,
            correct,
            None,
            duration,
        );
    }
}
