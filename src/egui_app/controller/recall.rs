use std::time::Instant;

use super::AppController;
use crate::egui_app::state::{Feedback, RecallState, StatusTone};
use crate::exercises::{RECALL_STUDY_DURATION, RecallPhase, build_options};
use crate::session::Feature;

impl AppController {
    /// Return the recall screen to its armed state.
    pub fn recall_reset(&mut self) {
        self.ui.recall = RecallState::default();
    }

    /// Start a round: show a card for the study duration.
    pub fn recall_start(&mut self) {
        let Some(card) = self.library.draw_card(&mut self.rng) else {
            self.set_status(
                "No images to recall. Pick an images folder in Settings.",
                StatusTone::Info,
            );
            return;
        };
        let options = build_options(&self.library.class_names(), &card.class_name, &mut self.rng);
        let confidence = self.model_confidence(&card);

        self.ui.recall = RecallState {
            phase: RecallPhase::Study,
            card: Some(card),
            options,
            feedback: None,
            hide_at: Some(Instant::now() + RECALL_STUDY_DURATION),
            asked_at: None,
            confidence,
        };
    }

    /// Study time is over: hide the card and offer the options.
    pub(super) fn recall_ask(&mut self) {
        let recall = &mut self.ui.recall;
        if recall.phase != RecallPhase::Study {
            recall.hide_at = None;
            return;
        }
        recall.phase = RecallPhase::Ask;
        recall.hide_at = None;
        recall.asked_at = Some(Instant::now());
    }

    /// Handle an option click during the ask phase.
    pub fn recall_answer(&mut self, choice: &str) {
        if !self.ui.recall.phase.accepts_answer() {
            return;
        }
        let Some(card) = self.ui.recall.card.clone() else {
            return;
        };
        let correct = choice == card.class_name;
        let duration = self
            .ui
            .recall
            .asked_at
            .map(|asked| asked.elapsed())
            .unwrap_or_default();

        let recall = &mut self.ui.recall;
        recall.phase = RecallPhase::Feedback;
        recall.feedback = Some(if correct {
            Feedback::correct("Great memory!")
        } else {
            Feedback::wrong(format!("It was {}", card.class_name))
        });

        let confidence = recall.confidence;
        self.log_attempt(
            Feature::TimedRecall,
            card.image.display().to_string(),
            choice.to_string(),
            correct,
            confidence,
            duration,
        );
    }
}
