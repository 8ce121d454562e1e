use std::time::Instant;

use super::AppController;
use crate::egui_app::state::{Feedback, QuizState, StatusTone};
use crate::exercises::{QUIZ_FEEDBACK_DURATION, build_options};
use crate::session::Feature;

impl AppController {
    /// Start a fresh quiz session (score reset) and arm the first round.
    pub fn quiz_reset(&mut self) {
        self.ui.quiz = QuizState::default();
        self.quiz_next();
    }

    /// Arm the next quiz round.
    pub fn quiz_next(&mut self) {
        let quiz = &mut self.ui.quiz;
        quiz.feedback = None;
        quiz.answered = false;
        quiz.next_at = None;
        quiz.confidence = None;
        quiz.card = None;
        quiz.options.clear();

        let Some(card) = self.library.draw_card(&mut self.rng) else {
            self.set_status(
                "No images to quiz on. Pick an images folder in Settings.",
                StatusTone::Info,
            );
            return;
        };
        let options = build_options(&self.library.class_names(), &card.class_name, &mut self.rng);
        let confidence = self.model_confidence(&card);

        let quiz = &mut self.ui.quiz;
        quiz.options = options;
        quiz.confidence = confidence;
        quiz.card = Some(card);
        quiz.started_at = Some(Instant::now());
    }

    /// Handle an option click: score, feedback, attempt log, auto-advance.
    pub fn quiz_answer(&mut self, choice: &str) {
        if self.ui.quiz.answered {
            return;
        }
        let Some(card) = self.ui.quiz.card.clone() else {
            return;
        };
        let correct = choice == card.class_name;
        let duration = self
            .ui
            .quiz
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or_default();

        let quiz = &mut self.ui.quiz;
        quiz.score.record(correct);
        quiz.feedback = Some(if correct {
            Feedback::correct("Correct!")
        } else {
            Feedback::wrong(format!("Oops! It was {}", card.class_name))
        });
        quiz.answered = true;
        quiz.next_at = Some(Instant::now() + QUIZ_FEEDBACK_DURATION);

        let confidence = quiz.confidence;
        self.log_attempt(
            Feature::Quiz,
            card.image.display().to_string(),
            choice.to_string(),
            correct,
            confidence,
            duration,
        );
    }
}
