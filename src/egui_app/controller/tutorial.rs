use super::AppController;
use crate::egui_app::state::StatusTone;

impl AppController {
    /// Show the next random labeled card.
    pub fn tutorial_next(&mut self) {
        match self.library.draw_card(&mut self.rng) {
            Some(card) => self.ui.tutorial.card = Some(card),
            None => {
                self.ui.tutorial.card = None;
                self.set_status(
                    "No images to show. Pick an images folder in Settings.",
                    StatusTone::Info,
                );
            }
        }
    }
}
