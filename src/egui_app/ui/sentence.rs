use eframe::egui::{RichText, Ui};

use super::{EguiApp, helpers, style};

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        if let Some(reason) = app.controller.ui.sentence.unavailable.clone() {
            ui.label(RichText::new(reason).color(style::BAD).size(16.0));
            return;
        }
        let Some(round) = app.controller.ui.sentence.round.clone() else {
            ui.label(RichText::new("No sentences found.").color(style::BAD).size(16.0));
            return;
        };

        ui.label(
            RichText::new("Tap the words in the right order")
                .color(style::TEXT)
                .size(16.0),
        );
        ui.add_space(12.0);

        let finished = round.is_complete();
        let mut picked: Option<usize> = None;
        ui.horizontal_wrapped(|ui| {
            for (slot, word) in round.slots().iter().enumerate() {
                if helpers::option_button(ui, &word.text, !word.used && !finished) {
                    picked = Some(slot);
                }
            }
        });
        if let Some(slot) = picked {
            app.controller.sentence_pick(slot);
        }

        ui.add_space(12.0);
        let built = app
            .controller
            .ui
            .sentence
            .round
            .as_ref()
            .map(|round| round.built())
            .unwrap_or_default();
        ui.label(
            RichText::new(format!("Constructed: {built}"))
                .color(style::TEXT)
                .size(15.0),
        );
        ui.add_space(8.0);
        if let Some(feedback) = app.controller.ui.sentence.feedback.clone() {
            helpers::feedback_label(ui, &feedback);
        }
    });
}
