use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, helpers, style};
use crate::exercises::RecallPhase;

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui, ctx: &egui::Context) {
    let phase = app.controller.ui.recall.phase;
    let card = app.controller.ui.recall.card.clone();
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        match phase {
            RecallPhase::Idle => {
                ui.label(
                    RichText::new("Memorize the picture, then pick what you saw.")
                        .color(style::TEXT)
                        .size(16.0),
                );
                ui.add_space(12.0);
                if helpers::feature_button(ui, "Start") {
                    app.controller.recall_start();
                }
            }
            RecallPhase::Study => {
                let tex = card.as_ref().and_then(|card| app.card_texture(ctx, &card.image));
                helpers::draw_card_area(ui, tex);
                ui.add_space(10.0);
                ui.label(
                    RichText::new("Look carefully")
                        .color(style::TEXT)
                        .size(16.0)
                        .strong(),
                );
            }
            RecallPhase::Ask => {
                helpers::draw_card_area(ui, None);
                ui.add_space(10.0);
                ui.label(
                    RichText::new("What did you see?")
                        .color(style::TEXT)
                        .size(16.0)
                        .strong(),
                );
                ui.add_space(8.0);
                let options = app.controller.ui.recall.options.clone();
                let mut chosen: Option<String> = None;
                ui.horizontal_wrapped(|ui| {
                    for option in &options {
                        if helpers::option_button(ui, option, true) {
                            chosen = Some(option.clone());
                        }
                    }
                });
                if let Some(choice) = chosen {
                    app.controller.recall_answer(&choice);
                }
            }
            RecallPhase::Feedback => {
                if let Some(feedback) = app.controller.ui.recall.feedback.clone() {
                    helpers::feedback_label(ui, &feedback);
                }
                ui.add_space(12.0);
                if helpers::feature_button(ui, "Start next round") {
                    app.controller.recall_start();
                }
            }
        }
    });
}
