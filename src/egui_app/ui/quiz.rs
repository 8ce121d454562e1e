use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, helpers, style};

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui, ctx: &egui::Context) {
    let card = app.controller.ui.quiz.card.clone();
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(app.controller.ui.quiz.score.line())
                .color(style::GOOD)
                .size(16.0)
                .strong(),
        );
        ui.add_space(8.0);

        let Some(card) = card else {
            ui.label(
                RichText::new("No images available. Pick an images folder in Settings.")
                    .color(style::TEXT),
            );
            return;
        };

        let tex = app.card_texture(ctx, &card.image);
        helpers::draw_card_area(ui, tex);
        ui.add_space(10.0);

        let options = app.controller.ui.quiz.options.clone();
        let answered = app.controller.ui.quiz.answered;
        let mut chosen: Option<String> = None;
        ui.horizontal_wrapped(|ui| {
            for option in &options {
                if helpers::option_button(ui, option, !answered) {
                    chosen = Some(option.clone());
                }
            }
        });
        if let Some(choice) = chosen {
            app.controller.quiz_answer(&choice);
        }

        ui.add_space(10.0);
        if let Some(feedback) = app.controller.ui.quiz.feedback.clone() {
            helpers::feedback_label(ui, &feedback);
        }
    });
}
