use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, helpers, style};

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui, ctx: &egui::Context) {
    let card = app.controller.ui.tutorial.card.clone();
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        match card {
            Some(card) => {
                let tex = app.card_texture(ctx, &card.image);
                helpers::draw_card_area(ui, tex);
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("This is a {}", card.class_name))
                        .color(style::TEXT)
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(12.0);
                if helpers::feature_button(ui, "Next") {
                    app.controller.tutorial_next();
                }
            }
            None => {
                ui.label(
                    RichText::new("No images available. Pick an images folder in Settings.")
                        .color(style::TEXT),
                );
            }
        }
    });
}
