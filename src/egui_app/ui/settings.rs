use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, style};

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui) {
    ui.add_space(8.0);
    ui.label(
        RichText::new("Content locations")
            .color(style::TEXT)
            .size(18.0)
            .strong(),
    );
    ui.add_space(10.0);

    let images_dir = app.controller.ui.settings.images_dir.clone();
    let sentences_path = app.controller.ui.settings.sentences_path.clone();
    let models_dir = app.controller.ui.settings.models_dir.clone();

    egui::Grid::new("settings_paths")
        .num_columns(3)
        .spacing([12.0, 10.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Images folder").color(style::TEXT));
            ui.label(RichText::new(images_dir).color(style::NEUTRAL));
            if ui.button("Choose...").clicked() {
                app.controller.pick_images_dir();
            }
            ui.end_row();

            ui.label(RichText::new("Sentences CSV").color(style::TEXT));
            ui.label(RichText::new(sentences_path).color(style::NEUTRAL));
            if ui.button("Choose...").clicked() {
                app.controller.pick_sentences_file();
            }
            ui.end_row();

            ui.label(RichText::new("Models folder").color(style::TEXT));
            ui.label(RichText::new(models_dir).color(style::NEUTRAL));
            if ui.button("Choose...").clicked() {
                app.controller.pick_models_dir();
            }
            ui.end_row();
        });

    ui.add_space(16.0);
    ui.label(
        RichText::new(
            "Each subfolder of the images folder is one class; the folder \
             name is the label shown in the exercises.",
        )
        .color(style::TEXT),
    );
    ui.add_space(6.0);
    ui.label(
        RichText::new(
            "Run `cogpal-train --data <images folder> --out <models folder>` \
             to train the classifier that fills the confidence column.",
        )
        .color(style::TEXT),
    );
}
