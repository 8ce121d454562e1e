use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, helpers, style};
use crate::egui_app::state::Screen;

const FEATURES: [(&str, Screen); 6] = [
    ("Tutorial Phase", Screen::Tutorial),
    ("Classification Quiz", Screen::Quiz),
    ("Timed Recall", Screen::Recall),
    ("Sentence Builder", Screen::Sentence),
    ("Performance Tracker", Screen::Tracker),
    ("Settings", Screen::Settings),
];

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(14.0);
        helpers::heading(ui, "Cognitive Retraining Toolkit");
        ui.add_space(4.0);
        ui.label(RichText::new("Choose a feature below to begin").color(style::TEXT));
        ui.add_space(12.0);

        ui.label(RichText::new("Child name").color(style::TEXT));
        ui.add(
            egui::TextEdit::singleline(&mut app.controller.ui.home.name_input)
                .hint_text("child_1")
                .desired_width(230.0),
        );
        ui.add_space(14.0);

        for (label, screen) in FEATURES {
            if helpers::feature_button(ui, label) {
                app.controller.open_screen(screen);
            }
            ui.add_space(8.0);
        }
    });
}
