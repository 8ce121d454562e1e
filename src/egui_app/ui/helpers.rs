use std::path::Path;

use eframe::egui::{self, Color32, RichText, Sense, Ui, Vec2};
use image::imageops::FilterType;

use super::style;

/// Cards are displayed inside a square of this many pixels.
pub(super) const CARD_DISPLAY_SIZE: u32 = 250;

/// Decode and downscale an image for display.
pub(super) fn load_card_image(path: &Path) -> Result<egui::ColorImage, String> {
    let decoded = image::open(path).map_err(|err| err.to_string())?;
    let rgba = decoded
        .resize_exact(CARD_DISPLAY_SIZE, CARD_DISPLAY_SIZE, FilterType::Triangle)
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Draw a texture centered in a fixed card area.
pub(super) fn draw_card_area(ui: &mut Ui, tex_id: Option<egui::TextureId>) {
    let side = CARD_DISPLAY_SIZE as f32;
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
    match tex_id {
        Some(id) => {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter().image(id, rect, uv, Color32::WHITE);
        }
        None => {
            ui.painter().rect_filled(rect, 8.0, Color32::WHITE);
        }
    }
}

/// One pastel exercise button with a fixed size.
pub(super) fn feature_button(ui: &mut Ui, label: &str) -> bool {
    ui.add_sized(
        [230.0, 44.0],
        egui::Button::new(RichText::new(label).color(style::TEXT).size(16.0))
            .fill(style::BUTTON),
    )
    .clicked()
}

/// A smaller answer-option button.
pub(super) fn option_button(ui: &mut Ui, label: &str, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(label).color(style::TEXT).size(15.0))
            .fill(style::BUTTON)
            .min_size(Vec2::new(110.0, 38.0)),
    )
    .clicked()
}

/// Feedback line colored by outcome.
pub(super) fn feedback_label(ui: &mut Ui, feedback: &crate::egui_app::state::Feedback) {
    let color = if feedback.positive {
        style::GOOD
    } else {
        style::BAD
    };
    ui.label(RichText::new(&feedback.text).color(color).size(16.0).strong());
}

/// Section heading in the shared text color.
pub(super) fn heading(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(style::TEXT).size(22.0).strong());
}
