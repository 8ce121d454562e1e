use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui, Vec2};

use super::{EguiApp, helpers, style};
use crate::session::{Feature, FeatureAccuracy};

pub(super) fn render(app: &mut EguiApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        helpers::heading(ui, &format!("Performance of {}", app.controller.user_label()));
        ui.add_space(10.0);

        if !app.controller.ui.tracker.loaded || app.controller.ui.tracker.rows.is_empty() {
            ui.label(RichText::new("No data yet.").color(style::TEXT).size(16.0));
            return;
        }

        let rows = app.controller.ui.tracker.rows.clone();
        draw_accuracy_chart(ui, &rows);
        ui.add_space(16.0);

        let recent = app.controller.ui.tracker.recent.clone();
        if !recent.is_empty() {
            ui.label(
                RichText::new("Recent attempts")
                    .color(style::TEXT)
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(6.0);
            egui::Grid::new("recent_attempts")
                .striped(true)
                .spacing([18.0, 4.0])
                .show(ui, |ui| {
                    for header in ["Date", "Exercise", "Answer", "Result", "Confidence", "Seconds"] {
                        ui.label(RichText::new(header).color(style::TEXT).strong());
                    }
                    ui.end_row();
                    for row in &recent {
                        ui.label(&row.session_date);
                        ui.label(Feature::label_for(&row.feature));
                        ui.label(&row.user_response);
                        if row.correct {
                            ui.label(RichText::new("correct").color(style::GOOD));
                        } else {
                            ui.label(RichText::new("wrong").color(style::BAD));
                        }
                        match row.model_confidence {
                            Some(confidence) => ui.label(format!("{confidence:.2}")),
                            None => ui.label("-"),
                        };
                        ui.label(format!("{:.1}", row.duration_seconds));
                        ui.end_row();
                    }
                });
        }
    });
}

/// Paint the per-feature accuracy bars directly.
fn draw_accuracy_chart(ui: &mut Ui, rows: &[FeatureAccuracy]) {
    let width = ui.available_width().min(560.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 240.0), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, Color32::WHITE);

    let inner = rect.shrink2(egui::vec2(24.0, 30.0));
    let slot_width = inner.width() / rows.len() as f32;
    for (index, row) in rows.iter().enumerate() {
        let fraction = (row.accuracy_pct() / 100.0) as f32;
        let bar_width = (slot_width * 0.55).min(80.0);
        let center_x = inner.left() + slot_width * (index as f32 + 0.5);
        let bar_height = (inner.height() * fraction).max(2.0);
        let bar = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, inner.bottom() - bar_height),
            egui::pos2(center_x + bar_width / 2.0, inner.bottom()),
        );
        painter.rect_filled(bar, 3.0, style::ACCENT);
        painter.text(
            egui::pos2(center_x, bar.top() - 4.0),
            Align2::CENTER_BOTTOM,
            format!("{:.0}%", row.accuracy_pct()),
            FontId::proportional(13.0),
            style::TEXT,
        );
        painter.text(
            egui::pos2(center_x, inner.bottom() + 6.0),
            Align2::CENTER_TOP,
            Feature::label_for(&row.feature),
            FontId::proportional(13.0),
            style::TEXT,
        );
    }
}
