//! egui renderer for the application UI.

mod helpers;
mod home;
mod quiz;
mod recall;
mod sentence;
mod settings;
mod style;
mod tracker;
mod tutorial;

use std::path::PathBuf;

use eframe::egui::{self, Color32, Frame, RichText, TextureHandle, TextureOptions};

use crate::egui_app::controller::AppController;
use crate::egui_app::state::{Screen, StatusTone};

/// Initial window size.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [760.0, 640.0];

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: AppController,
    visuals_set: bool,
    /// Texture for the currently displayed card, keyed by image path.
    card_tex: Option<(PathBuf, TextureHandle)>,
}

impl EguiApp {
    /// Create the app, loading persisted configuration and content.
    pub fn new() -> Result<Self, String> {
        let mut controller = AppController::new();
        controller.load_configuration()?;
        Ok(Self {
            controller,
            visuals_set: false,
            card_tex: None,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        visuals.window_fill = style::BG;
        visuals.panel_fill = style::BG;
        visuals.override_text_color = Some(style::TEXT);
        visuals.widgets.hovered.weak_bg_fill = style::ACCENT;
        visuals.widgets.active.weak_bg_fill = style::ACCENT;
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Resolve (and cache) the texture for a card image.
    fn card_texture(&mut self, ctx: &egui::Context, path: &PathBuf) -> Option<egui::TextureId> {
        if let Some((cached_path, tex)) = &self.card_tex {
            if cached_path == path {
                return Some(tex.id());
            }
        }
        match helpers::load_card_image(path) {
            Ok(color_image) => {
                let tex = ctx.load_texture("card_texture", color_image, TextureOptions::LINEAR);
                let id = tex.id();
                self.card_tex = Some((path.clone(), tex));
                Some(id)
            }
            Err(err) => {
                tracing::warn!("Failed to load {}: {err}", path.display());
                self.card_tex = None;
                None
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(style::BUTTON))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let screen = self.controller.ui.screen;
                    if screen != Screen::Home {
                        if ui
                            .button(RichText::new("< Home").color(style::TEXT))
                            .clicked()
                        {
                            self.controller.open_screen(Screen::Home);
                        }
                        ui.separator();
                    }
                    ui.label(
                        RichText::new(screen.title())
                            .color(style::TEXT)
                            .size(18.0)
                            .strong(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(self.controller.user_label()).color(style::TEXT),
                        );
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                let badge = match status.tone {
                    StatusTone::Idle | StatusTone::Info => style::NEUTRAL,
                    StatusTone::Success => style::GOOD,
                    StatusTone::Error => style::BAD,
                };
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(6.0, 10.0),
                        6.0,
                        badge,
                    );
                    ui.add_space(16.0);
                    ui.label(RichText::new(&status.text).color(style::TEXT));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_top_bar(ctx);
        self.render_status(ctx);

        egui::CentralPanel::default()
            .frame(Frame::none().fill(style::BG).inner_margin(16.0))
            .show(ctx, |ui| match self.controller.ui.screen {
                Screen::Home => home::render(self, ui),
                Screen::Tutorial => tutorial::render(self, ui, ctx),
                Screen::Quiz => quiz::render(self, ui, ctx),
                Screen::Recall => recall::render(self, ui, ctx),
                Screen::Sentence => sentence::render(self, ui),
                Screen::Tracker => tracker::render(self, ui),
                Screen::Settings => settings::render(self, ui),
            });

        if self.controller.has_pending_deadline() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
