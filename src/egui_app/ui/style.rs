//! Pastel palette shared by the screens.

use eframe::egui::Color32;

/// Window and panel background.
pub const BG: Color32 = Color32::from_rgb(240, 248, 255);
/// Resting button fill.
pub const BUTTON: Color32 = Color32::from_rgb(174, 214, 241);
/// Hovered/active button fill and chart bars.
pub const ACCENT: Color32 = Color32::from_rgb(93, 173, 226);
/// Headings and body text.
pub const TEXT: Color32 = Color32::from_rgb(46, 64, 83);
/// Positive feedback.
pub const GOOD: Color32 = Color32::from_rgb(17, 120, 100);
/// Negative feedback.
pub const BAD: Color32 = Color32::from_rgb(176, 58, 46);
/// Status badge for idle/info tones.
pub const NEUTRAL: Color32 = Color32::from_rgb(120, 140, 160);
