//! egui application modules: plain view state, the controller that owns
//! the services, and the renderer.

pub mod controller;
pub mod state;
pub mod ui;
