use super::AppController;
use crate::egui_app::state::StatusTone;

/// How many recent attempts the tracker detail list shows.
const RECENT_LIMIT: usize = 12;

impl AppController {
    /// Reload the per-feature accuracy report for the active user.
    pub fn tracker_refresh(&mut self) {
        let user = self
            .user_id
            .clone()
            .unwrap_or_else(|| super::DEFAULT_USER.to_string());
        let result = match &self.db {
            Some(db) => db
                .feature_accuracy(&user)
                .and_then(|rows| Ok((rows, db.recent_attempts(&user, RECENT_LIMIT)?))),
            None => {
                self.ui.tracker.rows.clear();
                self.ui.tracker.recent.clear();
                self.ui.tracker.loaded = false;
                self.set_status("Attempt log unavailable.", StatusTone::Error);
                return;
            }
        };
        match result {
            Ok((rows, recent)) => {
                self.ui.tracker.loaded = true;
                self.ui.tracker.rows = rows;
                self.ui.tracker.recent = recent;
                if self.ui.tracker.rows.is_empty() {
                    self.set_status("No data yet.", StatusTone::Info);
                }
            }
            Err(err) => {
                tracing::error!("Failed to load report: {err}");
                self.set_status(format!("Failed to load report: {err}"), StatusTone::Error);
            }
        }
    }
}
