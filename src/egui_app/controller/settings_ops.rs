use super::AppController;
use crate::config;
use crate::egui_app::state::StatusTone;

impl AppController {
    /// Refresh the resolved paths shown on the settings screen.
    pub fn refresh_settings_view(&mut self) {
        let display = |result: Result<std::path::PathBuf, _>| match result {
            Ok(path) => path.display().to_string(),
            Err(_) => "<unavailable>".to_string(),
        };
        self.ui.settings.images_dir = display(self.settings.resolved_images_dir());
        self.ui.settings.sentences_path = display(self.settings.resolved_sentences_path());
        self.ui.settings.models_dir = display(self.settings.resolved_models_dir());
    }

    /// Pick the folder holding one subfolder of images per class.
    pub fn pick_images_dir(&mut self) {
        if let Some(folder) = rfd::FileDialog::new()
            .set_title("Choose the images folder")
            .pick_folder()
        {
            self.settings.images_dir = Some(folder);
            self.apply_settings_change();
        }
    }

    /// Pick the CSV file with the `sentence` column.
    pub fn pick_sentences_file(&mut self) {
        if let Some(file) = rfd::FileDialog::new()
            .set_title("Choose the sentences CSV")
            .add_filter("CSV", &["csv"])
            .pick_file()
        {
            self.settings.sentences_path = Some(file);
            self.apply_settings_change();
        }
    }

    /// Pick the folder with the trained model artifacts.
    pub fn pick_models_dir(&mut self) {
        if let Some(folder) = rfd::FileDialog::new()
            .set_title("Choose the models folder")
            .pick_folder()
        {
            self.settings.models_dir = Some(folder);
            self.apply_settings_change();
        }
    }

    fn apply_settings_change(&mut self) {
        if let Err(err) = config::save(&self.settings) {
            tracing::error!("Failed to save settings: {err}");
            self.set_status(format!("Failed to save settings: {err}"), StatusTone::Error);
            return;
        }
        self.reload_content();
        self.refresh_settings_view();
    }
}
