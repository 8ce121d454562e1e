//! Controller owning the services and all state mutation.
//!
//! The renderer calls into these methods; the controller updates
//! [`UiState`] and the UI redraws from it.

mod quiz;
mod recall;
mod sentence;
mod settings_ops;
mod tracker;
mod tutorial;

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{self, AppSettings};
use crate::egui_app::state::{Screen, StatusTone, UiState};
use crate::library::{Card, ImageLibrary, SentenceBank, SentenceError};
use crate::ml::{ImageClassifier, MODEL_CONFIG_FILE_NAME};
use crate::session::{AttemptRecord, Feature, SESSIONS_DB_FILE_NAME, SessionDatabase};

/// Fallback user name when the name field is left blank.
pub const DEFAULT_USER: &str = "child_1";

/// Application controller: services plus the UI state they project into.
pub struct AppController {
    pub ui: UiState,
    user_id: Option<String>,
    settings: AppSettings,
    library: ImageLibrary,
    sentences: Option<SentenceBank>,
    db: Option<SessionDatabase>,
    classifier: Option<ImageClassifier>,
    rng: StdRng,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            ui: UiState::default(),
            user_id: None,
            settings: AppSettings::default(),
            library: ImageLibrary::default(),
            sentences: None,
            db: None,
            classifier: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Load settings, open the attempt log, and scan the exercise content.
    /// Only an unreadable settings file is fatal; missing content degrades
    /// to a status message.
    pub fn load_configuration(&mut self) -> Result<(), String> {
        self.settings = config::load_or_default().map_err(|err| err.to_string())?;
        if let Some(last_user) = &self.settings.last_user {
            self.ui.home.name_input = last_user.clone();
        }

        match crate::app_dirs::app_root_dir() {
            Ok(root) => match SessionDatabase::open(&root.join(SESSIONS_DB_FILE_NAME)) {
                Ok(db) => self.db = Some(db),
                Err(err) => {
                    tracing::error!("Attempt log unavailable: {err}");
                    self.set_status(format!("Attempt log unavailable: {err}"), StatusTone::Error);
                }
            },
            Err(err) => {
                self.set_status(format!("App folder unavailable: {err}"), StatusTone::Error);
            }
        }

        self.reload_content();
        Ok(())
    }

    /// Re-scan the image library, sentence bank, and classifier from the
    /// currently configured paths.
    pub fn reload_content(&mut self) {
        self.library = match self.settings.resolved_images_dir() {
            Ok(dir) => match ImageLibrary::scan(&dir) {
                Ok(library) => library,
                Err(err) => {
                    tracing::warn!("Image library unavailable: {err}");
                    ImageLibrary::default()
                }
            },
            Err(err) => {
                tracing::warn!("Images folder unresolved: {err}");
                ImageLibrary::default()
            }
        };

        self.sentences = None;
        self.ui.sentence.unavailable = None;
        match self.settings.resolved_sentences_path() {
            Ok(path) => match SentenceBank::load(&path) {
                Ok(bank) if !bank.is_empty() => self.sentences = Some(bank),
                Ok(_) => {
                    self.ui.sentence.unavailable = Some("The sentences file is empty.".to_string());
                }
                Err(err @ SentenceError::MissingFile { .. }) => {
                    tracing::info!("{err}");
                    self.ui.sentence.unavailable = Some("No sentences found.".to_string());
                }
                Err(err) => {
                    tracing::warn!("Sentence bank unavailable: {err}");
                    self.ui.sentence.unavailable = Some(format!("Sentences unavailable: {err}"));
                }
            },
            Err(err) => {
                self.ui.sentence.unavailable = Some(format!("Sentences unresolved: {err}"));
            }
        }

        self.classifier = None;
        if let Ok(models_dir) = self.settings.resolved_models_dir() {
            if models_dir.join(MODEL_CONFIG_FILE_NAME).is_file() {
                match ImageClassifier::load(&models_dir) {
                    Ok(classifier) => self.classifier = Some(classifier),
                    Err(err) => {
                        tracing::warn!("Classifier unavailable: {err}");
                        self.set_status(format!("Classifier unavailable: {err}"), StatusTone::Info);
                    }
                }
            }
        }

        if self.library.is_empty() {
            self.set_status(
                "No image classes found. Pick an images folder in Settings.",
                StatusTone::Info,
            );
        } else {
            self.set_status(
                format!(
                    "{} classes ready{}",
                    self.library.class_count(),
                    if self.classifier.is_some() {
                        ", classifier loaded"
                    } else {
                        ""
                    }
                ),
                StatusTone::Success,
            );
        }
    }

    /// Whether the image-based exercises can run.
    pub fn has_images(&self) -> bool {
        !self.library.is_empty()
    }

    /// Switch screens, arming the first round of the chosen feature.
    pub fn open_screen(&mut self, screen: Screen) {
        if screen != Screen::Home && screen != Screen::Settings {
            self.ensure_user();
        }
        match screen {
            Screen::Tutorial => self.tutorial_next(),
            Screen::Quiz => self.quiz_reset(),
            Screen::Recall => self.recall_reset(),
            Screen::Sentence => self.sentence_reset(),
            Screen::Tracker => self.tracker_refresh(),
            Screen::Settings => self.refresh_settings_view(),
            Screen::Home => {}
        }
        self.ui.screen = screen;
    }

    /// The active user name, for display.
    pub fn user_label(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER)
    }

    pub(super) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }

    /// Fire any due deadline transitions. Called once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.ui.quiz.next_at.is_some_and(|deadline| now >= deadline) {
            self.quiz_next();
        }
        if self.ui.recall.hide_at.is_some_and(|deadline| now >= deadline) {
            self.recall_ask();
        }
        if self.ui.sentence.next_at.is_some_and(|deadline| now >= deadline) {
            self.sentence_next();
        }
    }

    /// Whether a timed transition is pending, so the UI keeps repainting.
    pub fn has_pending_deadline(&self) -> bool {
        self.ui.quiz.next_at.is_some()
            || self.ui.recall.hide_at.is_some()
            || self.ui.sentence.next_at.is_some()
    }

    /// Resolve the user from the name field, persisting it for next launch.
    fn ensure_user(&mut self) {
        let name = {
            let trimmed = self.ui.home.name_input.trim();
            if trimmed.is_empty() {
                DEFAULT_USER.to_string()
            } else {
                trimmed.to_string()
            }
        };
        if self.user_id.as_deref() == Some(name.as_str()) {
            return;
        }
        self.user_id = Some(name.clone());
        if self.settings.last_user.as_deref() != Some(name.as_str()) {
            self.settings.last_user = Some(name);
            if let Err(err) = config::save(&self.settings) {
                tracing::warn!("Failed to persist settings: {err}");
            }
        }
    }

    /// Classifier probability for the card's true class, if available.
    fn model_confidence(&self, card: &Card) -> Option<f32> {
        let classifier = self.classifier.as_ref()?;
        match classifier.confidence_for(&card.image, &card.class_name) {
            Ok(confidence) => confidence,
            Err(err) => {
                tracing::warn!("Confidence scoring failed for {}: {err}", card.image.display());
                None
            }
        }
    }

    /// Insert one attempt row; failures surface in the status bar.
    fn log_attempt(
        &mut self,
        feature: Feature,
        item_id: String,
        user_response: String,
        correct: bool,
        model_confidence: Option<f32>,
        duration: Duration,
    ) {
        let record = AttemptRecord {
            user_id: self
                .user_id
                .clone()
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            feature,
            item_id,
            user_response,
            correct,
            model_confidence,
            duration_seconds: duration.as_secs_f64(),
        };
        let error = match &self.db {
            Some(db) => db.log_attempt(&record).err(),
            None => None,
        };
        if let Some(err) = error {
            tracing::error!("Failed to log attempt: {err}");
            self.set_status(format!("Failed to log attempt: {err}"), StatusTone::Error);
        }
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
