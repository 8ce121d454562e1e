//! Attempt log database.
//!
//! Every scored answer (quiz, timed recall, sentence builder) is stored as
//! one row in a local SQLite file so the performance tracker can aggregate
//! accuracy per exercise.

mod read;
mod schema;
mod write;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

pub use read::{AttemptRow, FeatureAccuracy};

/// File name of the attempt log inside the app root.
pub const SESSIONS_DB_FILE_NAME: &str = "sessions.db";

/// Errors raised by the attempt log.
#[derive(Debug, Error)]
pub enum SessionDbError {
    /// The database file could not be opened.
    #[error("Failed to open session database {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// A statement failed.
    #[error("Session database error: {0}")]
    Sql(#[from] rusqlite::Error),
    /// The session date could not be formatted.
    #[error("Failed to format session date: {0}")]
    FormatDate(#[from] time::error::Format),
}

/// Scored exercises, used as the `feature` column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Quiz,
    TimedRecall,
    SentenceBuilder,
}

impl Feature {
    /// Stable identifier stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Quiz => "quiz",
            Feature::TimedRecall => "timed_recall",
            Feature::SentenceBuilder => "sentence_builder",
        }
    }

    /// Human-readable label for the tracker chart.
    pub fn label_for(feature: &str) -> &str {
        match feature {
            "quiz" => "Quiz",
            "timed_recall" => "Timed Recall",
            "sentence_builder" => "Sentence Builder",
            other => other,
        }
    }
}

/// One attempt to be logged.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub user_id: String,
    pub feature: Feature,
    /// Image path or sentence index the round was built from.
    pub item_id: String,
    pub user_response: String,
    pub correct: bool,
    /// Classifier probability for the true class, if a model was loaded.
    pub model_confidence: Option<f32>,
    pub duration_seconds: f64,
}

/// Open handle to the attempt log.
pub struct SessionDatabase {
    connection: Connection,
}

impl SessionDatabase {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, SessionDbError> {
        let connection = Connection::open(path).map_err(|source| SessionDbError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        schema::apply_schema(&connection)?;
        Ok(Self { connection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn attempt(feature: Feature, correct: bool) -> AttemptRecord {
        AttemptRecord {
            user_id: "child_1".to_string(),
            feature,
            item_id: "images/cat/a.png".to_string(),
            user_response: "cat".to_string(),
            correct,
            model_confidence: Some(0.82),
            duration_seconds: 1.4,
        }
    }

    #[test]
    fn logged_attempts_aggregate_per_feature() {
        let dir = tempdir().unwrap();
        let db = SessionDatabase::open(&dir.path().join(SESSIONS_DB_FILE_NAME)).unwrap();
        db.log_attempt(&attempt(Feature::Quiz, true)).unwrap();
        db.log_attempt(&attempt(Feature::Quiz, false)).unwrap();
        db.log_attempt(&attempt(Feature::TimedRecall, true)).unwrap();

        let rows = db.feature_accuracy("child_1").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].feature, "quiz");
        assert_eq!(rows[0].attempts, 2);
        assert_eq!(rows[0].correct, 1);
        assert!((rows[0].accuracy_pct() - 50.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].feature, "timed_recall");
        assert!((rows[1].accuracy_pct() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_is_scoped_to_the_user() {
        let dir = tempdir().unwrap();
        let db = SessionDatabase::open(&dir.path().join(SESSIONS_DB_FILE_NAME)).unwrap();
        db.log_attempt(&attempt(Feature::Quiz, true)).unwrap();
        assert!(db.feature_accuracy("someone_else").unwrap().is_empty());
    }

    #[test]
    fn recent_attempts_are_newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let db = SessionDatabase::open(&dir.path().join(SESSIONS_DB_FILE_NAME)).unwrap();
        for idx in 0..5 {
            let mut record = attempt(Feature::SentenceBuilder, idx % 2 == 0);
            record.item_id = idx.to_string();
            db.log_attempt(&record).unwrap();
        }
        let rows = db.recent_attempts("child_1", 3).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].item_id, "4");
        assert!(rows[0].model_confidence.is_some());
    }

    #[test]
    fn missing_confidence_round_trips_as_null() {
        let dir = tempdir().unwrap();
        let db = SessionDatabase::open(&dir.path().join(SESSIONS_DB_FILE_NAME)).unwrap();
        let mut record = attempt(Feature::Quiz, true);
        record.model_confidence = None;
        db.log_attempt(&record).unwrap();
        let rows = db.recent_attempts("child_1", 10).unwrap();
        assert_eq!(rows[0].model_confidence, None);
    }
}
