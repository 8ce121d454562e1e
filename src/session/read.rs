use rusqlite::params;

use super::{SessionDatabase, SessionDbError};

/// Aggregated accuracy for one feature, as shown in the tracker chart.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAccuracy {
    /// Stable feature identifier (`quiz`, `timed_recall`, ...).
    pub feature: String,
    pub attempts: i64,
    pub correct: i64,
}

impl FeatureAccuracy {
    /// Percentage of correct attempts, 0 when there are none.
    pub fn accuracy_pct(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.attempts as f64
    }
}

/// One logged attempt, as shown in the tracker detail list.
#[derive(Debug, Clone)]
pub struct AttemptRow {
    pub session_date: String,
    pub feature: String,
    pub item_id: String,
    pub user_response: String,
    pub correct: bool,
    pub model_confidence: Option<f64>,
    pub duration_seconds: f64,
}

impl SessionDatabase {
    /// Per-feature attempt totals for one user, ordered by feature name.
    pub fn feature_accuracy(&self, user_id: &str) -> Result<Vec<FeatureAccuracy>, SessionDbError> {
        let mut stmt = self.connection.prepare_cached(
            "SELECT feature, COUNT(*), SUM(correct)
             FROM attempts
             WHERE user_id = ?1
             GROUP BY feature
             ORDER BY feature ASC",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(FeatureAccuracy {
                    feature: row.get(0)?,
                    attempts: row.get(1)?,
                    correct: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Most recent attempts for one user, newest first.
    pub fn recent_attempts(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AttemptRow>, SessionDbError> {
        let mut stmt = self.connection.prepare_cached(
            "SELECT session_date, feature, item_id, user_response,
                    correct, model_confidence, duration_seconds
             FROM attempts
             WHERE user_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![user_id, limit as i64], |row| {
                Ok(AttemptRow {
                    session_date: row.get(0)?,
                    feature: row.get(1)?,
                    item_id: row.get(2)?,
                    user_response: row.get(3)?,
                    correct: row.get::<_, i64>(4)? != 0,
                    model_confidence: row.get(5)?,
                    duration_seconds: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
