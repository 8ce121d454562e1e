use rusqlite::params;
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::{AttemptRecord, SessionDatabase, SessionDbError};

const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

impl SessionDatabase {
    /// Insert one attempt row, stamped with today's date.
    pub fn log_attempt(&self, record: &AttemptRecord) -> Result<(), SessionDbError> {
        let session_date = today()?;
        let mut stmt = self.connection.prepare_cached(
            "INSERT INTO attempts
                (user_id, session_date, feature, item_id, user_response,
                 correct, model_confidence, duration_seconds)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        stmt.execute(params![
            record.user_id,
            session_date,
            record.feature.as_str(),
            record.item_id,
            record.user_response,
            record.correct as i64,
            record.model_confidence.map(f64::from),
            record.duration_seconds,
        ])?;
        Ok(())
    }
}

fn today() -> Result<String, SessionDbError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(DATE_FORMAT)?)
}
