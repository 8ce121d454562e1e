use rusqlite::Connection;

use super::SessionDbError;

pub(super) fn apply_schema(connection: &Connection) -> Result<(), SessionDbError> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS attempts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            session_date TEXT NOT NULL,
            feature TEXT NOT NULL,
            item_id TEXT NOT NULL,
            user_response TEXT NOT NULL,
            correct INTEGER NOT NULL,
            model_confidence REAL,
            duration_seconds REAL NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_attempts_user_feature
            ON attempts (user_id, feature);",
    )?;
    Ok(())
}
