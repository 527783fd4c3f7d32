use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const USERS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    password_salt TEXT NOT NULL,
    biometric_registered INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
"#;

const ATTENDANCE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS attendance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    date TEXT NOT NULL,
    check_in_time TEXT,
    check_out_time TEXT,
    check_in_latitude REAL,
    check_in_longitude REAL,
    check_out_latitude REAL,
    check_out_longitude REAL,
    UNIQUE(user_id, date)
);
"#;

/// Open the SQLite database and bootstrap the schema.
///
/// A single connection is enough here: all writes for a session go through
/// one engine (and it keeps `sqlite::memory:` pools coherent in tests).
pub async fn init_db(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query(USERS_SCHEMA)
        .execute(&pool)
        .await
        .context("Failed to create users table")?;
    sqlx::query(ATTENDANCE_SCHEMA)
        .execute(&pool)
        .await
        .context("Failed to create attendance table")?;

    Ok(pool)
}
