use super::model::{MAX_CALENDARS_PER_OWNER, QUOTA_EXCEEDED_MESSAGE};
use sqlx::{Error, SqlitePool};

const CREATE_CALENDARS: &str = r"
        CREATE TABLE IF NOT EXISTS calendars (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            gender TEXT NOT NULL,
            sleep_quality INTEGER NOT NULL,
            physical_activity INTEGER NOT NULL,
            nutrition INTEGER NOT NULL,
            stress_level INTEGER NOT NULL,
            smoking INTEGER NOT NULL,
            alcohol INTEGER NOT NULL,
            expected_lifespan REAL NOT NULL,
            current_age INTEGER NOT NULL,
            remaining_years REAL NOT NULL,
            lived_weeks INTEGER NOT NULL,
            remaining_weeks INTEGER NOT NULL,
            total_weeks INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        ";

const CREATE_WEEK_ANNOTATIONS: &str = r"
        CREATE TABLE IF NOT EXISTS week_annotations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            calendar_id TEXT NOT NULL REFERENCES calendars(id),
            week_index INTEGER NOT NULL CHECK (week_index >= 0),
            color TEXT,
            events TEXT NOT NULL DEFAULT '[]',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(calendar_id, week_index)
        )
        ";

const CREATE_INDEXES: [&str; 1] = ["CREATE INDEX IF NOT EXISTS idx_calendars_owner ON calendars(owner_id, created_at)"];

/// Rejects the insert that would push an owner past the calendar quota, so
/// concurrent creates cannot both slip under a count-then-insert check.
fn quota_trigger() -> String {
	format!(
		r"
        CREATE TRIGGER IF NOT EXISTS calendars_owner_quota
        BEFORE INSERT ON calendars
        WHEN (SELECT COUNT(*) FROM calendars WHERE owner_id = NEW.owner_id) >= {MAX_CALENDARS_PER_OWNER}
        BEGIN
            SELECT RAISE(ABORT, '{QUOTA_EXCEEDED_MESSAGE}');
        END
        "
	)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
	let mut tx = pool.begin().await?;

	sqlx::query(CREATE_CALENDARS).execute(&mut *tx).await?;
	sqlx::query(CREATE_WEEK_ANNOTATIONS).execute(&mut *tx).await?;
	for statement in CREATE_INDEXES {
		sqlx::query(statement).execute(&mut *tx).await?;
	}
	sqlx::query(&quota_trigger()).execute(&mut *tx).await?;

	tx.commit().await?;
	Ok(())
}
