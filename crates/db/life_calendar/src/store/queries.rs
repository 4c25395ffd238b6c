use super::model::{CalendarFigures, CalendarRow, OwnerId, WeekRow};
use chrono::{DateTime, Utc};
use life_expectancy::Questionnaire;
use sqlx::{Error, SqliteConnection};

const CALENDAR_COLUMNS: &str = "id, owner_id, name, birth_date, gender, sleep_quality, physical_activity, nutrition, stress_level, smoking, alcohol, expected_lifespan, current_age, remaining_years, lived_weeks, remaining_weeks, total_weeks, created_at, updated_at";

pub async fn count_calendars(conn: &mut SqliteConnection, owner_id: &OwnerId) -> Result<i64, Error> {
	sqlx::query_scalar("SELECT COUNT(*) FROM calendars WHERE owner_id = ?")
		.bind(owner_id.as_str())
		.fetch_one(conn)
		.await
}

pub struct NewCalendarRow<'a> {
	pub id: &'a str,
	pub owner_id: &'a OwnerId,
	pub name: &'a str,
	pub questionnaire: &'a Questionnaire,
	pub figures: &'a CalendarFigures,
	pub now: DateTime<Utc>,
}

pub async fn insert_calendar(conn: &mut SqliteConnection, row: NewCalendarRow<'_>) -> Result<(), Error> {
	let q = row.questionnaire;
	let f = row.figures;
	sqlx::query(
		r"
        INSERT INTO calendars (id, owner_id, name, birth_date, gender, sleep_quality, physical_activity, nutrition, stress_level, smoking, alcohol,
                               expected_lifespan, current_age, remaining_years, lived_weeks, remaining_weeks, total_weeks, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
	)
	.bind(row.id)
	.bind(row.owner_id.as_str())
	.bind(row.name)
	.bind(q.birth_date)
	.bind(q.gender.as_str())
	.bind(i64::from(q.sleep_quality))
	.bind(i64::from(q.physical_activity))
	.bind(i64::from(q.nutrition))
	.bind(i64::from(q.stress_level))
	.bind(i64::from(q.smoking))
	.bind(i64::from(q.alcohol))
	.bind(f.expected_lifespan)
	.bind(i64::from(f.current_age))
	.bind(f.remaining_years)
	.bind(i64::from(f.lived_weeks))
	.bind(i64::from(f.remaining_weeks))
	.bind(i64::from(f.total_weeks))
	.bind(row.now)
	.bind(row.now)
	.execute(conn)
	.await?;

	Ok(())
}

pub async fn fetch_calendar(conn: &mut SqliteConnection, owner_id: &OwnerId, id: &str) -> Result<Option<CalendarRow>, Error> {
	let sql = format!("SELECT {CALENDAR_COLUMNS} FROM calendars WHERE id = ? AND owner_id = ?");
	sqlx::query_as(&sql)
		.bind(id)
		.bind(owner_id.as_str())
		.fetch_optional(conn)
		.await
}

pub async fn fetch_calendars_by_owner(conn: &mut SqliteConnection, owner_id: &OwnerId) -> Result<Vec<CalendarRow>, Error> {
	let sql = format!("SELECT {CALENDAR_COLUMNS} FROM calendars WHERE owner_id = ? ORDER BY created_at DESC, rowid DESC");
	sqlx::query_as(&sql).bind(owner_id.as_str()).fetch_all(conn).await
}

pub async fn calendar_is_owned(conn: &mut SqliteConnection, owner_id: &OwnerId, id: &str) -> Result<bool, Error> {
	let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM calendars WHERE id = ? AND owner_id = ?")
		.bind(id)
		.bind(owner_id.as_str())
		.fetch_optional(conn)
		.await?;
	Ok(found.is_some())
}

pub async fn calendar_exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, Error> {
	let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM calendars WHERE id = ?").bind(id).fetch_optional(conn).await?;
	Ok(found.is_some())
}

pub async fn delete_calendar(conn: &mut SqliteConnection, owner_id: &OwnerId, id: &str) -> Result<u64, Error> {
	let result = sqlx::query("DELETE FROM calendars WHERE id = ? AND owner_id = ?")
		.bind(id)
		.bind(owner_id.as_str())
		.execute(conn)
		.await?;
	Ok(result.rows_affected())
}

pub async fn fetch_weeks(conn: &mut SqliteConnection, calendar_id: &str) -> Result<Vec<WeekRow>, Error> {
	sqlx::query_as("SELECT week_index, color, events FROM week_annotations WHERE calendar_id = ? ORDER BY week_index ASC")
		.bind(calendar_id)
		.fetch_all(conn)
		.await
}

pub async fn fetch_week(conn: &mut SqliteConnection, calendar_id: &str, week_index: u32) -> Result<Option<WeekRow>, Error> {
	sqlx::query_as("SELECT week_index, color, events FROM week_annotations WHERE calendar_id = ? AND week_index = ?")
		.bind(calendar_id)
		.bind(i64::from(week_index))
		.fetch_optional(conn)
		.await
}

/// Single-statement upsert; the unique key decides between insert and update.
pub async fn upsert_week(conn: &mut SqliteConnection, calendar_id: &str, week_index: u32, color: Option<&str>, events_json: &str) -> Result<WeekRow, Error> {
	sqlx::query_as(
		r"
        INSERT INTO week_annotations (calendar_id, week_index, color, events)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(calendar_id, week_index) DO UPDATE SET
            color = excluded.color,
            events = excluded.events,
            updated_at = CURRENT_TIMESTAMP
        RETURNING week_index, color, events
        ",
	)
	.bind(calendar_id)
	.bind(i64::from(week_index))
	.bind(color)
	.bind(events_json)
	.fetch_one(conn)
	.await
}

pub async fn delete_week(conn: &mut SqliteConnection, calendar_id: &str, week_index: u32) -> Result<u64, Error> {
	let result = sqlx::query("DELETE FROM week_annotations WHERE calendar_id = ? AND week_index = ?")
		.bind(calendar_id)
		.bind(i64::from(week_index))
		.execute(conn)
		.await?;
	Ok(result.rows_affected())
}

pub async fn delete_weeks_for_calendar(conn: &mut SqliteConnection, calendar_id: &str) -> Result<u64, Error> {
	let result = sqlx::query("DELETE FROM week_annotations WHERE calendar_id = ?")
		.bind(calendar_id)
		.execute(conn)
		.await?;
	Ok(result.rows_affected())
}
