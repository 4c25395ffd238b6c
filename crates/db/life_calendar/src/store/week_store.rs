use super::model::{CalendarId, WeekAnnotation, WeekContent, WeekEvent};
use super::queries;
use super::transaction::ImmediateTransaction;
use crate::error::{Result, StoreError};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Sparse per-week annotations of a calendar.
///
/// Callers check calendar ownership before reaching this store. Weeks that
/// were never written are absent rather than stored as empty rows.
#[derive(Debug, Clone)]
pub struct WeekStore {
	pool: SqlitePool,
}

impl WeekStore {
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[instrument(skip(self), fields(calendar_id = %calendar_id))]
	pub async fn list_by_calendar(&self, calendar_id: &CalendarId) -> Result<BTreeMap<u32, WeekContent>> {
		let mut conn = self.pool.acquire().await?;
		let rows = queries::fetch_weeks(&mut conn, calendar_id.as_str()).await?;

		let mut weeks = BTreeMap::new();
		for row in rows {
			let week = WeekAnnotation::try_from(row)?;
			weeks.insert(week.week_index, week.into_content());
		}
		debug!(count = weeks.len(), "weeks listed");
		Ok(weeks)
	}

	/// Never fails for an unwritten week; returns the empty annotation instead.
	#[instrument(skip(self), fields(calendar_id = %calendar_id))]
	pub async fn get_week(&self, calendar_id: &CalendarId, week_index: u32) -> Result<WeekAnnotation> {
		let mut conn = self.pool.acquire().await?;
		match queries::fetch_week(&mut conn, calendar_id.as_str(), week_index).await? {
			Some(row) => WeekAnnotation::try_from(row),
			None => Ok(WeekAnnotation::empty(week_index)),
		}
	}

	/// Replaces colour and events of the week wholesale. A week written
	/// without events is removed, so it reads back as unwritten.
	#[instrument(skip(self, content), fields(calendar_id = %calendar_id, events = content.events.len()))]
	pub async fn upsert_week(&self, calendar_id: &CalendarId, week_index: u32, content: WeekContent) -> Result<WeekAnnotation> {
		let mut conn = self.pool.acquire().await?;
		Self::write_week(&mut conn, calendar_id, week_index, content).await
	}

	/// Adds `events` after the week's existing ones. A supplied colour
	/// replaces the stored one; `None` keeps it.
	#[instrument(skip(self, color, events), fields(calendar_id = %calendar_id, added = events.len()))]
	pub async fn append_events(&self, calendar_id: &CalendarId, week_index: u32, color: Option<String>, events: Vec<WeekEvent>) -> Result<WeekAnnotation> {
		let mut tx = ImmediateTransaction::begin(&self.pool).await?;
		let outcome = Self::merge_events(&mut tx, calendar_id, week_index, color, events).await;
		tx.finish(outcome).await
	}

	async fn merge_events(conn: &mut SqliteConnection, calendar_id: &CalendarId, week_index: u32, color: Option<String>, events: Vec<WeekEvent>) -> Result<WeekAnnotation> {
		let existing = match queries::fetch_week(conn, calendar_id.as_str(), week_index).await? {
			Some(row) => WeekAnnotation::try_from(row)?.into_content(),
			None => WeekContent::default(),
		};

		let mut merged = existing.events;
		merged.extend(events);
		let content = WeekContent {
			color: color.or(existing.color),
			events: merged,
		};

		Self::write_week(conn, calendar_id, week_index, content).await
	}

	/// `NotFound` when the week was never written.
	#[instrument(skip(self), fields(calendar_id = %calendar_id))]
	pub async fn delete_week(&self, calendar_id: &CalendarId, week_index: u32) -> Result<()> {
		let mut conn = self.pool.acquire().await?;
		let removed = queries::delete_week(&mut conn, calendar_id.as_str(), week_index).await?;
		if removed == 0 {
			return Err(StoreError::week_not_found());
		}
		Ok(())
	}

	/// Removes every week of a calendar on the caller's connection. Only the
	/// calendar delete calls this, inside its own transaction.
	pub async fn delete_all_for_calendar(conn: &mut SqliteConnection, calendar_id: &CalendarId) -> std::result::Result<u64, sqlx::Error> {
		let removed = queries::delete_weeks_for_calendar(conn, calendar_id.as_str()).await?;
		debug!(calendar_id = %calendar_id, removed, "weeks removed with calendar");
		Ok(removed)
	}

	async fn write_week(conn: &mut SqliteConnection, calendar_id: &CalendarId, week_index: u32, content: WeekContent) -> Result<WeekAnnotation> {
		let content = content.normalized();
		if content.events.is_empty() {
			if !queries::calendar_exists(conn, calendar_id.as_str()).await? {
				return Err(StoreError::calendar_not_found());
			}
			queries::delete_week(conn, calendar_id.as_str(), week_index).await?;
			return Ok(WeekAnnotation::empty(week_index));
		}

		let events = serde_json::to_string(&content.events)?;

		let row = queries::upsert_week(conn, calendar_id.as_str(), week_index, content.color.as_deref(), &events)
			.await
			.map_err(|err| match &err {
				sqlx::Error::Database(db) if db.is_foreign_key_violation() => StoreError::calendar_not_found(),
				_ => StoreError::Database(err),
			})?;

		WeekAnnotation::try_from(row)
	}
}
