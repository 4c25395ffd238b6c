use super::model::{Calendar, CalendarId, CreateCalendar, OwnerId, MAX_CALENDARS_PER_OWNER, QUOTA_EXCEEDED_MESSAGE};
use super::queries::{self, NewCalendarRow};
use super::transaction::ImmediateTransaction;
use super::week_store::WeekStore;
use crate::error::{Result, StoreError};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument, warn};

/// Calendar records and their lifecycle rules: the per-owner quota and the
/// cascading delete of week annotations.
#[derive(Debug, Clone)]
pub struct CalendarRepository {
	pool: SqlitePool,
}

impl CalendarRepository {
	pub const fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Checks the quota and inserts under the database write lock, so
	/// concurrent creates for one owner queue instead of racing the count.
	#[instrument(skip(self, calendar), fields(owner_id = %owner_id))]
	pub async fn create(&self, owner_id: &OwnerId, calendar: CreateCalendar) -> Result<Calendar> {
		let mut tx = ImmediateTransaction::begin(&self.pool).await?;
		let outcome = Self::insert_within_quota(&mut tx, owner_id, &calendar).await;
		let stored = tx.finish(outcome).await?;

		info!(calendar_id = %stored.id, "calendar created");
		Ok(stored)
	}

	async fn insert_within_quota(conn: &mut SqliteConnection, owner_id: &OwnerId, calendar: &CreateCalendar) -> Result<Calendar> {
		let owned = queries::count_calendars(conn, owner_id).await?;
		if owned >= MAX_CALENDARS_PER_OWNER {
			warn!(owned, "calendar quota reached");
			return Err(StoreError::QuotaExceeded { limit: MAX_CALENDARS_PER_OWNER });
		}

		let id = CalendarId::generate();
		let name = calendar.display_name();
		let row = NewCalendarRow {
			id: id.as_str(),
			owner_id,
			name: &name,
			questionnaire: &calendar.questionnaire,
			figures: &calendar.figures,
			now: Utc::now(),
		};
		queries::insert_calendar(conn, row).await.map_err(map_quota_violation)?;

		let stored = queries::fetch_calendar(conn, owner_id, id.as_str()).await?.ok_or_else(StoreError::calendar_not_found)?;
		Ok(Calendar::try_from(stored)?)
	}

	/// The owner's calendars, newest first.
	#[instrument(skip(self), fields(owner_id = %owner_id))]
	pub async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Calendar>> {
		let mut conn = self.pool.acquire().await?;
		let rows = queries::fetch_calendars_by_owner(&mut conn, owner_id).await?;
		debug!(count = rows.len(), "calendars listed");
		rows.into_iter().map(|row| Calendar::try_from(row).map_err(StoreError::from)).collect()
	}

	/// `NotFound` unless the calendar exists and belongs to `owner_id`.
	#[instrument(skip(self), fields(owner_id = %owner_id, calendar_id = %id))]
	pub async fn get(&self, owner_id: &OwnerId, id: &CalendarId) -> Result<Calendar> {
		let mut conn = self.pool.acquire().await?;
		let row = queries::fetch_calendar(&mut conn, owner_id, id.as_str()).await?.ok_or_else(StoreError::calendar_not_found)?;
		Ok(Calendar::try_from(row)?)
	}

	pub async fn count(&self, owner_id: &OwnerId) -> Result<i64> {
		let mut conn = self.pool.acquire().await?;
		Ok(queries::count_calendars(&mut conn, owner_id).await?)
	}

	/// Deletes the calendar and all of its weeks in one transaction. Any
	/// failure after the ownership check rolls both deletes back.
	#[instrument(skip(self), fields(owner_id = %owner_id, calendar_id = %id))]
	pub async fn delete(&self, owner_id: &OwnerId, id: &CalendarId) -> Result<()> {
		let mut tx = ImmediateTransaction::begin(&self.pool).await?;
		let outcome = Self::cascade_delete(&mut tx, owner_id, id).await;
		let weeks = match outcome {
			Ok(weeks) => {
				tx.commit().await.map_err(StoreError::ConflictDuringCascade)?;
				weeks
			}
			Err(err) => {
				tx.rollback().await;
				return Err(err);
			}
		};

		info!(weeks, "calendar deleted");
		Ok(())
	}

	async fn cascade_delete(conn: &mut SqliteConnection, owner_id: &OwnerId, id: &CalendarId) -> Result<u64> {
		if !queries::calendar_is_owned(conn, owner_id, id.as_str()).await? {
			return Err(StoreError::calendar_not_found());
		}

		let weeks = WeekStore::delete_all_for_calendar(conn, id).await.map_err(StoreError::ConflictDuringCascade)?;
		let removed = queries::delete_calendar(conn, owner_id, id.as_str()).await.map_err(StoreError::ConflictDuringCascade)?;
		if removed == 0 {
			return Err(StoreError::calendar_not_found());
		}
		Ok(weeks)
	}
}

fn map_quota_violation(err: sqlx::Error) -> StoreError {
	match &err {
		sqlx::Error::Database(db) if db.message().contains(QUOTA_EXCEEDED_MESSAGE) => StoreError::QuotaExceeded { limit: MAX_CALENDARS_PER_OWNER },
		_ => StoreError::Database(err),
	}
}
