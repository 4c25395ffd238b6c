use crate::error::Result;
use crate::extract::ValidJson;
use crate::identity::Owner;
use crate::models::{AddEventsRequest, WeekDetailResponse, WeekRequest};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use garde::Validate;
use life_calendar::{Calendar, CalendarId, OwnerId, WeekAnnotation, WeekContent};
use life_expectancy::week_index_on;
use nest::http::Error as NestError;
use std::collections::BTreeMap;
use tracing::instrument;

/// Every week operation first proves the caller owns the calendar.
async fn owned_calendar(state: &AppState, owner: &OwnerId, id: String) -> Result<Calendar> {
	Ok(state.db.calendars().get(owner, &CalendarId::from(id)).await?)
}

fn parse_week_index(raw: &str) -> Result<u32> {
	raw.parse()
		.map_err(|_| NestError::unprocessable_entity([("weekIndex", "week index must be a non-negative integer")]).into())
}

/// Week indices address the calendar's grid, so they stop at `total_weeks`.
fn within_grid(index: u32, calendar: &Calendar) -> Result<u32> {
	if index >= calendar.figures.total_weeks {
		return Err(NestError::unprocessable_entity([("weekIndex", format!("week index must be below {}", calendar.figures.total_weeks))]).into());
	}
	Ok(index)
}

fn checked_week_index(raw: &str, calendar: &Calendar) -> Result<u32> {
	within_grid(parse_week_index(raw)?, calendar)
}

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn list(State(state): State<AppState>, owner: Owner, Path(calendar_id): Path<String>) -> Result<Json<BTreeMap<u32, WeekContent>>> {
	let calendar = owned_calendar(&state, &owner.0, calendar_id).await?;
	let weeks = state.db.weeks().list_by_calendar(&calendar.id).await?;
	Ok(Json(weeks))
}

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn get(State(state): State<AppState>, owner: Owner, Path((calendar_id, week_index)): Path<(String, String)>) -> Result<Json<WeekDetailResponse>> {
	let calendar = owned_calendar(&state, &owner.0, calendar_id).await?;
	let week_index = checked_week_index(&week_index, &calendar)?;

	let week = state.db.weeks().get_week(&calendar.id, week_index).await?;
	Ok(Json(WeekDetailResponse::new(week, calendar.questionnaire.birth_date, Utc::now().date_naive())))
}

#[instrument(skip(state, request), fields(owner_id = %owner.0))]
pub async fn put(
	State(state): State<AppState>,
	owner: Owner,
	Path((calendar_id, week_index)): Path<(String, String)>,
	ValidJson(request): ValidJson<WeekRequest>,
) -> Result<Json<WeekAnnotation>> {
	let calendar = owned_calendar(&state, &owner.0, calendar_id).await?;
	let week_index = checked_week_index(&week_index, &calendar)?;
	request.validate()?;

	let week = state.db.weeks().upsert_week(&calendar.id, week_index, WeekContent::from(request)).await?;
	Ok(Json(week))
}

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn delete(State(state): State<AppState>, owner: Owner, Path((calendar_id, week_index)): Path<(String, String)>) -> Result<StatusCode> {
	let calendar = owned_calendar(&state, &owner.0, calendar_id).await?;
	let week_index = checked_week_index(&week_index, &calendar)?;

	state.db.weeks().delete_week(&calendar.id, week_index).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// Appends events to the week that contains `date`.
#[instrument(skip(state, request), fields(owner_id = %owner.0))]
pub async fn add_on_date(
	State(state): State<AppState>,
	owner: Owner,
	Path((calendar_id, date)): Path<(String, String)>,
	ValidJson(request): ValidJson<AddEventsRequest>,
) -> Result<Json<WeekAnnotation>> {
	let calendar = owned_calendar(&state, &owner.0, calendar_id).await?;
	let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| NestError::unprocessable_entity([("date", "date must look like YYYY-MM-DD")]))?;
	let week_index = week_index_on(calendar.questionnaire.birth_date, date).ok_or_else(|| NestError::unprocessable_entity([("date", "date is before the birth date")]))?;
	let week_index = within_grid(week_index, &calendar)?;
	request.validate()?;

	let (color, events) = request.into_parts();
	let week = state.db.weeks().append_events(&calendar.id, week_index, color, events).await?;
	Ok(Json(week))
}
