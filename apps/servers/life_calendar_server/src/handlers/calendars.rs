use crate::error::Result;
use crate::extract::ValidJson;
use crate::identity::Owner;
use crate::models::CreateCalendarRequest;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;
use life_calendar::{Calendar, CalendarId, CreateCalendar};
use tracing::{info, instrument};

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn list(State(state): State<AppState>, owner: Owner) -> Result<Json<Vec<Calendar>>> {
	let calendars = state.db.calendars().list(&owner.0).await?;
	Ok(Json(calendars))
}

/// Estimates from the submitted questionnaire and stores both together.
#[instrument(skip(state, request), fields(owner_id = %owner.0))]
pub async fn create(State(state): State<AppState>, owner: Owner, ValidJson(request): ValidJson<CreateCalendarRequest>) -> Result<(StatusCode, Json<Calendar>)> {
	request.validate()?;

	let questionnaire = request.questionnaire.to_questionnaire();
	let estimation = life_expectancy::estimate(&questionnaire).extend_if_outlived(state.config.outlived_margin_years);

	let mut new_calendar = CreateCalendar::new(questionnaire, &estimation);
	if let Some(name) = request.name {
		new_calendar = new_calendar.with_name(name);
	}

	let calendar = state.db.calendars().create(&owner.0, new_calendar).await?;
	info!(calendar_id = %calendar.id, "calendar saved");
	Ok((StatusCode::CREATED, Json(calendar)))
}

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn get(State(state): State<AppState>, owner: Owner, Path(id): Path<String>) -> Result<Json<Calendar>> {
	let calendar = state.db.calendars().get(&owner.0, &CalendarId::from(id)).await?;
	Ok(Json(calendar))
}

#[instrument(skip(state), fields(owner_id = %owner.0))]
pub async fn delete(State(state): State<AppState>, owner: Owner, Path(id): Path<String>) -> Result<StatusCode> {
	state.db.calendars().delete(&owner.0, &CalendarId::from(id)).await?;
	Ok(StatusCode::NO_CONTENT)
}
