use crate::error::Result;
use crate::extract::ValidJson;
use crate::models::{EstimateResponse, QuestionnaireRequest};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use garde::Validate;
use tracing::{debug, instrument};

/// Preview of the estimate for a questionnaire; nothing is stored.
#[instrument(skip(state, request))]
pub async fn estimate(State(state): State<AppState>, ValidJson(request): ValidJson<QuestionnaireRequest>) -> Result<Json<EstimateResponse>> {
	request.validate()?;

	let result = life_expectancy::estimate(&request.to_questionnaire()).extend_if_outlived(state.config.outlived_margin_years);
	debug!(expected_lifespan = result.expected_lifespan, total_weeks = result.total_weeks, "estimate computed");

	Ok(Json(EstimateResponse::from(result)))
}
