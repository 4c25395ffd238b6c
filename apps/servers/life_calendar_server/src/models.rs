use chrono::NaiveDate;
use garde::Validate;
use life_calendar::{WeekAnnotation, WeekContent, WeekEvent};
use life_expectancy::{age_on, grid_position, week_index_on, week_phase, week_span, EstimationResult, Gender, GridPosition, Questionnaire, WeekPhase, WeekSpan};
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_AGE_YEARS: u32 = 120;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireRequest {
	#[garde(custom(validate_birth_date))]
	pub birth_date: NaiveDate,

	#[garde(length(min = 1, max = 20))]
	pub gender: String,

	#[garde(range(min = 1, max = 5))]
	pub sleep_quality: u8,

	#[garde(range(min = 1, max = 5))]
	pub physical_activity: u8,

	#[garde(range(min = 1, max = 5))]
	pub nutrition: u8,

	#[garde(range(min = 1, max = 5))]
	pub stress_level: u8,

	#[garde(range(min = 1, max = 3))]
	pub smoking: u8,

	#[garde(range(min = 1, max = 3))]
	pub alcohol: u8,
}

impl QuestionnaireRequest {
	pub fn to_questionnaire(&self) -> Questionnaire {
		Questionnaire {
			birth_date: self.birth_date,
			gender: Gender::from_label(&self.gender),
			sleep_quality: self.sleep_quality,
			physical_activity: self.physical_activity,
			nutrition: self.nutrition,
			stress_level: self.stress_level,
			smoking: self.smoking,
			alcohol: self.alcohol,
		}
	}
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_birth_date(birth_date: &NaiveDate, _context: &()) -> garde::Result {
	let today = chrono::Local::now().date_naive();
	if *birth_date > today {
		return Err(garde::Error::new("birth date cannot be in the future"));
	}
	if age_on(*birth_date, today) >= MAX_AGE_YEARS {
		return Err(garde::Error::new(format!("age must be below {MAX_AGE_YEARS} years")));
	}
	Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarRequest {
	#[serde(default)]
	#[garde(custom(validate_calendar_name))]
	pub name: Option<String>,

	#[serde(flatten)]
	#[garde(dive)]
	pub questionnaire: QuestionnaireRequest,
}

#[allow(clippy::ref_option)]
fn validate_calendar_name(name: &Option<String>, _context: &()) -> garde::Result {
	let Some(name) = name else {
		return Ok(());
	};
	let length = name.trim().chars().count();
	if length == 0 {
		return Err(garde::Error::new("name cannot be blank"));
	}
	if length > 30 {
		return Err(garde::Error::new("name must be at most 30 characters"));
	}
	Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventRequest {
	#[garde(custom(validate_event_name))]
	pub name: String,

	#[serde(default)]
	#[garde(length(chars, max = 500))]
	pub description: Option<String>,

	#[serde(default)]
	#[garde(length(chars, max = 10))]
	pub emoji: Option<String>,
}

fn validate_event_name(name: &str, _context: &()) -> garde::Result {
	let length = name.trim().chars().count();
	if length == 0 {
		return Err(garde::Error::new("event name is required"));
	}
	if length > 100 {
		return Err(garde::Error::new("event name must be at most 100 characters"));
	}
	Ok(())
}

impl From<EventRequest> for WeekEvent {
	fn from(event: EventRequest) -> Self {
		Self {
			name: event.name.trim().to_string(),
			description: non_blank(event.description),
			emoji: non_blank(event.emoji),
		}
	}
}

/// Body of `PUT .../week/:weekIndex`; replaces the whole week.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeekRequest {
	#[serde(default, deserialize_with = "blank_as_none")]
	#[garde(pattern(r"^#?([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$"))]
	pub color: Option<String>,

	#[serde(default)]
	#[garde(dive)]
	pub events: Vec<EventRequest>,
}

impl From<WeekRequest> for WeekContent {
	fn from(request: WeekRequest) -> Self {
		Self {
			color: request.color.map(|color| canonical_color(&color)),
			events: request.events.into_iter().map(WeekEvent::from).collect(),
		}
	}
}

/// Body of `POST .../date/:date`; appends to the week containing the date.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddEventsRequest {
	#[serde(default, deserialize_with = "blank_as_none")]
	#[garde(pattern(r"^#?([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$"))]
	pub color: Option<String>,

	#[garde(length(min = 1), dive)]
	pub events: Vec<EventRequest>,
}

impl AddEventsRequest {
	pub fn into_parts(self) -> (Option<String>, Vec<WeekEvent>) {
		(self.color.map(|color| canonical_color(&color)), self.events.into_iter().map(WeekEvent::from).collect())
	}
}

/// Colours are stored with a leading `#`.
fn canonical_color(color: &str) -> String {
	if color.starts_with('#') {
		color.to_string()
	} else {
		format!("#{color}")
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<String>::deserialize(deserializer)?;
	Ok(value.filter(|v| !v.trim().is_empty()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
	#[serde(flatten)]
	pub estimation: EstimationResult,
	pub lived_percent: u32,
	pub summary: String,
}

impl From<EstimationResult> for EstimateResponse {
	fn from(estimation: EstimationResult) -> Self {
		Self {
			lived_percent: estimation.lived_percent(),
			summary: estimation.summary(),
			estimation,
		}
	}
}

/// A single week with its grid cell, its dates and whether it is already
/// lived as of `today`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDetailResponse {
	#[serde(flatten)]
	pub week: WeekAnnotation,
	pub position: GridPosition,
	pub span: Option<WeekSpan>,
	pub phase: WeekPhase,
}

impl WeekDetailResponse {
	pub fn new(week: WeekAnnotation, birth_date: NaiveDate, today: NaiveDate) -> Self {
		let current = week_index_on(birth_date, today).unwrap_or(0);
		Self {
			position: grid_position(week.week_index),
			span: week_span(birth_date, week.week_index),
			phase: week_phase(week.week_index, current),
			week,
		}
	}
}
