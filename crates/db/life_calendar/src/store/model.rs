use chrono::{DateTime, NaiveDate, Utc};
use life_expectancy::{EstimationResult, Gender, Questionnaire};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_CALENDARS_PER_OWNER: i64 = 3;
pub const DEFAULT_CALENDAR_NAME: &str = "My Calendar";
/// Raised by the quota trigger; matched to recognise the failure.
pub const QUOTA_EXCEEDED_MESSAGE: &str = "calendar quota exceeded";

/// Opaque identity handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for OwnerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(pub String);

impl CalendarId {
	pub fn generate() -> Self {
		Self(uuid::Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for CalendarId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl fmt::Display for CalendarId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// The part of an estimate that is stored with a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFigures {
	pub expected_lifespan: f64,
	pub current_age: u32,
	pub remaining_years: f64,
	pub lived_weeks: u32,
	pub remaining_weeks: u32,
	pub total_weeks: u32,
}

impl From<&EstimationResult> for CalendarFigures {
	fn from(result: &EstimationResult) -> Self {
		Self {
			expected_lifespan: result.expected_lifespan,
			current_age: result.current_age,
			remaining_years: result.remaining_years,
			lived_weeks: result.lived_weeks,
			remaining_weeks: result.remaining_weeks,
			total_weeks: result.total_weeks,
		}
	}
}

#[derive(Debug, Clone)]
pub struct CreateCalendar {
	pub name: Option<String>,
	pub questionnaire: Questionnaire,
	pub figures: CalendarFigures,
}

impl CreateCalendar {
	pub fn new(questionnaire: Questionnaire, estimation: &EstimationResult) -> Self {
		Self {
			name: None,
			questionnaire,
			figures: CalendarFigures::from(estimation),
		}
	}

	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Trimmed name, or the default when blank.
	pub fn display_name(&self) -> String {
		self
			.name
			.as_deref()
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.unwrap_or(DEFAULT_CALENDAR_NAME)
			.to_string()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
	pub id: CalendarId,
	pub owner_id: OwnerId,
	pub name: String,
	#[serde(flatten)]
	pub questionnaire: Questionnaire,
	#[serde(flatten)]
	pub figures: CalendarFigures,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEvent {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub emoji: Option<String>,
}

impl WeekEvent {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: None,
			emoji: None,
		}
	}
}

/// Colour and events of one week, as written by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekContent {
	pub color: Option<String>,
	#[serde(default)]
	pub events: Vec<WeekEvent>,
}

impl WeekContent {
	/// A week without events carries no colour either.
	#[must_use]
	pub fn normalized(mut self) -> Self {
		if self.events.is_empty() {
			self.color = None;
		}
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAnnotation {
	pub week_index: u32,
	pub color: Option<String>,
	pub events: Vec<WeekEvent>,
}

impl WeekAnnotation {
	pub const fn empty(week_index: u32) -> Self {
		Self {
			week_index,
			color: None,
			events: Vec::new(),
		}
	}

	pub fn into_content(self) -> WeekContent {
		WeekContent {
			color: self.color,
			events: self.events,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CalendarRow {
	pub id: String,
	pub owner_id: String,
	pub name: String,
	pub birth_date: NaiveDate,
	pub gender: String,
	pub sleep_quality: i64,
	pub physical_activity: i64,
	pub nutrition: i64,
	pub stress_level: i64,
	pub smoking: i64,
	pub alcohol: i64,
	pub expected_lifespan: f64,
	pub current_age: i64,
	pub remaining_years: f64,
	pub lived_weeks: i64,
	pub remaining_weeks: i64,
	pub total_weeks: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl TryFrom<CalendarRow> for Calendar {
	type Error = std::num::TryFromIntError;

	fn try_from(row: CalendarRow) -> Result<Self, Self::Error> {
		Ok(Self {
			id: CalendarId(row.id),
			owner_id: OwnerId(row.owner_id),
			name: row.name,
			questionnaire: Questionnaire {
				birth_date: row.birth_date,
				gender: Gender::from_label(&row.gender),
				sleep_quality: u8::try_from(row.sleep_quality)?,
				physical_activity: u8::try_from(row.physical_activity)?,
				nutrition: u8::try_from(row.nutrition)?,
				stress_level: u8::try_from(row.stress_level)?,
				smoking: u8::try_from(row.smoking)?,
				alcohol: u8::try_from(row.alcohol)?,
			},
			figures: CalendarFigures {
				expected_lifespan: row.expected_lifespan,
				current_age: u32::try_from(row.current_age)?,
				remaining_years: row.remaining_years,
				lived_weeks: u32::try_from(row.lived_weeks)?,
				remaining_weeks: u32::try_from(row.remaining_weeks)?,
				total_weeks: u32::try_from(row.total_weeks)?,
			},
			created_at: row.created_at,
			updated_at: row.updated_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WeekRow {
	pub week_index: i64,
	pub color: Option<String>,
	pub events: String,
}

impl TryFrom<WeekRow> for WeekAnnotation {
	type Error = crate::StoreError;

	fn try_from(row: WeekRow) -> Result<Self, Self::Error> {
		Ok(Self {
			week_index: u32::try_from(row.week_index)?,
			color: row.color,
			events: serde_json::from_str(&row.events)?,
		})
	}
}
