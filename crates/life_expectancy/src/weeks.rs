//! Week-index arithmetic.
//!
//! A week index is the zero-based count of 7-day periods since the birth
//! date. The grid shows 52 weeks per row, so a row is one "year of life".

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEKS_PER_YEAR: u32 = 52;

/// Row/column of a week in the grid, both one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
	pub year: u32,
	pub week_in_year: u32,
}

pub const fn grid_position(week_index: u32) -> GridPosition {
	GridPosition {
		year: week_index / WEEKS_PER_YEAR + 1,
		week_in_year: week_index % WEEKS_PER_YEAR + 1,
	}
}

/// First and last calendar day of a week, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSpan {
	pub start: NaiveDate,
	pub end: NaiveDate,
}

impl WeekSpan {
	pub fn contains(&self, date: NaiveDate) -> bool {
		self.start <= date && date <= self.end
	}
}

/// `None` only when the span falls outside chrono's date range.
pub fn week_span(birth_date: NaiveDate, week_index: u32) -> Option<WeekSpan> {
	let start = birth_date.checked_add_days(Days::new(u64::from(week_index) * 7))?;
	let end = start.checked_add_days(Days::new(6))?;
	Some(WeekSpan { start, end })
}

/// Week index containing `date`, or `None` for dates before birth.
pub fn week_index_on(birth_date: NaiveDate, date: NaiveDate) -> Option<u32> {
	let days = date.signed_duration_since(birth_date).num_days();
	if days < 0 {
		return None;
	}
	u32::try_from(days / 7).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekPhase {
	Lived,
	Current,
	Remaining,
}

pub const fn week_phase(week_index: u32, lived_weeks: u32) -> WeekPhase {
	if week_index < lived_weeks {
		WeekPhase::Lived
	} else if week_index == lived_weeks {
		WeekPhase::Current
	} else {
		WeekPhase::Remaining
	}
}
