use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Demographic group used for the base expectancy lookup.
///
/// Any label other than `male` / `female` maps to [`Gender::Other`], which
/// gets the population mean instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
	Male,
	Female,
	Other,
}

impl Gender {
	pub fn from_label(label: &str) -> Self {
		match label.trim().to_ascii_lowercase().as_str() {
			"male" => Self::Male,
			"female" => Self::Female,
			_ => Self::Other,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Male => "male",
			Self::Female => "female",
			Self::Other => "other",
		}
	}
}

impl From<String> for Gender {
	fn from(label: String) -> Self {
		Self::from_label(&label)
	}
}

impl From<Gender> for String {
	fn from(gender: Gender) -> Self {
		gender.as_str().to_string()
	}
}

/// One lifestyle dimension of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
	PhysicalActivity,
	SleepQuality,
	Nutrition,
	StressLevel,
	Smoking,
	Alcohol,
}

impl Factor {
	/// Display order of the factor breakdown.
	pub const ALL: [Self; 6] = [Self::PhysicalActivity, Self::SleepQuality, Self::Nutrition, Self::StressLevel, Self::Smoking, Self::Alcohol];

	pub const fn display_name(self) -> &'static str {
		match self {
			Self::PhysicalActivity => "Physical activity",
			Self::SleepQuality => "Sleep quality",
			Self::Nutrition => "Nutrition",
			Self::StressLevel => "Stress level",
			Self::Smoking => "Smoking",
			Self::Alcohol => "Alcohol",
		}
	}

	/// Highest rating on this factor's ordinal scale; the lowest is always 1.
	pub const fn max_rating(self) -> u8 {
		match self {
			Self::Smoking | Self::Alcohol => 3,
			_ => 5,
		}
	}

	pub const fn rating(self, questionnaire: &Questionnaire) -> u8 {
		match self {
			Self::PhysicalActivity => questionnaire.physical_activity,
			Self::SleepQuality => questionnaire.sleep_quality,
			Self::Nutrition => questionnaire.nutrition,
			Self::StressLevel => questionnaire.stress_level,
			Self::Smoking => questionnaire.smoking,
			Self::Alcohol => questionnaire.alcohol,
		}
	}
}

/// Demographic and lifestyle answers. Range checks are the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
	pub birth_date: NaiveDate,
	pub gender: Gender,
	pub sleep_quality: u8,
	pub physical_activity: u8,
	pub nutrition: u8,
	pub stress_level: u8,
	pub smoking: u8,
	pub alcohol: u8,
}

/// Whole years between `birth` and `today`, one less while this year's
/// birthday is still ahead. A birth date after `today` counts as age 0.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
	let mut years = today.year() - birth.year();
	if (today.month(), today.day()) < (birth.month(), birth.day()) {
		years -= 1;
	}
	u32::try_from(years).unwrap_or(0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn test_gender_labels_fall_back_to_other() {
		assert_eq!(Gender::from_label("female"), Gender::Female);
		assert_eq!(Gender::from_label(" Male "), Gender::Male);
		assert_eq!(Gender::from_label("unknown"), Gender::Other);
		assert_eq!(Gender::from_label(""), Gender::Other);
	}

	#[test]
	fn test_gender_deserializes_any_string() {
		let gender: Gender = serde_json::from_str("\"nonbinary\"").unwrap();
		assert_eq!(gender, Gender::Other);
		assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
	}

	#[test]
	fn test_age_before_and_after_birthday() {
		let birth = date(1990, 6, 15);
		assert_eq!(age_on(birth, date(2024, 6, 14)), 33);
		assert_eq!(age_on(birth, date(2024, 6, 15)), 34);
		assert_eq!(age_on(birth, date(2024, 12, 31)), 34);
		assert_eq!(age_on(birth, date(2024, 1, 1)), 33);
	}

	#[test]
	fn test_age_of_leap_day_birth() {
		let birth = date(2000, 2, 29);
		assert_eq!(age_on(birth, date(2023, 2, 28)), 22);
		assert_eq!(age_on(birth, date(2023, 3, 1)), 23);
	}

	#[test]
	fn test_future_birth_date_is_age_zero() {
		assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
	}

	#[test]
	fn test_questionnaire_uses_camel_case() {
		let json = r#"{
			"birthDate": "1990-01-01",
			"gender": "female",
			"sleepQuality": 4,
			"physicalActivity": 3,
			"nutrition": 3,
			"stressLevel": 4,
			"smoking": 1,
			"alcohol": 1
		}"#;
		let q: Questionnaire = serde_json::from_str(json).unwrap();
		assert_eq!(q.birth_date, date(1990, 1, 1));
		assert_eq!(Factor::StressLevel.rating(&q), 4);
		assert_eq!(Factor::Smoking.max_rating(), 3);
	}
}
