use crate::questionnaire::{age_on, Factor, Questionnaire};
use crate::tables;
use crate::weeks::WEEKS_PER_YEAR;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Impact of one lifestyle factor, kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorImpact {
	pub factor: Factor,
	pub name: String,
	pub raw_value: u8,
	pub impact: f64,
	pub is_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
	pub base_expectancy: f64,
	pub modifiers: BTreeMap<Factor, f64>,
	pub total_modifier: f64,
	pub expected_lifespan: f64,
	pub current_age: u32,
	pub remaining_years: f64,
	pub lived_weeks: u32,
	pub remaining_weeks: u32,
	pub total_weeks: u32,
	pub expected_death_year: i32,
	pub factors: Vec<FactorImpact>,
}

/// Estimate as of today's local date.
pub fn estimate(questionnaire: &Questionnaire) -> EstimationResult {
	estimate_on(questionnaire, chrono::Local::now().date_naive())
}

/// Estimate with an explicit reference date for the age computation.
pub fn estimate_on(questionnaire: &Questionnaire, today: NaiveDate) -> EstimationResult {
	let base_expectancy = tables::base_expectancy(questionnaire.gender);

	let modifiers: BTreeMap<Factor, f64> = Factor::ALL
		.iter()
		.map(|&factor| (factor, tables::modifier(factor, factor.rating(questionnaire))))
		.collect();
	let total_modifier: f64 = Factor::ALL.iter().map(|factor| modifiers[factor]).sum();

	let expected_lifespan = round_tenths(base_expectancy + total_modifier);
	let current_age = age_on(questionnaire.birth_date, today);
	let remaining_years = remaining_years(expected_lifespan, current_age);

	let factors = Factor::ALL
		.iter()
		.map(|&factor| {
			let impact = modifiers[&factor];
			FactorImpact {
				factor,
				name: factor.display_name().to_string(),
				raw_value: factor.rating(questionnaire),
				impact,
				is_positive: impact >= 0.0,
			}
		})
		.collect();

	EstimationResult {
		base_expectancy,
		modifiers,
		total_modifier,
		expected_lifespan,
		current_age,
		remaining_years,
		lived_weeks: current_age * WEEKS_PER_YEAR,
		remaining_weeks: years_to_weeks(remaining_years),
		total_weeks: years_to_weeks(expected_lifespan),
		expected_death_year: questionnaire.birth_date.year() + whole_years(expected_lifespan),
		factors,
	}
}

impl EstimationResult {
	/// Moves the estimate to `current_age + margin_years` once the person has
	/// outlived it, recomputing every field derived from the lifespan.
	#[must_use]
	pub fn extend_if_outlived(mut self, margin_years: f64) -> Self {
		if f64::from(self.current_age) <= self.expected_lifespan {
			return self;
		}

		let birth_year = self.expected_death_year - whole_years(self.expected_lifespan);
		self.expected_lifespan = round_tenths(f64::from(self.current_age) + margin_years);
		self.remaining_years = remaining_years(self.expected_lifespan, self.current_age);
		self.remaining_weeks = years_to_weeks(self.remaining_years);
		self.total_weeks = years_to_weeks(self.expected_lifespan);
		self.expected_death_year = birth_year + whole_years(self.expected_lifespan);
		self
	}

	/// Share of the grid already lived, in whole percent.
	pub fn lived_percent(&self) -> u32 {
		if self.total_weeks == 0 {
			return 0;
		}
		let percent = f64::from(self.lived_weeks) / f64::from(self.total_weeks) * 100.0;
		non_negative_round(percent)
	}

	pub fn summary(&self) -> String {
		let positive: Vec<&str> = self.factors.iter().filter(|f| f.impact > 0.0).map(|f| f.name.as_str()).collect();
		let negative: Vec<&str> = self.factors.iter().filter(|f| f.impact < 0.0).map(|f| f.name.as_str()).collect();

		let mut summary = format!(
			"Based on your answers, the estimated life expectancy is about {} years. You are {} years old, which leaves roughly {} years ahead.\n\n",
			self.expected_lifespan, self.current_age, self.remaining_years
		);
		if !positive.is_empty() {
			summary.push_str(&format!("Positive impact: {}\n", positive.join(", ")));
		}
		if !negative.is_empty() {
			summary.push_str(&format!("Room for improvement: {}", negative.join(", ")));
		}
		summary
	}
}

/// Renders a modifier as `+3.5 years`, `-1 year` or `±0 years`.
pub fn format_impact(impact: f64) -> String {
	if impact.abs() < f64::EPSILON {
		return "±0 years".to_string();
	}
	let unit = if (impact.abs() - 1.0).abs() < f64::EPSILON { "year" } else { "years" };
	format!("{impact:+} {unit}")
}

fn round_tenths(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

fn remaining_years(expected_lifespan: f64, current_age: u32) -> f64 {
	round_tenths(expected_lifespan - f64::from(current_age)).max(0.0)
}

fn years_to_weeks(years: f64) -> u32 {
	non_negative_round(years * f64::from(WEEKS_PER_YEAR))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn non_negative_round(value: f64) -> u32 {
	value.round().max(0.0) as u32
}

#[allow(clippy::cast_possible_truncation)]
fn whole_years(years: f64) -> i32 {
	years.round() as i32
}
