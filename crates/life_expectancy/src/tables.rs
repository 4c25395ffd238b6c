//! Base expectancy and lifestyle modifier tables.
//!
//! Each modifier table is indexed by `rating - 1`. Ratings outside a table
//! contribute nothing.

use crate::questionnaire::{Factor, Gender};

pub const BASE_EXPECTANCY_FEMALE: f64 = 81.0;
pub const BASE_EXPECTANCY_MALE: f64 = 74.0;
/// Mean of the two tabulated groups.
pub const BASE_EXPECTANCY_FALLBACK: f64 = 77.0;

static PHYSICAL_ACTIVITY: [f64; 5] = [-4.0, -2.0, 0.0, 2.0, 3.5];
static SLEEP_QUALITY: [f64; 5] = [-3.5, -2.0, -0.5, 0.0, 0.0];
static NUTRITION: [f64; 5] = [-5.0, -2.5, 0.0, 1.5, 3.0];
static STRESS_LEVEL: [f64; 5] = [-2.5, -1.5, -0.5, 0.0, 0.5];
static SMOKING: [f64; 3] = [0.0, -4.0, -10.0];
static ALCOHOL: [f64; 3] = [0.0, -0.5, -6.0];

pub const fn base_expectancy(gender: Gender) -> f64 {
	match gender {
		Gender::Female => BASE_EXPECTANCY_FEMALE,
		Gender::Male => BASE_EXPECTANCY_MALE,
		Gender::Other => BASE_EXPECTANCY_FALLBACK,
	}
}

fn table(factor: Factor) -> &'static [f64] {
	match factor {
		Factor::PhysicalActivity => &PHYSICAL_ACTIVITY,
		Factor::SleepQuality => &SLEEP_QUALITY,
		Factor::Nutrition => &NUTRITION,
		Factor::StressLevel => &STRESS_LEVEL,
		Factor::Smoking => &SMOKING,
		Factor::Alcohol => &ALCOHOL,
	}
}

/// Signed year delta for one factor rating.
pub fn modifier(factor: Factor, rating: u8) -> f64 {
	usize::from(rating).checked_sub(1).and_then(|i| table(factor).get(i)).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_every_tabulated_rating() {
		let expected: [(Factor, &[f64]); 6] = [
			(Factor::PhysicalActivity, &[-4.0, -2.0, 0.0, 2.0, 3.5]),
			(Factor::SleepQuality, &[-3.5, -2.0, -0.5, 0.0, 0.0]),
			(Factor::Nutrition, &[-5.0, -2.5, 0.0, 1.5, 3.0]),
			(Factor::StressLevel, &[-2.5, -1.5, -0.5, 0.0, 0.5]),
			(Factor::Smoking, &[0.0, -4.0, -10.0]),
			(Factor::Alcohol, &[0.0, -0.5, -6.0]),
		];

		for (factor, values) in expected {
			assert_eq!(values.len(), usize::from(factor.max_rating()));
			for (i, value) in values.iter().enumerate() {
				let rating = u8::try_from(i + 1).unwrap();
				assert_eq!(modifier(factor, rating), *value, "{factor:?} rating {rating}");
			}
		}
	}

	#[test]
	fn test_out_of_table_ratings_are_neutral() {
		for factor in Factor::ALL {
			assert_eq!(modifier(factor, 0), 0.0);
			assert_eq!(modifier(factor, factor.max_rating() + 1), 0.0);
			assert_eq!(modifier(factor, u8::MAX), 0.0);
		}
	}

	#[test]
	fn test_base_expectancy_lookup() {
		assert_eq!(base_expectancy(Gender::Female), 81.0);
		assert_eq!(base_expectancy(Gender::Male), 74.0);
		assert_eq!(base_expectancy(Gender::Other), 77.0);
	}
}
