//! Statistical life-expectancy estimate and the week arithmetic that the
//! life calendar grid is built on.
//!
//! Everything in this crate is pure: no I/O, no clocks except the optional
//! "today" used by [`estimate`].

pub mod estimate;
pub mod questionnaire;
pub mod tables;
pub mod weeks;

// Re-export commonly used types
pub use estimate::{estimate, estimate_on, format_impact, EstimationResult, FactorImpact};
pub use questionnaire::{age_on, Factor, Gender, Questionnaire};
pub use weeks::{grid_position, week_index_on, week_phase, week_span, GridPosition, WeekPhase, WeekSpan, WEEKS_PER_YEAR};
