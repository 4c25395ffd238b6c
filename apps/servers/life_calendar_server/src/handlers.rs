pub mod calendars;
pub mod estimate;
pub mod health;
pub mod weeks;
