pub mod database;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use database::{DatabaseConfig, LifeCalendarDb};
pub use error::{Result, StoreError};
pub use store::calendar_repository::CalendarRepository;
pub use store::model::*;
pub use store::week_store::WeekStore;
