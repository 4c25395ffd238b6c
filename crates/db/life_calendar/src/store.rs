pub mod calendar_repository;
pub mod model;
pub(crate) mod queries;
pub(crate) mod schema;
pub(crate) mod transaction;
pub mod week_store;
