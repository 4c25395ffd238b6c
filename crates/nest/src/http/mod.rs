mod error;

mod serve;

pub use error::Error;
pub use serve::{serve, with_layers};

pub type Result<T, E = Error> = std::result::Result<T, E>;
