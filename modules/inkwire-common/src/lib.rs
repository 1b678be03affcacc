pub mod coerce;
pub mod config;
pub mod error;
pub mod html;
pub mod types;
pub mod youtube;

pub use config::Config;
pub use error::ParseError;
pub use types::*;
