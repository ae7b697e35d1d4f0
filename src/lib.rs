pub mod api;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod utils;

pub use error::{ApiError, ConfigError, RenderError};
pub use formatters::{get_formatter, Formatter};
