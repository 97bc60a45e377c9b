pub mod cli;
pub mod commands;
pub mod converters;
pub mod error;
pub mod loader;
pub mod models;
pub mod synthesis;
pub mod telemetry;

pub use error::{ApiCaseError, Result};
