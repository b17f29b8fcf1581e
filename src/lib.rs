pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod tariff;
pub mod utils;

pub use error::{Error, RateError, Result};
pub use tariff::{calculate_rate, RateCalculator, RateTable};
