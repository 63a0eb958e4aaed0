//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap direct geocoding API
//! (<https://openweathermap.org/api/geocoding-api>) and current weather API
//! (<https://openweathermap.org/current>). Both endpoints authenticate with
//! an `appid` query parameter.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError, UnitSystem};
pub use models::{CurrentObservation, CurrentWeatherResponse, GeocodeEntry};
