//! Wire models for the OpenWeatherMap APIs
//!
//! The current-weather payload is parsed defensively: the `weather`, `main`,
//! and `wind` blocks are each optional, and a missing block leaves the
//! corresponding observation fields at their zero/empty defaults instead of
//! failing the request.

use serde::Deserialize;

/// One match from the direct geocoding endpoint (`geo/1.0/direct`)
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeEntry {
    /// Canonical place name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// ISO country code
    #[serde(default)]
    pub country: Option<String>,
    /// Administrative region, where the upstream knows it
    #[serde(default)]
    pub state: Option<String>,
}

/// Raw current-weather payload (`data/2.5/weather`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Condition entries, most significant first
    #[serde(default)]
    pub weather: Option<Vec<ConditionEntry>>,
    /// Temperature, pressure, and humidity readings
    #[serde(default)]
    pub main: Option<MainReadings>,
    /// Wind readings
    #[serde(default)]
    pub wind: Option<WindReadings>,
    /// Canonical station/city name
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    /// Condition group, e.g. "Clouds"
    #[serde(default)]
    pub main: String,
    /// Longer condition text
    #[serde(default)]
    pub description: Option<String>,
}

/// The `main` block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested unit system
    #[serde(default)]
    pub temp: f64,
    /// Atmospheric pressure in hPa
    #[serde(default)]
    pub pressure: f64,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: f64,
}

/// The `wind` block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindReadings {
    /// Wind speed in the requested unit system
    #[serde(default)]
    pub speed: f64,
    /// Wind direction in meteorological degrees
    #[serde(default)]
    pub deg: f64,
}

/// Flattened observation with defaults applied
///
/// This is what the client hands to callers: no options left, absent blocks
/// already collapsed to zero values / the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentObservation {
    /// Temperature in the requested unit system
    pub temperature: f64,
    /// Condition group from the first `weather` entry, or empty
    pub condition: String,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in the requested unit system
    pub wind_speed: f64,
    /// Wind direction in meteorological degrees
    pub wind_direction_deg: f64,
}

impl CurrentObservation {
    /// Collapse a raw payload into an observation
    ///
    /// Only the first entry of the `weather` array supplies the condition
    /// group, mirroring the geocoder's first-match policy.
    #[must_use]
    pub fn from_response(response: &CurrentWeatherResponse) -> Self {
        let condition = response
            .weather
            .as_deref()
            .and_then(<[ConditionEntry]>::first)
            .map(|entry| entry.main.clone())
            .unwrap_or_default();

        let (temperature, pressure, humidity) = response
            .main
            .as_ref()
            .map_or((0.0, 0.0, 0.0), |main| {
                (main.temp, main.pressure, main.humidity)
            });

        let (wind_speed, wind_direction_deg) = response
            .wind
            .as_ref()
            .map_or((0.0, 0.0), |wind| (wind.speed, wind.deg));

        Self {
            temperature,
            condition,
            pressure,
            humidity,
            wind_speed,
            wind_direction_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "coord": {"lon": -0.12, "lat": 51.5},
        "weather": [
            {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"},
            {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
        ],
        "main": {"temp": 15.2, "feels_like": 14.6, "pressure": 1012, "humidity": 70},
        "wind": {"speed": 4.1, "deg": 200},
        "name": "London"
    }"#;

    #[test]
    fn full_payload_flattens_completely() {
        let response: CurrentWeatherResponse =
            serde_json::from_str(FULL_RESPONSE).expect("valid payload");
        let observation = CurrentObservation::from_response(&response);

        assert!((observation.temperature - 15.2).abs() < 0.001);
        assert_eq!(observation.condition, "Clouds");
        assert!((observation.pressure - 1012.0).abs() < 0.001);
        assert!((observation.humidity - 70.0).abs() < 0.001);
        assert!((observation.wind_speed - 4.1).abs() < 0.001);
        assert!((observation.wind_direction_deg - 200.0).abs() < 0.001);
    }

    #[test]
    fn only_the_first_condition_entry_is_used() {
        let response: CurrentWeatherResponse =
            serde_json::from_str(FULL_RESPONSE).expect("valid payload");
        let observation = CurrentObservation::from_response(&response);
        assert_eq!(observation.condition, "Clouds");
    }

    #[test]
    fn missing_weather_block_defaults_to_empty_condition() {
        let response: CurrentWeatherResponse = serde_json::from_str(
            r#"{"main": {"temp": 10.0, "pressure": 1000, "humidity": 50}, "wind": {"speed": 2.0, "deg": 90}}"#,
        )
        .expect("valid payload");
        let observation = CurrentObservation::from_response(&response);

        assert_eq!(observation.condition, "");
        assert!((observation.temperature - 10.0).abs() < 0.001);
    }

    #[test]
    fn empty_weather_array_defaults_to_empty_condition() {
        let response: CurrentWeatherResponse =
            serde_json::from_str(r#"{"weather": []}"#).expect("valid payload");
        let observation = CurrentObservation::from_response(&response);
        assert_eq!(observation.condition, "");
    }

    #[test]
    fn missing_main_block_defaults_to_zero_readings() {
        let response: CurrentWeatherResponse = serde_json::from_str(
            r#"{"weather": [{"main": "Clear"}], "wind": {"speed": 2.0, "deg": 90}}"#,
        )
        .expect("valid payload");
        let observation = CurrentObservation::from_response(&response);

        assert_eq!(observation.condition, "Clear");
        assert!(observation.temperature.abs() < f64::EPSILON);
        assert!(observation.pressure.abs() < f64::EPSILON);
        assert!(observation.humidity.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_wind_block_defaults_to_zero_wind() {
        let response: CurrentWeatherResponse = serde_json::from_str(
            r#"{"weather": [{"main": "Clear"}], "main": {"temp": 21.0, "pressure": 1020, "humidity": 40}}"#,
        )
        .expect("valid payload");
        let observation = CurrentObservation::from_response(&response);

        assert!(observation.wind_speed.abs() < f64::EPSILON);
        assert!(observation.wind_direction_deg.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_object_yields_all_defaults() {
        let response: CurrentWeatherResponse =
            serde_json::from_str("{}").expect("valid payload");
        let observation = CurrentObservation::from_response(&response);

        assert_eq!(
            observation,
            CurrentObservation {
                temperature: 0.0,
                condition: String::new(),
                pressure: 0.0,
                humidity: 0.0,
                wind_speed: 0.0,
                wind_direction_deg: 0.0,
            }
        );
    }

    #[test]
    fn geocode_entries_parse() {
        let entries: Vec<GeocodeEntry> = serde_json::from_str(
            r#"[
                {"name": "London", "lat": 51.5072, "lon": -0.1276, "country": "GB"},
                {"name": "London", "lat": 42.9836, "lon": -81.2497, "country": "CA", "state": "Ontario"}
            ]"#,
        )
        .expect("valid payload");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "London");
        assert!((entries[0].lat - 51.5072).abs() < 0.001);
        assert_eq!(entries[0].country.as_deref(), Some("GB"));
        assert!(entries[0].state.is_none());
        assert_eq!(entries[1].state.as_deref(), Some("Ontario"));
    }

    #[test]
    fn geocode_empty_array_parses() {
        let entries: Vec<GeocodeEntry> = serde_json::from_str("[]").expect("valid payload");
        assert!(entries.is_empty());
    }

    #[test]
    fn condition_entry_without_main_defaults_to_empty() {
        let response: CurrentWeatherResponse =
            serde_json::from_str(r#"{"weather": [{"description": "hazy"}]}"#)
                .expect("valid payload");
        let observation = CurrentObservation::from_response(&response);
        assert_eq!(observation.condition, "");
    }
}
