//! Weather lookup handler

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use domain::value_objects::CityName;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Get current weather for a city
///
/// GET /v1/weather?city=<name>
///
/// The `city` query key matches case-insensitively (`city`, `City`, `CITY`);
/// a missing or empty value is rejected here, before any cache or upstream
/// interaction. An unknown city is 404, never an error status.
#[instrument(skip(state, params))]
pub async fn current_weather(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = city_param(&params).ok_or_else(|| {
        ApiError::BadRequest("Missing required query parameter 'city'".to_string())
    })?;
    let city = CityName::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(city = %city, "Weather lookup requested");

    let snapshot = state.lookup_service.lookup(&city).await?;

    snapshot.map_or_else(
        || Err(ApiError::NotFound(format!("No weather data for city: {city}"))),
        |snapshot| Ok((StatusCode::OK, Json(snapshot))),
    )
}

/// Find the city parameter, matching the key case-insensitively
fn city_param(params: &HashMap<String, String>) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("city"))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn city_param_exact_key() {
        let map = params(&[("city", "London")]);
        assert_eq!(city_param(&map), Some("London"));
    }

    #[test]
    fn city_param_is_case_insensitive() {
        assert_eq!(city_param(&params(&[("City", "London")])), Some("London"));
        assert_eq!(city_param(&params(&[("CITY", "London")])), Some("London"));
    }

    #[test]
    fn city_param_absent() {
        let map = params(&[("town", "London")]);
        assert_eq!(city_param(&map), None);
    }
}
