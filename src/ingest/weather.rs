/// OpenWeatherMap Current Conditions Client
///
/// Retrieves the live atmospheric reading for the monitored city. The
/// weather source is an external collaborator: when it is unavailable the
/// evaluation cycle substitutes the configured default reading rather than
/// failing, so every function here returns errors instead of panicking.
///
/// API Documentation: https://openweathermap.org/current

use serde::Deserialize;

use crate::model::Reading;

const OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

// ============================================================================
// OWM API Response Structures
// ============================================================================

/// Current weather response from OpenWeatherMap (fields we consume)
#[derive(Debug, Deserialize)]
pub struct OwmCurrentResponse {
    pub coord: OwmCoord,
    pub main: OwmMain,
}

#[derive(Debug, Deserialize)]
pub struct OwmCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwmMain {
    /// Sea-level pressure in hPa.
    pub pressure: f64,
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the current reading for a city by name.
///
/// # Parameters
/// - `client`: HTTP client (caller owns the timeout configuration)
/// - `city`: city name as OWM expects it, e.g. "Visakhapatnam"
/// - `api_key`: OWM API key
pub fn fetch_current(
    client: &reqwest::blocking::Client,
    city: &str,
    api_key: &str,
) -> Result<Reading, Box<dyn std::error::Error>> {
    let url = format!("{}/weather?q={}&appid={}", OWM_BASE_URL, city, api_key);

    let response = client.get(&url).send()?;

    if !response.status().is_success() {
        return Err(format!("OWM API error: {}", response.status()).into());
    }

    let api_response: OwmCurrentResponse = response.json()?;
    Ok(parse_reading(api_response))
}

/// Convert an OWM response into the domain reading
fn parse_reading(response: OwmCurrentResponse) -> Reading {
    Reading {
        latitude: response.coord.lat,
        longitude: response.coord.lon,
        pressure_hpa: response.main.pressure,
    }
}

// ============================================================================
// Tests
// ============================================================================
