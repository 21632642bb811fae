//! External data source clients.
//!
//! Submodules:
//! - `weather` — OpenWeatherMap current-conditions client.

pub mod weather;
