//! Console runner for the cyclone monitoring service.
//!
//! Default invocation runs one evaluation cycle: fetch (or default) the
//! current reading, classify, print the 48-hour projection, and append a
//! prediction event to the sink. `sos <phone>` additionally dispatches an
//! emergency alert through the configured provider pool.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;

use cycmon_service::alert::{self, twilio::TwilioClient};
use cycmon_service::config::{AppConfig, DEFAULT_CONFIG_PATH};
use cycmon_service::forecast;
use cycmon_service::ingest::weather;
use cycmon_service::logging::{self, DataSource, LogLevel};
use cycmon_service::model::{AlertRequest, Reading};
use cycmon_service::risk::RiskClassifier;
use cycmon_service::sink::RecordSink;

fn main() -> ExitCode {
    logging::init_logger(LogLevel::Info, None, false);

    let config = match AppConfig::load(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reading = current_reading(&config);
    let classifier = RiskClassifier::from_artifact_path(config.model_path.as_deref());
    let risk = classifier.classify(&reading);

    println!("🌪️  Vizag Command Center");
    println!("   Pressure:   {} hPa", reading.pressure_hpa);
    println!("   Risk Level: {} ({})", risk, risk.display_band());

    record_prediction(&config, &reading, risk);

    // 48-hour synthetic projection from the current pressure.
    println!("\n   48-hour projection:");
    for point in forecast::simulate(reading.pressure_hpa) {
        println!("     T+{:>2}h  {}", point.offset_hours, point.risk);
    }

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("sos") => {
            let Some(phone) = args.get(2) else {
                eprintln!("Usage: cycmon_service sos <phone>");
                return ExitCode::FAILURE;
            };
            run_sos(&config, &reading, risk, phone)
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

/// Fetch the live reading, substituting the configured default when the
/// weather source is unavailable.
fn current_reading(config: &AppConfig) -> Reading {
    let Some(api_key) = config.owm_api_key.as_deref() else {
        logging::info(
            DataSource::Weather,
            None,
            "no OWM_API_KEY configured, using default reading",
        );
        return config.default_reading();
    };

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            logging::log_weather_failure(&config.target_city, &e);
            return config.default_reading();
        }
    };

    match weather::fetch_current(&client, &config.target_city, api_key) {
        Ok(reading) => reading,
        Err(e) => {
            logging::log_weather_failure(&config.target_city, e.as_ref());
            config.default_reading()
        }
    }
}

fn record_prediction(config: &AppConfig, reading: &Reading, risk: cycmon_service::model::RiskLevel) {
    let Some(database_url) = config.database_url.as_deref() else {
        return;
    };
    let result = RecordSink::connect(database_url).and_then(|mut sink| {
        sink.init_schema()?;
        sink.record_prediction(reading.pressure_hpa, risk, &config.target_city, Utc::now())
    });
    if let Err(e) = result {
        logging::log_sink_failure("record_prediction", &e);
    }
}

fn run_sos(
    config: &AppConfig,
    reading: &Reading,
    risk: cycmon_service::model::RiskLevel,
    phone: &str,
) -> ExitCode {
    let request = AlertRequest {
        destination: phone.to_string(),
        location_label: config.target_city.clone(),
        risk,
    };

    let client = match TwilioClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build provider client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match alert::dispatch(&client, &request, &config.providers) {
        Ok(outcome) => {
            // Diagnostics first, verdict last and plain.
            for failure in &outcome.failures {
                println!("   {} failed: {}", failure.provider_label, failure.message);
            }
            if outcome.succeeded {
                println!(
                    "✅ SOS delivered via '{}'",
                    outcome.provider_label.as_deref().unwrap_or("?")
                );
                record_alert(config, reading, phone);
                ExitCode::SUCCESS
            } else {
                println!("❌ SOS failed: all providers exhausted");
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("SOS not attempted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn record_alert(config: &AppConfig, reading: &Reading, phone: &str) {
    let Some(database_url) = config.database_url.as_deref() else {
        return;
    };
    let result = RecordSink::connect(database_url).and_then(|mut sink| {
        sink.init_schema()?;
        sink.record_alert(phone, reading.latitude, reading.longitude, Utc::now())
    });
    if let Err(e) = result {
        logging::log_sink_failure("record_alert", &e);
    }
}
