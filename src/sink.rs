/// Append-only record sink for prediction and alert events
///
/// Persistence is an audit trail, not a dependency: the evaluation cycle
/// logs sink failures and carries on. No read path lives here — history
/// display is a dashboard concern that queries the tables directly.

use chrono::{DateTime, Utc};
use postgres::{Client, NoTls};

use crate::model::RiskLevel;

pub struct RecordSink {
    client: Client,
}

impl RecordSink {
    /// Connect using a standard postgres connection string
    /// (typically the `DATABASE_URL` environment variable).
    pub fn connect(database_url: &str) -> Result<Self, postgres::Error> {
        let client = Client::connect(database_url, NoTls)?;
        Ok(RecordSink { client })
    }

    /// Create the event tables if they do not exist yet.
    pub fn init_schema(&mut self) -> Result<(), postgres::Error> {
        self.client.batch_execute(
            "
            CREATE TABLE IF NOT EXISTS prediction_history (
                id          BIGSERIAL PRIMARY KEY,
                pressure    DOUBLE PRECISION NOT NULL,
                risk_level  SMALLINT NOT NULL,
                location    TEXT NOT NULL,
                recorded_at TIMESTAMPTZ NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sos_alerts (
                id          BIGSERIAL PRIMARY KEY,
                phone       TEXT NOT NULL,
                latitude    DOUBLE PRECISION NOT NULL,
                longitude   DOUBLE PRECISION NOT NULL,
                recorded_at TIMESTAMPTZ NOT NULL
            );
            ",
        )
    }

    /// Append one prediction event.
    pub fn record_prediction(
        &mut self,
        pressure_hpa: f64,
        risk: RiskLevel,
        location: &str,
        at: DateTime<Utc>,
    ) -> Result<(), postgres::Error> {
        self.client.execute(
            "INSERT INTO prediction_history (pressure, risk_level, location, recorded_at)
             VALUES ($1, $2, $3, $4)",
            &[&pressure_hpa, &(risk.ordinal() as i16), &location, &at],
        )?;
        Ok(())
    }

    /// Append one alert event.
    pub fn record_alert(
        &mut self,
        phone: &str,
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    ) -> Result<(), postgres::Error> {
        self.client.execute(
            "INSERT INTO sos_alerts (phone, latitude, longitude, recorded_at)
             VALUES ($1, $2, $3, $4)",
            &[&phone, &latitude, &longitude, &at],
        )?;
        Ok(())
    }
}
