//! Twilio REST client.
//!
//! HTTP implementation of `ProviderClient` against the 2010-04-01 API:
//! `Messages.json` for SMS and `Calls.json` with an inline `Twiml` document
//! for voice. Authentication is HTTP basic with the account SID and auth
//! token of whichever credential the failover loop is currently on.
//!
//! A 2xx response only confirms the provider accepted the request — it says
//! nothing about eventual delivery to the handset.

use std::time::Duration;

use crate::alert::dispatch::ProviderClient;
use crate::model::{ProviderCredential, ProviderError};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Per-request timeout. Kept short so a hung provider stalls failover by
/// seconds, not minutes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TwilioClient {
    http: reqwest::blocking::Client,
}

impl TwilioClient {
    pub fn new() -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(TwilioClient { http })
    }

    /// POSTs a form to an account-scoped endpoint and maps the response to
    /// the dispatch error taxonomy. Timeouts and connection failures become
    /// `Transport`; non-2xx statuses (including 401/403 auth rejections)
    /// become `HttpStatus`.
    fn post_form(
        &self,
        credential: &ProviderCredential,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<(), ProviderError> {
        let url = format!(
            "{}/Accounts/{}/{}.json",
            TWILIO_API_BASE, credential.account_sid, endpoint
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&credential.account_sid, Some(&credential.auth_token))
            .form(form)
            .send()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::HttpStatus(response.status().as_u16()))
        }
    }
}

impl ProviderClient for TwilioClient {
    fn send_text(
        &self,
        credential: &ProviderCredential,
        to: &str,
        body: &str,
    ) -> Result<(), ProviderError> {
        self.post_form(
            credential,
            "Messages",
            &[
                ("To", to),
                ("From", credential.sender_number.as_str()),
                ("Body", body),
            ],
        )
    }

    fn place_call(
        &self,
        credential: &ProviderCredential,
        to: &str,
        twiml: &str,
    ) -> Result<(), ProviderError> {
        self.post_form(
            credential,
            "Calls",
            &[
                ("To", to),
                ("From", credential.sender_number.as_str()),
                ("Twiml", twiml),
            ],
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
