//! Sequential provider failover.
//!
//! One dispatch walks the configured provider list in order. Per provider
//! the protocol is two steps: send the SMS, then place the voice call. The
//! call is only attempted after the SMS succeeds; the first provider to
//! complete both steps wins and the loop stops. Every failed attempt is
//! recorded and absorbed — per-provider errors never propagate and never
//! abort the loop.
//!
//! Attempts are strictly sequential. Running providers in parallel could
//! deliver duplicate alerts to the same contact, so the loop never will.
//! The two-step protocol accepts at-most-partial delivery: a provider may
//! have sent the SMS even though its call step failed. No attempt is made
//! at exactly-once semantics across the pair.

use crate::alert::message;
use crate::logging::{self, DataSource};
use crate::model::{
    AlertOutcome, AlertRequest, DispatchError, ProviderCredential, ProviderError, ProviderFailure,
};

/// The two provider operations a dispatch consumes.
///
/// The production implementation is `alert::twilio::TwilioClient`; tests
/// use scripted in-memory clients. Implementations must bound each request
/// with a timeout so a hung provider fails over like any other error.
pub trait ProviderClient {
    fn send_text(
        &self,
        credential: &ProviderCredential,
        to: &str,
        body: &str,
    ) -> Result<(), ProviderError>;

    fn place_call(
        &self,
        credential: &ProviderCredential,
        to: &str,
        twiml: &str,
    ) -> Result<(), ProviderError>;
}

/// Attempts to deliver `request` through `providers` in list order.
///
/// Returns `Err(DispatchError::NoProvidersConfigured)` for an empty list,
/// before any network activity. Otherwise always returns an outcome:
/// success names the winning provider, failure carries one summary entry
/// per exhausted provider. `outcome.succeeded == outcome.provider_label.is_some()`
/// holds in every path.
pub fn dispatch(
    client: &dyn ProviderClient,
    request: &AlertRequest,
    providers: &[ProviderCredential],
) -> Result<AlertOutcome, DispatchError> {
    if providers.is_empty() {
        return Err(DispatchError::NoProvidersConfigured);
    }

    let body = message::sms_body(request);
    let twiml = message::voice_twiml(request);
    let mut failures: Vec<ProviderFailure> = Vec::new();

    for credential in providers {
        let attempt = attempt_provider(client, credential, &request.destination, &body, &twiml);
        match attempt {
            Ok(()) => {
                logging::log_dispatch_summary(
                    providers.len(),
                    Some(credential.label.as_str()),
                    failures.len(),
                );
                return Ok(AlertOutcome {
                    succeeded: true,
                    provider_label: Some(credential.label.clone()),
                    failures,
                });
            }
            Err(message) => {
                logging::log_provider_failure(&credential.label, &message);
                failures.push(ProviderFailure {
                    provider_label: credential.label.clone(),
                    message,
                });
            }
        }
    }

    logging::log_dispatch_summary(providers.len(), None, failures.len());
    Ok(AlertOutcome {
        succeeded: false,
        provider_label: None,
        failures,
    })
}

/// Runs the two-step protocol against one provider.
///
/// A text failure skips the call step for this provider entirely. The
/// returned error string names the failed step so outcome summaries stay
/// diagnosable.
fn attempt_provider(
    client: &dyn ProviderClient,
    credential: &ProviderCredential,
    destination: &str,
    body: &str,
    twiml: &str,
) -> Result<(), String> {
    client
        .send_text(credential, destination, body)
        .map_err(|e| format!("SMS send failed: {}", e))?;
    client
        .place_call(credential, destination, twiml)
        .map_err(|e| format!("voice call failed: {}", e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
//
// Full failover scenarios (partial successes, exhaustion, call counting)
// live in tests/dispatch_failover.rs with a scripted client. The unit tests
// here cover the fatal path and the outcome invariant.
