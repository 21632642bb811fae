//! Emergency alert dispatch.
//!
//! Submodules:
//! - `message` — SMS body and voice TwiML construction.
//! - `dispatch` — sequential provider failover loop and `ProviderClient` trait.
//! - `twilio` — HTTP `ProviderClient` against the Twilio REST API.

pub mod dispatch;
pub mod message;
pub mod twilio;

pub use dispatch::{dispatch, ProviderClient};
