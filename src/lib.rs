//! Cyclone risk classification and failover alert dispatch for the Vizag
//! coastal region.
//!
//! The core pipeline: an atmospheric `Reading` (live or configured default)
//! is classified into a discrete `RiskLevel`, optionally projected forward
//! by the synthetic forecast walk, and on manual trigger dispatched as an
//! SMS + voice alert through an ordered pool of messaging providers with
//! automatic failover.

pub mod alert;
pub mod config;
pub mod forecast;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod risk;
pub mod sink;
