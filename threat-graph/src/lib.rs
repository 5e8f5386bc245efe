//! Gaffer loader for network-telemetry events. Takes events from a byte
//! source, derives graph elements per event, aggregates them over short
//! windows, and bulk-loads the aggregated deltas into Gaffer.

pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod queue;
pub mod sender;
pub mod service;
pub mod source;
pub mod summariser;
pub mod telemetry;
