//! mockview-core: Session engine, question bank, and answer scoring.
//!
//! This crate defines the data model, the capability traits the engine is
//! assembled from, and the session lifecycle that the rest of mockview
//! builds on.

pub mod aggregate;
pub mod bank;
pub mod engine;
pub mod error;
pub mod ids;
pub mod model;
pub mod payment;
pub mod report;
pub mod scoring;
pub mod traits;
