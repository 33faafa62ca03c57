//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging via tracing
//! - Prometheus metrics exposition

pub mod logging;
pub mod metrics;
