//! Firmware Catalog Service Library

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use catalog::Catalog;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
