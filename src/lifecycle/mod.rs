//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Load catalog → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then catalog, then listener
//! - Shutdown is a broadcast so tests can stop a running server

pub mod shutdown;

pub use shutdown::Shutdown;
