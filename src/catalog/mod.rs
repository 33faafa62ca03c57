//! Firmware catalog subsystem.
//!
//! # Data Flow
//! ```text
//! catalog file (JSON)
//!     → loader.rs (parse & deserialize)
//!     → Catalog (immutable snapshot)
//!     → shared via ArcSwap with the HTTP handlers
//!
//! On file change (when watching is enabled):
//!     watcher.rs detects change
//!     → loader.rs loads new catalog
//!     → atomic swap of Arc<Catalog>
//!     → handlers observe new snapshot
//! ```
//!
//! # Design Decisions
//! - A catalog snapshot is immutable; updates replace the whole snapshot
//! - Lookup is a linear scan in stored order; first match wins on
//!   duplicate ids
//! - Request and record ids are normalized to i64 before comparison,
//!   so the string "2" and the number 2 refer to the same firmware

pub mod loader;
pub mod record;
pub mod store;
pub mod watcher;

pub use record::{DeviceFamily, Firmware, FirmwareId, Project};
pub use store::Catalog;
