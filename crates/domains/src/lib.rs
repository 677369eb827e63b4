//! # domains
//!
//! The central domain logic and port definitions for CampusConnect.
//!
//! Everything here is I/O-free: entities, the audience-rule predicate, the
//! vote state machine, the error taxonomy, and the traits (ports) adapters
//! must implement. Services and adapters depend on this crate, never the
//! other way around.

pub mod audience;
pub mod error;
pub mod models;
pub mod ports;
pub mod voting;

// Re-exporting for easier access in other crates
pub use audience::*;
pub use error::*;
pub use models::*;
pub use ports::*;
pub use voting::*;
