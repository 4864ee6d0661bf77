//! Netswitch Common - Shared types and the decision engine
//!
//! The engine is pure: facts in, actions out. Everything that touches
//! the system (sysfs, nmcli, state files) lives in the binaries.

pub mod engine;
pub mod error;
pub mod store;
pub mod types;

pub use engine::evaluate;
pub use error::*;
pub use types::*;
