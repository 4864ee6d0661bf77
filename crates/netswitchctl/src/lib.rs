//! Netswitch Control - one-shot CLI around the decision engine
//!
//! Reads facts from environment variables or JSON fixture files, runs one
//! evaluation, prints deterministic action lines for shell harnesses, and
//! persists the new state.

pub mod inputs;
pub mod output;
