//! Integration test host for the minirun workspace
pub use minirun_core::*;
