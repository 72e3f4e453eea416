//! Scenario tests for the router crate.

pub mod system;
