//! Router end-to-end test suite
//!
//! Drives the sample contracts through the public API exactly the way a host
//! does: a stub carrying `contract:function` and string arguments in, a
//! `Response` out. World state persists across calls within a test.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test router
//!
//! # Run one area
//! cargo test --test router multi::
//!
//! # With router logs
//! RUST_LOG=contractapi=trace cargo test --test router -- --nocapture
//! ```

mod common;

mod config;
mod extended;
mod metadata;
mod multi;
mod simple;
