//! Sample contracts
//!
//! Small asset-management contracts showing the registration API:
//!
//! - [`simple`] - one unnamed contract on the default context
//! - [`extended`] - custom context, before-hook and unknown-function hook
//! - [`multi`] - two named contracts sharing one chaincode
//! - [`counter`] - integer-valued assets
//! - [`basic`] - JSON records loaded by a before-hook
//!
//! Every module exposes a `router()` that builds a ready-to-serve
//! [`Router`](contractapi_router::Router).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod basic;
pub mod context;
pub mod counter;
pub mod error;
pub mod extended;
pub mod multi;
pub mod simple;

pub use context::AssetContext;
pub use error::AssetError;

/// Value stored by `Create` in the simple contracts.
pub const INITIALISED: &str = "Initialised";
