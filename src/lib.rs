//! contractapi - typed contract routing for chaincode
//!
//! A chaincode registers one or more contracts; the host hands every
//! invocation to the [`Router`] as a namespaced function name plus string
//! arguments. The router resolves the function, converts the arguments to
//! the declared types, runs the before/main/after lifecycle and frames the
//! outcome as a [`Response`].
//!
//! # Quick Start
//!
//! ```ignore
//! use contractapi::{BasicContext, ContractBuilder, HandlerError, Router};
//!
//! struct SimpleAsset;
//!
//! impl SimpleAsset {
//!     fn read(&self, ctx: &mut BasicContext, id: String) -> Result<String, HandlerError> {
//!         // ...
//!     }
//! }
//!
//! let router = Router::builder()
//!     .register(ContractBuilder::new(SimpleAsset).function("Read", SimpleAsset::read))
//!     .build()?;
//!
//! // stub carries "SimpleAsset:Read" ["ASSET_1"]
//! let response = router.invoke(stub);
//! ```
//!
//! # Architecture
//!
//! Value types, errors, the stub and context traits live in
//! `contractapi-core`; registration, conversion and dispatch live in
//! `contractapi-router`. Everything public is re-exported here.

pub use contractapi_router::*;
