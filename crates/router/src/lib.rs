//! # Contract Router
//!
//! Routes raw chaincode invocations (a namespaced function name plus string
//! arguments) to typed contract functions.
//!
//! This crate provides:
//! - [`ContractBuilder`] - describe a contract: functions, hooks, context type
//! - [`Router`] - resolve, convert, run the hook lifecycle, frame the result
//! - [`ChaincodeMetadata`] - the callable surface, also served by
//!   `org.hyperledger.fabric:GetMetadata`
//! - [`RouterConfig`] - `contract.toml` settings
//!
//! ## Quick Start
//!
//! ```text
//! use contractapi_router::{ContractBuilder, Router, BasicContext, HandlerError};
//!
//! struct SimpleAsset;
//!
//! impl SimpleAsset {
//!     fn read(&self, ctx: &mut BasicContext, key: String) -> Result<String, HandlerError> { .. }
//! }
//!
//! let router = Router::builder()
//!     .register(ContractBuilder::new(SimpleAsset).function("Read", SimpleAsset::read))
//!     .build()?;
//!
//! let response = router.invoke(stub);   // stub carries "SimpleAsset:Read" ["KEY_1"]
//! ```
//!
//! ## Calling Convention
//!
//! | Element | Rule |
//! |---------|------|
//! | Context | optional, first parameter, `&mut C` |
//! | Parameters | up to eight [`Param`] types: scalars, `Vec<T>`, `[T; N]` |
//! | Returns | `()`, `P`, `Result<(), E>` or `Result<P, E>` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod contract;
pub mod convert;
pub mod handler;
pub mod metadata;
pub mod param;
pub mod registry;
mod router;
pub mod signature;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, MetadataConfig, RouterConfig, CONFIG_FILE_NAME};
pub use contract::{Contract, ContractBuilder, FunctionDescriptor};
pub use handler::{
    AfterHandler, CallResult, ContextHandler, Contextual, HookHandler, Plain, PlainHandler,
    ValueOnly, WithValue,
};
pub use metadata::{
    ChaincodeMetadata, ContractMetadata, InfoMetadata, ParameterMetadata, TransactionMetadata,
    SYSTEM_CONTRACT_NAME,
};
pub use param::{IntoOutcome, Param};
pub use registry::{ContractRegistry, Resolution, Target};
pub use router::{Router, RouterBuilder};
pub use signature::CallShape;

pub use contractapi_core::{
    BasicContext, ChaincodeStub, ConversionError, HandlerError, InvocationError,
    RegistrationError, Response, ScalarType, Signature, SignatureViolation, StubError,
    StubResult, TransactionContext, TypeSpec, Value, WrongType, NAMESPACE_SEPARATOR,
};
