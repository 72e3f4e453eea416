//! Core types and traits for the contract router
//!
//! This crate defines the foundational types shared by every layer:
//! - ScalarType / TypeSpec / Signature: the declared shape of handlers
//! - Value: typed in-process values produced by argument conversion
//! - Error types: conversion, handler, invocation and registration failures
//! - ChaincodeStub: the storage collaborator handed over by the host
//! - TransactionContext / BasicContext: the per-call carrier
//! - Response: the success-xor-failure outcome returned to the host

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod response;
pub mod stub;
pub mod types;
pub mod value;

pub use context::{BasicContext, TransactionContext};
pub use error::{
    ConversionError, HandlerError, InvocationError, RegistrationError, SignatureViolation,
    StubError, WrongType,
};
pub use response::Response;
pub use stub::{ChaincodeStub, StubResult};
pub use types::{ScalarType, Signature, TypeSpec};
pub use value::Value;

/// Separator between a contract namespace and a function name in a raw call.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Result alias for per-call operations.
pub type Result<T> = std::result::Result<T, InvocationError>;
