//! Error types for the contract router
//!
//! Errors fall into two families with different lifetimes:
//!
//! | Family | Type | When | Recovery |
//! |--------|------|------|----------|
//! | Registration | [`RegistrationError`] | building the router | fatal, no router exists |
//! | Invocation | [`InvocationError`] | one call | becomes the call's failure response |
//!
//! Per-call errors carry the message that is handed back to the host
//! verbatim. The wording of the not-found and arity messages is fixed by
//! the host convention; everything else follows lower-case `thiserror`
//! style.

use thiserror::Error;

/// A value did not have the variant its declared type requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {actual}")]
pub struct WrongType {
    /// Declared type
    pub expected: String,
    /// Variant actually found
    pub actual: String,
}

/// A raw argument could not be coerced to its declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("conversion error for parameter {index}: cannot convert {value:?} to {expected}: {reason}")]
pub struct ConversionError {
    /// Zero-based parameter position, not counting the context parameter
    pub index: usize,
    /// Declared type of the parameter
    pub expected: String,
    /// The offending raw value
    pub value: String,
    /// Why the conversion failed
    pub reason: String,
}

impl ConversionError {
    /// Create a conversion error for the parameter at `index`
    pub fn new(
        index: usize,
        expected: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            index,
            expected: expected.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Domain error returned by a contract handler or hook.
///
/// Opaque to the router; its message becomes the failure payload unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create a handler error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message surfaced to the caller
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Failure reported by the storage collaborator.
///
/// Distinct from a missing key, which is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StubError {
    /// The world state could not be reached
    #[error("world state unavailable: {reason}")]
    Unavailable {
        /// Backend-specific detail
        reason: String,
    },

    /// The key was rejected by the backend
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },
}

/// A handler or hook signature that breaks the calling convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureViolation {
    /// Context parameter found somewhere other than first, or twice
    #[error("context parameter must be first and appear once, found at position {position}")]
    ContextNotFirst {
        /// Zero-based position in the full parameter list
        position: usize,
    },

    /// Parameter type outside the supported set
    #[error("unsupported parameter type {type_name} at position {position}")]
    UnsupportedParameter {
        /// Zero-based position in the full parameter list
        position: usize,
        /// Declared type
        type_name: String,
    },

    /// Parameter not permitted for this kind of hook
    #[error("unexpected parameter of type {type_name} at position {position}")]
    UnexpectedParameter {
        /// Zero-based position in the full parameter list
        position: usize,
        /// Declared type
        type_name: String,
    },

    /// More than two return values
    #[error("too many return values: {count}, at most 2 allowed")]
    TooManyReturns {
        /// Number of declared returns
        count: usize,
    },

    /// Error return declared before the value return
    #[error("error return must be the last return value")]
    ErrorNotLast,

    /// Two non-error return values
    #[error("at most one non-error return value allowed")]
    MultipleValues,

    /// Two error return values
    #[error("at most one error return value allowed")]
    MultipleErrors,

    /// Return type outside the supported set
    #[error("unsupported return type {type_name}")]
    UnsupportedReturn {
        /// Declared type
        type_name: String,
    },
}

/// Registration-time failure. Fatal: the router is not built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A function or hook signature violates the calling convention
    #[error("invalid signature for {contract}:{function}: {violation}")]
    Signature {
        /// Contract namespace
        contract: String,
        /// Function or hook name
        function: String,
        /// The broken rule
        violation: SignatureViolation,
    },

    /// Two contracts share a namespace
    #[error("contract already registered with name {name}")]
    DuplicateContract {
        /// The clashing namespace
        name: String,
    },

    /// Two functions share a name within one contract
    #[error("function {function} registered more than once in contract {contract}")]
    DuplicateFunction {
        /// Contract namespace
        contract: String,
        /// The clashing function name
        function: String,
    },

    /// Contract name cannot be addressed by a raw call
    #[error("invalid contract name {name:?}: {reason}")]
    InvalidContractName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Function name cannot be addressed by a raw call
    #[error("invalid function name {function:?} in contract {contract}: {reason}")]
    InvalidFunctionName {
        /// Contract namespace
        contract: String,
        /// The rejected name
        function: String,
        /// Why it was rejected
        reason: String,
    },

    /// Router built without any contract
    #[error("no contracts registered")]
    NoContracts,

    /// Configured default contract is not registered
    #[error("default contract {name} is not registered")]
    UnknownDefaultContract {
        /// The configured namespace
        name: String,
    },

    /// Metadata document could not be generated
    #[error("cannot generate metadata: {reason}")]
    Metadata {
        /// Serializer detail
        reason: String,
    },
}

/// Per-call failure. Terminates only the current call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// Namespace prefix does not match a registered contract
    #[error("Contract not found with name {name}")]
    ContractNotFound {
        /// The requested namespace
        name: String,
    },

    /// Contract has no such function and no unknown-function hook
    #[error("Function {function} not found in contract {contract}")]
    FunctionNotFound {
        /// The requested function
        function: String,
        /// The resolved contract namespace
        contract: String,
    },

    /// Raw argument count differs from the declared parameter count
    #[error("Incorrect number of params. Expected {expected}, received {received}")]
    ArgumentCount {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        received: usize,
    },

    /// A raw argument could not be converted
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A handler or hook returned an error
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// The success value could not be serialized
    #[error("cannot serialize response: {reason}")]
    Response {
        /// Serializer detail
        reason: String,
    },

    /// Router invariant broken (bug)
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}
