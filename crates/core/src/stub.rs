//! Storage collaborator abstraction
//!
//! The host hands the router one stub per invocation. The stub gives
//! handlers access to the key-value world state and exposes the raw
//! invocation (function name and string arguments).
//!
//! The router never caches or batches storage operations; every call
//! goes straight to the stub.

use crate::error::StubError;

/// Result type for stub operations
pub type StubResult<T> = std::result::Result<T, StubError>;

/// Per-invocation access to host storage and the raw call.
///
/// Thread safety: implementations must be `Send + Sync` so a stub can be
/// shared through an `Arc` by the transaction context.
pub trait ChaincodeStub: Send + Sync {
    /// Get the current value of `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the world state cannot be read. A missing key is
    /// never reported as an error.
    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected or the world state cannot
    /// be reached.
    fn put_state(&self, key: &str, value: &[u8]) -> StubResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the world state cannot be reached.
    fn del_state(&self, key: &str) -> StubResult<()>;

    /// The raw function name and arguments of the current invocation.
    fn function_and_parameters(&self) -> (String, Vec<String>);
}
