//! Transaction context
//!
//! A context is created fresh for every invocation from the host's stub,
//! passed by `&mut` to the before-hook, the main handler, the after-hook or
//! the unknown-function hook, and dropped when the call completes.
//!
//! Contracts that need to share data between hooks define their own context
//! by composing [`BasicContext`]:
//!
//! ```
//! use std::sync::Arc;
//! use contractapi_core::{BasicContext, ChaincodeStub, TransactionContext};
//!
//! struct AssetContext {
//!     base: BasicContext,
//!     data: Option<Vec<u8>>,
//! }
//!
//! impl TransactionContext for AssetContext {
//!     fn from_stub(stub: Arc<dyn ChaincodeStub>) -> Self {
//!         Self { base: BasicContext::from_stub(stub), data: None }
//!     }
//!
//!     fn stub(&self) -> &dyn ChaincodeStub {
//!         self.base.stub()
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::stub::ChaincodeStub;

/// Capability interface every transaction context satisfies.
pub trait TransactionContext: Any + Send {
    /// Build a fresh context for one invocation.
    fn from_stub(stub: Arc<dyn ChaincodeStub>) -> Self
    where
        Self: Sized;

    /// Access to host storage and the raw invocation.
    fn stub(&self) -> &dyn ChaincodeStub;
}

/// The default transaction context: storage access and nothing else.
#[derive(Clone)]
pub struct BasicContext {
    stub: Arc<dyn ChaincodeStub>,
}

impl TransactionContext for BasicContext {
    fn from_stub(stub: Arc<dyn ChaincodeStub>) -> Self {
        Self { stub }
    }

    fn stub(&self) -> &dyn ChaincodeStub {
        self.stub.as_ref()
    }
}

impl fmt::Debug for BasicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (function, args) = self.stub.function_and_parameters();
        f.debug_struct("BasicContext")
            .field("function", &function)
            .field("arg_count", &args.len())
            .finish()
    }
}
