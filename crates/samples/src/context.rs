//! Transaction context shared by the hook-based samples.

use std::sync::Arc;

use contractapi_router::{BasicContext, ChaincodeStub, TransactionContext};
use tracing::trace;

use crate::error::AssetError;

/// Context carrying the asset named by the call's first argument.
///
/// The before-hook fills `data`; functions read it instead of going back to
/// storage.
pub struct AssetContext {
    base: BasicContext,
    data: Option<Vec<u8>>,
}

impl TransactionContext for AssetContext {
    fn from_stub(stub: Arc<dyn ChaincodeStub>) -> Self {
        Self {
            base: BasicContext::from_stub(stub),
            data: None,
        }
    }

    fn stub(&self) -> &dyn ChaincodeStub {
        self.base.stub()
    }
}

impl AssetContext {
    /// Load the asset keyed by the first argument, if there is one.
    ///
    /// A missing asset is not an error; the function decides what absence
    /// means.
    pub fn load_asset(&mut self) -> Result<(), AssetError> {
        let (_, args) = self.stub().function_and_parameters();
        let Some(key) = args.first() else {
            return Ok(());
        };
        self.data = self.stub().get_state(key).map_err(AssetError::world_state)?;
        trace!(
            target: "contractapi::samples",
            key = %key,
            found = self.data.is_some(),
            "Loaded asset"
        );
        Ok(())
    }

    /// The loaded asset, `None` when absent or empty
    pub fn existing(&self) -> Option<&[u8]> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }

    /// Build the unknown-function error for the current call
    pub fn unknown_function(&self, target: &str) -> AssetError {
        let (function, args) = self.stub().function_and_parameters();
        AssetError::unknown_function(function, &args, target)
    }
}
