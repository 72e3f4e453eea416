//! Tutorial contract managing [`BasicAsset`] records.
//!
//! Uses its own context, [`CallDataContext`]: a before-hook reads the record
//! keyed by the first argument into `call_data`, and an unknown-function
//! hook logs the bad call before rejecting it.

use std::sync::Arc;

use contractapi_router::{
    BasicContext, ChaincodeStub, ContractBuilder, RegistrationError, Router, StubError,
    TransactionContext,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Condition of a newly created asset
pub const CONDITION_NEW: u8 = 0;
/// Condition of an asset that has changed hands
pub const CONDITION_USED: u8 = 1;

/// A stored asset record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAsset {
    /// Key the record is stored under
    pub id: String,
    /// Current owner
    pub owner: String,
    /// Value
    pub value: i64,
    /// [`CONDITION_NEW`] or [`CONDITION_USED`]
    pub condition: u8,
}

/// Failure of a tutorial transaction
#[derive(Debug, Error)]
pub enum TutorialError {
    /// Call carried no key
    #[error("Missing key for world state")]
    MissingKey,

    /// Storage could not be reached
    #[error("Unable to interact with world state")]
    WorldState {
        /// Storage failure
        #[source]
        source: StubError,
    },

    /// `NewAsset` on an existing key
    #[error("Cannot create new asset in world state as key {id} already exists")]
    AlreadyExists {
        /// Asset key
        id: String,
    },

    /// Update of a missing key
    #[error("Cannot update asset in world state as key {id} does not exist")]
    NotFoundForUpdate {
        /// Asset key
        id: String,
    },

    /// Read of a missing key
    #[error("Cannot read world state pair with key {id}. Does not exist")]
    NotFound {
        /// Asset key
        id: String,
    },

    /// Stored bytes are not a [`BasicAsset`]
    #[error("Data retrieved from world state for key {id} was not of type BasicAsset")]
    NotBasicAsset {
        /// Asset key
        id: String,
    },

    /// Record could not be encoded
    #[error("Error converting asset to JSON")]
    Encode {
        /// Encoder failure
        #[source]
        source: serde_json::Error,
    },

    /// No function of that name
    #[error("Invalid function {function}")]
    InvalidFunction {
        /// Raw function name as invoked
        function: String,
    },
}

/// Context holding the record loaded for the current call.
pub struct CallDataContext {
    base: BasicContext,
    /// Raw record for the first argument, `None` if absent
    pub call_data: Option<Vec<u8>>,
}

impl TransactionContext for CallDataContext {
    fn from_stub(stub: Arc<dyn ChaincodeStub>) -> Self {
        Self {
            base: BasicContext::from_stub(stub),
            call_data: None,
        }
    }

    fn stub(&self) -> &dyn ChaincodeStub {
        self.base.stub()
    }
}

impl CallDataContext {
    fn asset(&self, id: &str, missing: TutorialError) -> Result<BasicAsset, TutorialError> {
        let bytes = self.call_data.as_deref().ok_or(missing)?;
        serde_json::from_slice(bytes).map_err(|_| TutorialError::NotBasicAsset {
            id: id.to_string(),
        })
    }

    fn save(&self, asset: &BasicAsset) -> Result<(), TutorialError> {
        let json = serde_json::to_vec(asset).map_err(|source| TutorialError::Encode { source })?;
        self.stub()
            .put_state(&asset.id, &json)
            .map_err(|source| TutorialError::WorldState { source })
    }
}

/// Asset management over [`BasicAsset`] records.
pub struct AssetLedger;

impl AssetLedger {
    /// Create a record in the new condition
    pub fn new_asset(
        &self,
        ctx: &mut CallDataContext,
        id: String,
        owner: String,
        value: i64,
    ) -> Result<(), TutorialError> {
        if ctx.call_data.is_some() {
            return Err(TutorialError::AlreadyExists { id });
        }
        ctx.save(&BasicAsset {
            id,
            owner,
            value,
            condition: CONDITION_NEW,
        })
    }

    /// Hand the asset to a new owner; it becomes used
    pub fn update_owner(
        &self,
        ctx: &mut CallDataContext,
        id: String,
        owner: String,
    ) -> Result<(), TutorialError> {
        let mut asset = ctx.asset(&id, TutorialError::NotFoundForUpdate { id: id.clone() })?;
        asset.owner = owner;
        asset.condition = CONDITION_USED;
        ctx.save(&asset)
    }

    /// Add to the value
    pub fn update_value(
        &self,
        ctx: &mut CallDataContext,
        id: String,
        add: i64,
    ) -> Result<(), TutorialError> {
        let mut asset = ctx.asset(&id, TutorialError::NotFoundForUpdate { id: id.clone() })?;
        asset.value = asset.value.saturating_add(add);
        ctx.save(&asset)
    }

    /// The record as JSON
    pub fn get_asset(
        &self,
        ctx: &mut CallDataContext,
        id: String,
    ) -> Result<String, TutorialError> {
        let asset = ctx.asset(&id, TutorialError::NotFound { id: id.clone() })?;
        serde_json::to_string(&asset).map_err(|source| TutorialError::Encode { source })
    }

    fn get_world_state(&self, ctx: &mut CallDataContext) -> Result<(), TutorialError> {
        let (_, args) = ctx.stub().function_and_parameters();
        let key = args.first().ok_or(TutorialError::MissingKey)?;
        ctx.call_data = ctx
            .stub()
            .get_state(key)
            .map_err(|source| TutorialError::WorldState { source })?;
        Ok(())
    }

    fn unknown_transaction(&self, ctx: &mut CallDataContext) -> Result<(), TutorialError> {
        let (function, args) = ctx.stub().function_and_parameters();
        warn!(
            target: "contractapi::samples",
            function = %function,
            args = ?args,
            "Invalid function"
        );
        Err(TutorialError::InvalidFunction { function })
    }
}

/// The contract description
pub fn contract() -> ContractBuilder<AssetLedger, CallDataContext> {
    ContractBuilder::with_context(AssetLedger)
        .before_transaction(AssetLedger::get_world_state)
        .unknown_transaction(AssetLedger::unknown_transaction)
        .function("NewAsset", AssetLedger::new_asset)
        .function("UpdateOwner", AssetLedger::update_owner)
        .function("UpdateValue", AssetLedger::update_value)
        .function("GetAsset", AssetLedger::get_asset)
}

/// A router serving only [`AssetLedger`]
pub fn router() -> Result<Router, RegistrationError> {
    Router::builder().register(contract()).build()
}
