//! The simple asset contract rebuilt around a custom context.
//!
//! A before-hook loads the asset named by the first argument into
//! [`AssetContext`], so functions never read storage themselves. Unknown
//! function names are answered by a hook that echoes the call back.

use contractapi_router::{ContractBuilder, RegistrationError, Router, TransactionContext};

use crate::context::AssetContext;
use crate::error::AssetError;
use crate::INITIALISED;

/// String-valued assets on [`AssetContext`].
pub struct ExtendedAsset;

impl ExtendedAsset {
    /// Store the sentinel under a new id
    pub fn create(&self, ctx: &mut AssetContext, id: String) -> Result<(), AssetError> {
        if ctx.existing().is_some() {
            return Err(AssetError::AlreadyExists { id });
        }
        put(ctx, &id, INITIALISED.as_bytes())
    }

    /// Replace the value of an existing asset
    pub fn update(
        &self,
        ctx: &mut AssetContext,
        id: String,
        value: String,
    ) -> Result<(), AssetError> {
        if ctx.existing().is_none() {
            return Err(AssetError::NotFoundForUpdate { id });
        }
        put(ctx, &id, value.as_bytes())
    }

    /// Current value of an asset
    pub fn read(&self, ctx: &mut AssetContext, id: String) -> Result<String, AssetError> {
        ctx.existing()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or(AssetError::NotFound { id })
    }

    fn get_asset(&self, ctx: &mut AssetContext) -> Result<(), AssetError> {
        ctx.load_asset()
    }

    fn handle_unknown(&self, ctx: &mut AssetContext) -> Result<(), AssetError> {
        Err(ctx.unknown_function(""))
    }
}

pub(crate) fn put(ctx: &AssetContext, id: &str, value: &[u8]) -> Result<(), AssetError> {
    ctx.stub().put_state(id, value).map_err(AssetError::world_state)
}

/// The contract description, registered as `SimpleAsset` unless `name`
/// overrides it
pub fn contract(name: &str) -> ContractBuilder<ExtendedAsset, AssetContext> {
    ContractBuilder::with_context(ExtendedAsset)
        .name(if name.is_empty() { "SimpleAsset" } else { name })
        .before_transaction(ExtendedAsset::get_asset)
        .unknown_transaction(ExtendedAsset::handle_unknown)
        .function("Create", ExtendedAsset::create)
        .function("Update", ExtendedAsset::update)
        .function("Read", ExtendedAsset::read)
}

/// A router serving only the extended contract as `SimpleAsset`
pub fn router() -> Result<Router, RegistrationError> {
    Router::builder().register(contract("")).build()
}
