//! The simple asset contract: string values keyed by asset id.
//!
//! Registered without a name, so it answers under its type name
//! `SimpleAsset` and is also the default contract.

use contractapi_router::{
    BasicContext, ContractBuilder, RegistrationError, Router, TransactionContext,
};

use crate::error::AssetError;
use crate::INITIALISED;

/// String-valued assets on the default context.
pub struct SimpleAsset;

impl SimpleAsset {
    /// Store the sentinel under a new id
    pub fn create(&self, ctx: &mut BasicContext, id: String) -> Result<(), AssetError> {
        if load(ctx, &id)?.is_some() {
            return Err(AssetError::AlreadyExists { id });
        }
        store(ctx, &id, INITIALISED)
    }

    /// Replace the value of an existing asset
    pub fn update(
        &self,
        ctx: &mut BasicContext,
        id: String,
        value: String,
    ) -> Result<(), AssetError> {
        if load(ctx, &id)?.is_none() {
            return Err(AssetError::NotFoundForUpdate { id });
        }
        store(ctx, &id, &value)
    }

    /// Current value of an asset
    pub fn read(&self, ctx: &mut BasicContext, id: String) -> Result<String, AssetError> {
        match load(ctx, &id)? {
            Some(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            None => Err(AssetError::NotFound { id }),
        }
    }
}

fn load(ctx: &BasicContext, id: &str) -> Result<Option<Vec<u8>>, AssetError> {
    ctx.stub().get_state(id).map_err(AssetError::world_state)
}

fn store(ctx: &BasicContext, id: &str, value: &str) -> Result<(), AssetError> {
    ctx.stub()
        .put_state(id, value.as_bytes())
        .map_err(AssetError::world_state)
}

/// The contract description
pub fn contract() -> ContractBuilder<SimpleAsset> {
    ContractBuilder::new(SimpleAsset)
        .function("Create", SimpleAsset::create)
        .function("Update", SimpleAsset::update)
        .function("Read", SimpleAsset::read)
}

/// A router serving only [`SimpleAsset`]
pub fn router() -> Result<Router, RegistrationError> {
    Router::builder().register(contract()).build()
}
