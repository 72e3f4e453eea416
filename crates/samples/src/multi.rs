//! Two contracts in one chaincode: `simpleasset` and `complexasset`.
//!
//! `simpleasset` is registered first, so bare function names resolve
//! against it. Each contract answers unknown functions with its own
//! message.

use contractapi_router::{ContractBuilder, RegistrationError, Router};
use serde::{Deserialize, Serialize};

use crate::context::AssetContext;
use crate::error::AssetError;
use crate::extended::{self, put, ExtendedAsset};

/// Record stored by `complexasset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexAsset {
    /// Current owner
    pub owner: String,
    /// Colours in the order they were added
    pub colours: Vec<String>,
    /// Accumulated value
    pub value: f64,
}

impl Default for ComplexAsset {
    fn default() -> Self {
        Self {
            owner: "Regulator".to_string(),
            colours: Vec::new(),
            value: 0.0,
        }
    }
}

/// JSON-valued assets with an owner, colours and a value.
pub struct ComplexAssetContract;

impl ComplexAssetContract {
    /// Store a fresh record owned by the regulator
    pub fn create(&self, ctx: &mut AssetContext, id: String) -> Result<(), AssetError> {
        if ctx.existing().is_some() {
            return Err(AssetError::AlreadyExists { id });
        }
        save(ctx, &id, &ComplexAsset::default())
    }

    /// Change the owner
    pub fn update_owner(
        &self,
        ctx: &mut AssetContext,
        id: String,
        owner: String,
    ) -> Result<(), AssetError> {
        let mut asset = existing(ctx, &id, AssetError::NotFoundForUpdate { id: id.clone() })?;
        asset.owner = owner;
        save(ctx, &id, &asset)
    }

    /// Add to the value
    pub fn update_value(
        &self,
        ctx: &mut AssetContext,
        id: String,
        additional: f64,
    ) -> Result<(), AssetError> {
        let mut asset = existing(ctx, &id, AssetError::NotFoundForUpdate { id: id.clone() })?;
        asset.value += additional;
        save(ctx, &id, &asset)
    }

    /// Append colours
    pub fn add_colours(
        &self,
        ctx: &mut AssetContext,
        id: String,
        colours: Vec<String>,
    ) -> Result<(), AssetError> {
        let mut asset = existing(ctx, &id, AssetError::NotFoundForUpdate { id: id.clone() })?;
        asset.colours.extend(colours);
        save(ctx, &id, &asset)
    }

    /// `owner - value - [colours]`
    pub fn read(&self, ctx: &mut AssetContext, id: String) -> Result<String, AssetError> {
        let asset = existing(ctx, &id, AssetError::NotFound { id: id.clone() })?;
        Ok(format!(
            "{} - {} - [{}]",
            asset.owner,
            asset.value,
            asset.colours.join(" ")
        ))
    }

    /// Accumulated value
    pub fn read_value(&self, ctx: &mut AssetContext, id: String) -> Result<f64, AssetError> {
        Ok(existing(ctx, &id, AssetError::NotFound { id: id.clone() })?.value)
    }

    /// Colours in order
    pub fn read_colours(
        &self,
        ctx: &mut AssetContext,
        id: String,
    ) -> Result<Vec<String>, AssetError> {
        Ok(existing(ctx, &id, AssetError::NotFound { id: id.clone() })?.colours)
    }

    fn get_asset(&self, ctx: &mut AssetContext) -> Result<(), AssetError> {
        ctx.load_asset()
    }

    fn handle_unknown(&self, ctx: &mut AssetContext) -> Result<(), AssetError> {
        Err(ctx.unknown_function("complex asset"))
    }
}

fn existing(ctx: &AssetContext, id: &str, missing: AssetError) -> Result<ComplexAsset, AssetError> {
    let bytes = ctx.existing().ok_or(missing)?;
    serde_json::from_slice(bytes).map_err(|_| AssetError::NotComplex { id: id.to_string() })
}

fn save(ctx: &AssetContext, id: &str, asset: &ComplexAsset) -> Result<(), AssetError> {
    let json = serde_json::to_vec(asset).map_err(|source| AssetError::Encode { source })?;
    put(ctx, id, &json)
}

/// `simpleasset`: the extended contract with its own unknown message
pub fn simple_contract() -> ContractBuilder<ExtendedAsset, AssetContext> {
    extended::contract("simpleasset").unknown_transaction(
        |_: &ExtendedAsset, ctx: &mut AssetContext| -> Result<(), AssetError> {
            Err(ctx.unknown_function("simple asset"))
        },
    )
}

/// `complexasset`
pub fn complex_contract() -> ContractBuilder<ComplexAssetContract, AssetContext> {
    ContractBuilder::with_context(ComplexAssetContract)
        .name("complexasset")
        .before_transaction(ComplexAssetContract::get_asset)
        .unknown_transaction(ComplexAssetContract::handle_unknown)
        .function("Create", ComplexAssetContract::create)
        .function("UpdateOwner", ComplexAssetContract::update_owner)
        .function("UpdateValue", ComplexAssetContract::update_value)
        .function("AddColours", ComplexAssetContract::add_colours)
        .function("Read", ComplexAssetContract::read)
        .function("ReadValue", ComplexAssetContract::read_value)
        .function("ReadColours", ComplexAssetContract::read_colours)
}

/// A router serving both contracts, `simpleasset` as the default
pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .register(simple_contract())
        .register(complex_contract())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_asset_json_layout() {
        let asset = ComplexAsset {
            colours: vec!["red".into()],
            value: 1.5,
            ..ComplexAsset::default()
        };
        assert_eq!(
            serde_json::to_string(&asset).unwrap(),
            r#"{"owner":"Regulator","colours":["red"],"value":1.5}"#
        );
    }
}
