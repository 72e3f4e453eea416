//! Integer-valued assets.

use contractapi_router::{
    BasicContext, ContractBuilder, RegistrationError, Router, TransactionContext,
};

use crate::error::AssetError;

/// Counters keyed by asset id, starting at zero.
pub struct CounterAsset;

impl CounterAsset {
    /// Start a counter at zero
    pub fn create(&self, ctx: &mut BasicContext, id: String) -> Result<(), AssetError> {
        if fetch(ctx, &id)?.is_some() {
            return Err(AssetError::AlreadyExists { id });
        }
        store(ctx, &id, 0)
    }

    /// Add `value` (which may be negative) to a counter
    pub fn update(&self, ctx: &mut BasicContext, id: String, value: i64) -> Result<(), AssetError> {
        let current = fetch(ctx, &id)?.ok_or_else(|| AssetError::NotFoundForUpdate {
            id: id.clone(),
        })?;
        store(ctx, &id, current.saturating_add(value))
    }

    /// Current count
    pub fn read(&self, ctx: &mut BasicContext, id: String) -> Result<i64, AssetError> {
        fetch(ctx, &id)?.ok_or(AssetError::NotFound { id })
    }
}

fn fetch(ctx: &BasicContext, id: &str) -> Result<Option<i64>, AssetError> {
    let Some(bytes) = ctx.stub().get_state(id).map_err(AssetError::world_state)? else {
        return Ok(None);
    };
    std::str::from_utf8(&bytes)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Some)
        .ok_or_else(|| AssetError::NotCounter { id: id.to_string() })
}

fn store(ctx: &BasicContext, id: &str, value: i64) -> Result<(), AssetError> {
    ctx.stub()
        .put_state(id, value.to_string().as_bytes())
        .map_err(AssetError::world_state)
}

/// The contract description
pub fn contract() -> ContractBuilder<CounterAsset> {
    ContractBuilder::new(CounterAsset)
        .function("Create", CounterAsset::create)
        .function("Update", CounterAsset::update)
        .function("Read", CounterAsset::read)
}

/// A router serving only [`CounterAsset`]
pub fn router() -> Result<Router, RegistrationError> {
    Router::builder().register(contract()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractapi_storage::MemoryState;

    #[test]
    fn test_counter_accumulates() {
        let router = router().unwrap();
        let state = MemoryState::new();

        assert!(router.invoke(state.stub("Create", ["C1"])).is_success());
        assert!(router.invoke(state.stub("Update", ["C1", "5"])).is_success());
        assert!(router.invoke(state.stub("Update", ["C1", "-7"])).is_success());
        assert_eq!(
            router.invoke(state.stub("CounterAsset:Read", ["C1"])).payload(),
            Some("-2")
        );
        assert_eq!(state.get_string("C1").as_deref(), Some("-2"));
    }

    #[test]
    fn test_counter_rejects_foreign_value() {
        let router = router().unwrap();
        let state = MemoryState::new();
        state.insert("C1", b"Initialised".to_vec());

        let response = router.invoke(state.stub("Read", ["C1"]));
        assert_eq!(response.message(), Some("Asset with id C1 is not a counter"));
    }

    #[test]
    fn test_non_integer_update_is_conversion_error() {
        let router = router().unwrap();
        let state = MemoryState::new();
        router.invoke(state.stub("Create", ["C1"]));

        let response = router.invoke(state.stub("Update", ["C1", "five"]));
        assert!(!response.is_success());
        assert_eq!(state.get_string("C1").as_deref(), Some("0"));
    }
}
