//! MemoryState: in-memory world state with per-call stubs
//!
//! This module implements the storage collaborator using:
//! - `BTreeMap<String, Vec<u8>>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` counting committed writes
//! - `AtomicBool` availability switch for simulating an unreachable backend
//!
//! # Design Notes
//!
//! - **No transactions**: every `put_state`/`del_state` applies immediately.
//!   Writes made before a failing step of a call are not rolled back.
//! - **Shared state, per-call stub**: `MemoryState` is cloned cheaply (all
//!   fields are `Arc`s); `MemoryState::stub` binds it to one invocation's
//!   function name and arguments.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use contractapi_core::{ChaincodeStub, StubError, StubResult};

/// In-memory key-value world state.
///
/// Thread-safe through `parking_lot::RwLock`; clones share the same data.
#[derive(Debug, Clone)]
pub struct MemoryState {
    /// Ordered map from key to stored bytes
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    /// When false, every stub operation fails with `StubError::Unavailable`
    available: Arc<AtomicBool>,
    /// Number of successful puts and deletes
    writes: Arc<AtomicU64>,
}

impl MemoryState {
    /// Create a new empty world state
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Read a key directly, bypassing the availability switch
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    /// Read a key as UTF-8, bypassing the availability switch
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Seed a key directly, bypassing the availability switch
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.data.write().insert(key.into(), value.into());
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the state holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All stored keys in order
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Number of writes applied through stubs
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }

    /// Simulate the backend going away (`false`) or coming back (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    /// Check whether stub operations currently succeed
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Bind this state to one invocation
    pub fn stub<S: Into<String>>(
        &self,
        function: impl Into<String>,
        args: impl IntoIterator<Item = S>,
    ) -> Arc<MemoryStub> {
        Arc::new(MemoryStub {
            state: self.clone(),
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    fn check(&self, key: &str) -> StubResult<()> {
        if !self.is_available() {
            return Err(StubError::Unavailable {
                reason: "memory state is offline".to_string(),
            });
        }
        if key.is_empty() {
            return Err(StubError::InvalidKey {
                reason: "key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MemoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stub for one invocation against a [`MemoryState`].
#[derive(Debug, Clone)]
pub struct MemoryStub {
    state: MemoryState,
    function: String,
    args: Vec<String>,
}

impl MemoryStub {
    /// The world state this stub reads and writes
    pub fn state(&self) -> &MemoryState {
        &self.state
    }
}

impl ChaincodeStub for MemoryStub {
    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        self.state.check(key)?;
        let value = self.state.data.read().get(key).cloned();
        trace!(target: "contractapi::storage", key, found = value.is_some(), "get_state");
        Ok(value)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StubResult<()> {
        self.state.check(key)?;
        self.state
            .data
            .write()
            .insert(key.to_string(), value.to_vec());
        self.state.writes.fetch_add(1, Ordering::AcqRel);
        trace!(target: "contractapi::storage", key, len = value.len(), "put_state");
        Ok(())
    }

    fn del_state(&self, key: &str) -> StubResult<()> {
        self.state.check(key)?;
        let removed = self.state.data.write().remove(key).is_some();
        self.state.writes.fetch_add(1, Ordering::AcqRel);
        trace!(target: "contractapi::storage", key, removed, "del_state");
        Ok(())
    }

    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }
}
