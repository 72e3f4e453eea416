//! Storage layer for the contract router
//!
//! This crate implements the in-memory storage collaborator:
//! - MemoryState: BTreeMap-based world state with RwLock
//! - MemoryStub: per-invocation `ChaincodeStub` bound to a MemoryState
//!
//! It is a test and embedding double. It makes no persistence or
//! atomicity promises.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryState, MemoryStub};
