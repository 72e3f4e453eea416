//! Errors returned by the sample contracts.
//!
//! The messages are the ones clients see in a failed response, so they are
//! kept exactly as the deployed chaincode reports them.

use contractapi_router::StubError;
use thiserror::Error;

/// Failure of a sample asset transaction.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Storage could not be reached
    #[error("Unable to interact with world state")]
    WorldState {
        /// Storage failure
        #[source]
        source: StubError,
    },

    /// `Create` on an existing key
    #[error("Cannot create asset. Asset with id {id} already exists")]
    AlreadyExists {
        /// Asset key
        id: String,
    },

    /// Update of a missing key
    #[error("Cannot update asset. Asset with id {id} does not exist")]
    NotFoundForUpdate {
        /// Asset key
        id: String,
    },

    /// Read of a missing key
    #[error("Cannot read asset. Asset with id {id} does not exist")]
    NotFound {
        /// Asset key
        id: String,
    },

    /// Stored bytes are not a complex asset
    #[error("Asset with id {id} is not a ComplexAsset")]
    NotComplex {
        /// Asset key
        id: String,
    },

    /// Stored bytes are not a counter
    #[error("Asset with id {id} is not a counter")]
    NotCounter {
        /// Asset key
        id: String,
    },

    /// Asset could not be encoded
    #[error("Error converting asset to JSON")]
    Encode {
        /// Encoder failure
        #[source]
        source: serde_json::Error,
    },

    /// No function of that name, reported by an unknown-function hook
    #[error("Unknown function name {function} passed{target} with args [{args}]")]
    UnknownFunction {
        /// Raw function name as invoked
        function: String,
        /// `" to simple asset"` and the like; empty when unqualified
        target: String,
        /// Arguments joined by spaces
        args: String,
    },
}

impl AssetError {
    pub(crate) fn world_state(source: StubError) -> Self {
        AssetError::WorldState { source }
    }

    pub(crate) fn unknown_function(function: String, args: &[String], target: &str) -> Self {
        AssetError::UnknownFunction {
            function,
            target: if target.is_empty() {
                String::new()
            } else {
                format!(" to {}", target)
            },
            args: args.join(" "),
        }
    }
}
