//! Metadata describing the callable surface
//!
//! Computed once when the router is built, from the same descriptors the
//! router dispatches to. Served as JSON by the system contract's
//! `GetMetadata` function and available directly from `Router::metadata`.
//!
//! Schema mapping:
//!
//! | Type | Schema |
//! |------|--------|
//! | `string` | `{"type":"string"}` |
//! | `bool` | `{"type":"boolean"}` |
//! | integers | `{"type":"integer","format":"int8"..}` |
//! | `float32`/`float64` | `{"type":"number","format":"float"/"double"}` |
//! | slice | `{"type":"array","items":..}` |
//! | array | slice plus `minItems`/`maxItems` |

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::json;

use contractapi_core::{HandlerError, ScalarType, TypeSpec};

use crate::config::MetadataConfig;
use crate::contract::{Contract, ContractBuilder, FunctionDescriptor};
use crate::registry::ContractRegistry;

/// Namespace of the built-in system contract
pub const SYSTEM_CONTRACT_NAME: &str = "org.hyperledger.fabric";

/// Top-level metadata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaincodeMetadata {
    /// Title and version
    pub info: InfoMetadata,
    /// Namespace bare function names resolve against
    #[serde(rename = "defaultContract")]
    pub default_contract: String,
    /// Every registered contract by namespace
    pub contracts: BTreeMap<String, ContractMetadata>,
}

/// Title and version of the deployed chaincode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoMetadata {
    /// Human-readable title
    pub title: String,
    /// Version string
    pub version: String,
}

/// One contract's callable functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMetadata {
    /// Namespace
    pub name: String,
    /// Callable functions in registration order
    pub transactions: Vec<TransactionMetadata>,
}

/// One callable function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    /// Function name
    pub name: String,
    /// Parameters after the context, in order
    pub parameters: Vec<ParameterMetadata>,
    /// Schema of the non-error return, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<serde_json::Value>,
}

/// One function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Positional name (`param0`, `param1`, ..)
    pub name: String,
    /// JSON schema of the declared type
    pub schema: serde_json::Value,
}

impl ChaincodeMetadata {
    /// Describe every contract in the registry
    pub fn from_registry(registry: &ContractRegistry, info: &MetadataConfig) -> Self {
        let contracts = registry
            .contracts()
            .map(|c| (c.name().to_string(), ContractMetadata::from_contract(c)))
            .collect();

        Self {
            info: InfoMetadata {
                title: info.title.clone(),
                version: info.version.clone(),
            },
            default_contract: registry.default_contract().name().to_string(),
            contracts,
        }
    }

    /// Look up a function's metadata
    pub fn transaction(&self, contract: &str, function: &str) -> Option<&TransactionMetadata> {
        self.contracts
            .get(contract)?
            .transactions
            .iter()
            .find(|t| t.name == function)
    }

    /// Serialize as compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ContractMetadata {
    fn from_contract(contract: &Contract) -> Self {
        Self {
            name: contract.name().to_string(),
            transactions: contract
                .functions()
                .iter()
                .map(TransactionMetadata::from_descriptor)
                .collect(),
        }
    }
}

impl TransactionMetadata {
    fn from_descriptor(descriptor: &FunctionDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            parameters: descriptor
                .parameters()
                .iter()
                .enumerate()
                .map(|(i, spec)| ParameterMetadata {
                    name: format!("param{}", i),
                    schema: schema_for(spec),
                })
                .collect(),
            returns: descriptor.returns().map(schema_for),
        }
    }
}

/// JSON schema for a declared value type
pub fn schema_for(spec: &TypeSpec) -> serde_json::Value {
    match spec {
        TypeSpec::Scalar(ScalarType::String) => json!({ "type": "string" }),
        TypeSpec::Scalar(ScalarType::Bool) => json!({ "type": "boolean" }),
        TypeSpec::Scalar(float) if float.is_float() => {
            let format = if *float == ScalarType::Float32 { "float" } else { "double" };
            json!({ "type": "number", "format": format })
        }
        TypeSpec::Scalar(integer) if integer.is_integer() => {
            json!({ "type": "integer", "format": integer.name() })
        }
        TypeSpec::Slice(inner) => json!({ "type": "array", "items": schema_for(inner) }),
        TypeSpec::Array(inner, len) => json!({
            "type": "array",
            "items": schema_for(inner),
            "minItems": len,
            "maxItems": len,
        }),
        other => json!({ "type": other.to_string() }),
    }
}

/// The built-in contract answering metadata queries.
pub(crate) struct SystemContract {
    metadata: Arc<OnceCell<String>>,
}

impl SystemContract {
    /// Build the system contract; `metadata` is filled once the registry
    /// it describes exists.
    pub(crate) fn build(metadata: Arc<OnceCell<String>>) -> ContractBuilder<Self> {
        ContractBuilder::new(Self { metadata })
            .name(SYSTEM_CONTRACT_NAME)
            .function_without_context("GetMetadata", Self::get_metadata)
    }

    fn get_metadata(&self) -> Result<String, HandlerError> {
        self.metadata
            .get()
            .cloned()
            .ok_or_else(|| HandlerError::new("metadata not yet available"))
    }
}
