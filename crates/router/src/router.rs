//! The Router - single entry point for invocations.
//!
//! One call runs, in order:
//!
//! 1. resolve the raw name (terminal on failure)
//! 2. unknown function: run the unknown hook and stop
//! 3. before hook; its error aborts the call
//! 4. argument conversion; its error aborts the call
//! 5. main function; its error aborts the call
//! 6. after hook, given main's value if it asks for it; its error aborts
//!    the call and discards main's value
//! 7. main's value converted to the payload
//!
//! A fresh transaction context is created for every call and dropped when
//! it completes. Effects of steps that ran before a failure are not rolled
//! back.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info, trace};

use contractapi_core::{
    ChaincodeStub, InvocationError, RegistrationError, Response, TransactionContext, TypeSpec,
    Value,
};

use crate::config::RouterConfig;
use crate::contract::{Contract, ContractBuilder};
use crate::convert;
use crate::metadata::{ChaincodeMetadata, SystemContract};
use crate::registry::{ContractRegistry, Target};

/// Collects contracts and configuration for a [`Router`].
pub struct RouterBuilder {
    config: RouterConfig,
    contracts: Vec<Result<Contract, RegistrationError>>,
}

impl RouterBuilder {
    /// Start with the default configuration
    pub fn new() -> Self {
        Self {
            config: RouterConfig::default(),
            contracts: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a contract. Registration order matters for the default
    /// contract choice.
    pub fn register<T, C>(mut self, contract: ContractBuilder<T, C>) -> Self
    where
        T: Send + Sync + 'static,
        C: TransactionContext,
    {
        self.contracts.push(contract.build());
        self
    }

    /// Validate everything and build the router.
    ///
    /// # Errors
    ///
    /// Returns the first registration error: an invalid name or signature,
    /// a duplicate namespace or function, no contracts, or an unknown
    /// configured default contract. No router exists on error.
    pub fn build(self) -> Result<Router, RegistrationError> {
        let contracts = self.contracts.into_iter().collect::<Result<Vec<_>, _>>()?;

        let metadata_json = Arc::new(OnceCell::new());
        let system = if self.config.system_contract {
            Some(SystemContract::build(Arc::clone(&metadata_json)).build()?)
        } else {
            None
        };

        let registry =
            ContractRegistry::new(contracts, system, self.config.default_contract.as_deref())?;

        for contract in registry.contracts() {
            info!(
                target: "contractapi::router",
                contract = contract.name(),
                functions = contract.functions().len(),
                default = contract.name() == registry.default_contract().name(),
                "Registered contract"
            );
        }

        let metadata = ChaincodeMetadata::from_registry(&registry, &self.config.metadata);
        let json = metadata.to_json().map_err(|e| RegistrationError::Metadata {
            reason: e.to_string(),
        })?;
        metadata_json
            .set(json.clone())
            .map_err(|_| RegistrationError::Metadata {
                reason: "metadata document already published".to_string(),
            })?;

        info!(
            target: "contractapi::router",
            contracts = registry.len(),
            default_contract = registry.default_contract().name(),
            "Router built"
        );

        Ok(Router {
            registry,
            metadata,
            metadata_json: json,
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches raw invocations to registered contracts.
///
/// The Router is read-only after it is built.
///
/// # Thread Safety
///
/// Router is `Send + Sync` and can be shared across threads without
/// locking. Calls are independent; each gets its own transaction context.
pub struct Router {
    registry: ContractRegistry,
    metadata: ChaincodeMetadata,
    metadata_json: String,
}

impl Router {
    /// Start registering contracts
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Run one invocation and frame the outcome for the host.
    pub fn invoke(&self, stub: Arc<dyn ChaincodeStub>) -> Response {
        Response::from(self.execute(stub))
    }

    /// Run one invocation.
    ///
    /// Returns the success payload (empty if the function declares no
    /// value) or the error that ended the call.
    pub fn execute(&self, stub: Arc<dyn ChaincodeStub>) -> Result<String, InvocationError> {
        let (name, args) = stub.function_and_parameters();
        let result = self.dispatch(&name, &args, stub);
        if let Err(e) = &result {
            debug!(target: "contractapi::router", function = %name, error = %e, "Invocation failed");
        }
        result
    }

    fn dispatch(
        &self,
        raw_name: &str,
        args: &[String],
        stub: Arc<dyn ChaincodeStub>,
    ) -> Result<String, InvocationError> {
        let resolution = self.registry.resolve(raw_name)?;
        let contract = resolution.contract;
        debug!(
            target: "contractapi::router",
            contract = contract.name(),
            function = resolution.function,
            args = args.len(),
            "Dispatching"
        );

        let mut ctx = contract.new_context(stub);

        let descriptor = match resolution.target {
            Target::Function(descriptor) => descriptor,
            Target::Unknown => {
                let hook = contract.unknown.as_ref().ok_or_else(|| InvocationError::Internal {
                    reason: format!("contract {} has no unknown handler", contract.name()),
                })?;
                trace!(target: "contractapi::router", function = resolution.function, "Unknown transaction");
                let value = (hook.call)(&mut *ctx, Vec::new())?;
                return payload(value, hook.shape.value.as_ref());
            }
        };

        if let Some(before) = &contract.before {
            trace!(target: "contractapi::router", "Before transaction");
            (before.call)(&mut *ctx, Vec::new())?;
        }

        let values = convert::parse_arguments(descriptor.parameters(), args)?;

        trace!(target: "contractapi::router", function = descriptor.name(), "Main transaction");
        let value = (descriptor.call)(&mut *ctx, values)?;

        if let Some(after) = &contract.after {
            trace!(target: "contractapi::router", "After transaction");
            let passed = match (&value, after.shape.takes_value()) {
                (Some(v), true) => vec![v.clone()],
                _ => Vec::new(),
            };
            (after.call)(&mut *ctx, passed)?;
        }

        payload(value, descriptor.returns())
    }

    /// Registered contracts
    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Metadata for every registered contract
    pub fn metadata(&self) -> &ChaincodeMetadata {
        &self.metadata
    }

    /// Metadata as served by `GetMetadata`
    pub fn metadata_json(&self) -> &str {
        &self.metadata_json
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("registry", &self.registry)
            .field("default_contract", &self.registry.default_contract().name())
            .finish()
    }
}

fn payload(value: Option<Value>, declared: Option<&TypeSpec>) -> Result<String, InvocationError> {
    match (value, declared) {
        (Some(value), Some(spec)) => convert::format_payload(&value, spec),
        _ => Ok(String::new()),
    }
}
