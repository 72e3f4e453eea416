//! Contract registry and name resolution
//!
//! Raw function names are resolved as follows:
//!
//! - `namespace:function`: split at the *last* `:`; the namespace must be a
//!   registered contract
//! - `function`: resolved against the default contract
//!
//! Function lookup is exact and case-sensitive. A miss falls back to the
//! contract's unknown-function hook if it defines one.
//!
//! Default contract, in order of precedence:
//! 1. the namespace named by configuration
//! 2. the first contract registered without an explicit name
//! 3. the first contract registered
//!
//! The system contract is never the default.

use std::collections::BTreeMap;

use contractapi_core::{InvocationError, RegistrationError, NAMESPACE_SEPARATOR};

use crate::contract::{Contract, FunctionDescriptor};

/// What a resolved name will run.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A registered function
    Function(&'a FunctionDescriptor),
    /// The contract's unknown-function hook
    Unknown,
}

/// A raw function name resolved to a contract and target.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The contract the call goes to
    pub contract: &'a Contract,
    /// The function part of the raw name
    pub function: &'a str,
    /// What will run
    pub target: Target<'a>,
}

/// Registered contracts keyed by namespace.
///
/// Read-only once built; shared by every call.
#[derive(Debug)]
pub struct ContractRegistry {
    /// Contracts in registration order, system contract last
    contracts: Vec<Contract>,
    /// Namespace → position in `contracts`
    index: BTreeMap<String, usize>,
    /// Position of the default contract
    default: usize,
}

impl ContractRegistry {
    /// Build the registry from user contracts and the optional system
    /// contract.
    pub(crate) fn new(
        contracts: Vec<Contract>,
        system: Option<Contract>,
        default_contract: Option<&str>,
    ) -> Result<Self, RegistrationError> {
        if contracts.is_empty() {
            return Err(RegistrationError::NoContracts);
        }

        let default = match default_contract {
            Some(name) => contracts
                .iter()
                .position(|c| c.name() == name)
                .ok_or_else(|| RegistrationError::UnknownDefaultContract {
                    name: name.to_string(),
                })?,
            None => contracts
                .iter()
                .position(|c| !c.has_explicit_name())
                .unwrap_or(0),
        };

        let mut all = contracts;
        all.extend(system);

        let mut index = BTreeMap::new();
        for (i, contract) in all.iter().enumerate() {
            if index.insert(contract.name().to_string(), i).is_some() {
                return Err(RegistrationError::DuplicateContract {
                    name: contract.name().to_string(),
                });
            }
        }

        Ok(Self {
            contracts: all,
            index,
            default,
        })
    }

    /// Resolve a raw function name.
    ///
    /// # Errors
    ///
    /// `ContractNotFound` if the namespace is not registered;
    /// `FunctionNotFound` if the function is missing and the contract has no
    /// unknown-function hook.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> Result<Resolution<'a>, InvocationError> {
        let (contract, function) = match raw.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((namespace, function)) => {
                let contract =
                    self.get(namespace)
                        .ok_or_else(|| InvocationError::ContractNotFound {
                            name: namespace.to_string(),
                        })?;
                (contract, function)
            }
            None => (self.default_contract(), raw),
        };

        let target = match contract.function(function) {
            Some(descriptor) => Target::Function(descriptor),
            None if contract.has_unknown_handler() => Target::Unknown,
            None => {
                return Err(InvocationError::FunctionNotFound {
                    function: function.to_string(),
                    contract: contract.name().to_string(),
                })
            }
        };

        Ok(Resolution {
            contract,
            function,
            target,
        })
    }

    /// Look up a contract by namespace
    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.index.get(name).map(|&i| &self.contracts[i])
    }

    /// Contracts in registration order
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter()
    }

    /// The contract bare function names resolve against
    pub fn default_contract(&self) -> &Contract {
        &self.contracts[self.default]
    }

    /// Number of registered contracts, system contract included
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Check if no contracts are registered
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
