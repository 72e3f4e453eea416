//! Handler signature validation
//!
//! Every registered function and hook is checked once, when its contract is
//! built. A signature that passes is reduced to a [`CallShape`], which is
//! all the router needs at call time.
//!
//! Rules for callable functions:
//! - a context parameter, if present, is first and appears once
//! - every other parameter is a value type (scalar, or slice/array nested
//!   to any depth over a scalar)
//! - at most two returns: at most one value, at most one error, error last
//!
//! Hooks follow the same return rules. Before and unknown hooks take only
//! an optional context; after hooks may additionally take one `Any`
//! parameter receiving the main function's value.

use contractapi_core::{Signature, SignatureViolation, TypeSpec};

/// Validated shape of a function or hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    /// Whether the first declared parameter is the context
    pub takes_context: bool,
    /// Declared parameters after the context
    pub parameters: Vec<TypeSpec>,
    /// The non-error return, if declared
    pub value: Option<TypeSpec>,
    /// Whether an error return is declared
    pub returns_error: bool,
}

impl CallShape {
    /// Whether an after-hook receives the main function's value
    pub fn takes_value(&self) -> bool {
        self.parameters.first() == Some(&TypeSpec::Any)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Function,
    Hook,
    AfterHook,
}

/// Validate a callable function.
pub fn validate_function(signature: &Signature) -> Result<CallShape, SignatureViolation> {
    validate(signature, Kind::Function)
}

/// Validate a before-transaction hook.
pub fn validate_before(signature: &Signature) -> Result<CallShape, SignatureViolation> {
    validate(signature, Kind::Hook)
}

/// Validate an unknown-transaction hook.
pub fn validate_unknown(signature: &Signature) -> Result<CallShape, SignatureViolation> {
    validate(signature, Kind::Hook)
}

/// Validate an after-transaction hook.
pub fn validate_after(signature: &Signature) -> Result<CallShape, SignatureViolation> {
    validate(signature, Kind::AfterHook)
}

fn validate(signature: &Signature, kind: Kind) -> Result<CallShape, SignatureViolation> {
    let mut takes_context = false;
    let mut parameters = Vec::new();

    for (position, param) in signature.params.iter().enumerate() {
        match param {
            TypeSpec::Context if position == 0 => takes_context = true,
            TypeSpec::Context => return Err(SignatureViolation::ContextNotFirst { position }),
            TypeSpec::Any if kind == Kind::AfterHook && parameters.is_empty() => {
                parameters.push(TypeSpec::Any)
            }
            spec if spec.is_value_type() && kind == Kind::Function => {
                parameters.push(spec.clone())
            }
            spec if spec.is_value_type() || *spec == TypeSpec::Any => {
                return Err(SignatureViolation::UnexpectedParameter {
                    position,
                    type_name: spec.to_string(),
                })
            }
            spec => {
                return Err(SignatureViolation::UnsupportedParameter {
                    position,
                    type_name: spec.to_string(),
                })
            }
        }
    }

    let (value, returns_error) = validate_returns(&signature.returns)?;

    Ok(CallShape {
        takes_context,
        parameters,
        value,
        returns_error,
    })
}

fn validate_returns(returns: &[TypeSpec]) -> Result<(Option<TypeSpec>, bool), SignatureViolation> {
    if returns.len() > 2 {
        return Err(SignatureViolation::TooManyReturns {
            count: returns.len(),
        });
    }
    if returns.iter().filter(|r| **r == TypeSpec::Error).count() > 1 {
        return Err(SignatureViolation::MultipleErrors);
    }

    let mut value = None;
    let mut returns_error = false;
    for (position, ret) in returns.iter().enumerate() {
        match ret {
            TypeSpec::Error if position + 1 != returns.len() => {
                return Err(SignatureViolation::ErrorNotLast)
            }
            TypeSpec::Error => returns_error = true,
            spec if spec.is_value_type() => {
                if value.is_some() {
                    return Err(SignatureViolation::MultipleValues);
                }
                value = Some(spec.clone());
            }
            spec => {
                return Err(SignatureViolation::UnsupportedReturn {
                    type_name: spec.to_string(),
                })
            }
        }
    }

    Ok((value, returns_error))
}
