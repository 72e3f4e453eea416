//! Contract registration
//!
//! A contract is any `T: Send + Sync + 'static` value. [`ContractBuilder`]
//! collects its callable functions and hooks; [`ContractBuilder::build`]
//! validates every signature and type-erases the result into a
//! [`Contract`], the immutable form the registry stores.
//!
//! ```ignore
//! let contract = ContractBuilder::new(SimpleAsset)
//!     .function("Create", SimpleAsset::create)
//!     .function("Read", SimpleAsset::read)
//!     .build()?;
//! ```
//!
//! Contracts with a custom transaction context name it explicitly:
//!
//! ```ignore
//! ContractBuilder::<_, AssetContext>::with_context(SimpleAsset)
//!     .before_transaction(get_asset)
//!     .function("Read", SimpleAsset::read)
//! ```

use std::any::{self, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use contractapi_core::{
    BasicContext, ChaincodeStub, HandlerError, InvocationError, RegistrationError, Signature,
    SignatureViolation, TransactionContext, TypeSpec, Value, NAMESPACE_SEPARATOR,
};

use crate::handler::{AfterHandler, CallResult, ContextHandler, HookHandler, PlainHandler};
use crate::signature::{self, CallShape};

type TypedFn<T, C> = Box<dyn Fn(&T, &mut C, Vec<Value>) -> CallResult + Send + Sync>;

/// Type-erased call: context as `dyn Any`, converted arguments in.
pub(crate) type ErasedFn = Box<dyn Fn(&mut (dyn Any + Send), Vec<Value>) -> CallResult + Send + Sync>;

type ContextFactory = Box<dyn Fn(Arc<dyn ChaincodeStub>) -> Box<dyn Any + Send> + Send + Sync>;

struct Pending<T, C> {
    name: String,
    signature: Signature,
    call: TypedFn<T, C>,
}

/// Describes one contract before registration.
///
/// `C` is the transaction context type created for every call into this
/// contract.
pub struct ContractBuilder<T, C = BasicContext> {
    instance: T,
    name: Option<String>,
    functions: Vec<Pending<T, C>>,
    before: Option<Pending<T, C>>,
    after: Option<Pending<T, C>>,
    unknown: Option<Pending<T, C>>,
    _context: PhantomData<fn() -> C>,
}

impl<T: Send + Sync + 'static> ContractBuilder<T, BasicContext> {
    /// Start describing a contract that uses [`BasicContext`]
    pub fn new(instance: T) -> Self {
        Self::with_context(instance)
    }
}

impl<T: Send + Sync + 'static, C: TransactionContext> ContractBuilder<T, C> {
    /// Start describing a contract with a custom transaction context
    pub fn with_context(instance: T) -> Self {
        Self {
            instance,
            name: None,
            functions: Vec::new(),
            before: None,
            after: None,
            unknown: None,
            _context: PhantomData,
        }
    }

    /// Register under an explicit namespace instead of the type name.
    ///
    /// An empty name is the same as no name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Add a callable function whose first parameter is the context
    pub fn function<Args, H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: ContextHandler<T, C, Args>,
    {
        self.functions.push(Pending {
            name: name.into(),
            signature: H::signature(),
            call: Box::new(move |contract, ctx, args| handler.call(contract, ctx, args)),
        });
        self
    }

    /// Add a callable function that does not take the context
    pub fn function_without_context<Args, H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: PlainHandler<T, Args>,
    {
        self.functions.push(Pending {
            name: name.into(),
            signature: H::signature(),
            call: Box::new(move |contract, _ctx, args| handler.call(contract, args)),
        });
        self
    }

    /// Add a callable function with a hand-declared signature.
    ///
    /// The function receives the converted arguments in declaration order
    /// (context excluded) and returns the success value, if any.
    pub fn raw_function<F>(mut self, name: impl Into<String>, signature: Signature, f: F) -> Self
    where
        F: Fn(&T, &mut C, Vec<Value>) -> Result<Option<Value>, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.functions.push(Pending {
            name: name.into(),
            signature,
            call: Box::new(move |contract, ctx, args| Ok(f(contract, ctx, args)?)),
        });
        self
    }

    /// Run before every known function
    pub fn before_transaction<M, H>(mut self, hook: H) -> Self
    where
        H: HookHandler<T, C, M>,
    {
        self.before = Some(Pending {
            name: "before_transaction".to_string(),
            signature: H::signature(),
            call: Box::new(move |contract, ctx, _args| hook.call(contract, ctx)),
        });
        self
    }

    /// Run after every known function that succeeded
    pub fn after_transaction<M, H>(mut self, hook: H) -> Self
    where
        H: AfterHandler<T, C, M>,
    {
        self.after = Some(Pending {
            name: "after_transaction".to_string(),
            signature: H::signature(),
            call: Box::new(move |contract, ctx, args| {
                hook.call(contract, ctx, args.into_iter().next())
            }),
        });
        self
    }

    /// Run instead of a function the contract does not define
    pub fn unknown_transaction<M, H>(mut self, hook: H) -> Self
    where
        H: HookHandler<T, C, M>,
    {
        self.unknown = Some(Pending {
            name: "unknown_transaction".to_string(),
            signature: H::signature(),
            call: Box::new(move |contract, ctx, _args| hook.call(contract, ctx)),
        });
        self
    }

    /// Validate and erase into a registrable [`Contract`].
    ///
    /// # Errors
    ///
    /// Fails on an invalid contract or function name, a duplicate function
    /// name, or any signature that breaks the calling convention.
    pub fn build(self) -> Result<Contract, RegistrationError> {
        let explicit_name = self.name.is_some();
        let name = match self.name {
            Some(name) => {
                if name.contains(NAMESPACE_SEPARATOR) {
                    return Err(RegistrationError::InvalidContractName {
                        name,
                        reason: format!("must not contain '{}'", NAMESPACE_SEPARATOR),
                    });
                }
                name
            }
            None => short_type_name::<T>().to_string(),
        };

        let instance = Arc::new(self.instance);
        let signature_error = |function: &str, violation: SignatureViolation| {
            RegistrationError::Signature {
                contract: name.clone(),
                function: function.to_string(),
                violation,
            }
        };

        let mut functions = Vec::with_capacity(self.functions.len());
        let mut index = BTreeMap::new();
        for pending in self.functions {
            if pending.name.is_empty() || pending.name.contains(NAMESPACE_SEPARATOR) {
                return Err(RegistrationError::InvalidFunctionName {
                    contract: name.clone(),
                    function: pending.name,
                    reason: format!("must be non-empty and not contain '{}'", NAMESPACE_SEPARATOR),
                });
            }
            if index.contains_key(&pending.name) {
                return Err(RegistrationError::DuplicateFunction {
                    contract: name.clone(),
                    function: pending.name,
                });
            }
            let shape = signature::validate_function(&pending.signature)
                .map_err(|v| signature_error(&pending.name, v))?;

            index.insert(pending.name.clone(), functions.len());
            functions.push(FunctionDescriptor {
                name: pending.name,
                signature: pending.signature,
                shape,
                call: erase::<T, C>(&instance, pending.call),
            });
        }

        let hook = |pending: Option<Pending<T, C>>,
                    validate: fn(&Signature) -> Result<CallShape, SignatureViolation>|
         -> Result<Option<Hook>, RegistrationError> {
            pending
                .map(|p| -> Result<Hook, RegistrationError> {
                    let shape = validate(&p.signature).map_err(|v| signature_error(&p.name, v))?;
                    Ok(Hook {
                        shape,
                        call: erase::<T, C>(&instance, p.call),
                    })
                })
                .transpose()
        };
        let before = hook(self.before, signature::validate_before)?;
        let after = hook(self.after, signature::validate_after)?;
        let unknown = hook(self.unknown, signature::validate_unknown)?;

        Ok(Contract {
            name,
            explicit_name,
            type_name: any::type_name::<T>(),
            functions,
            index,
            before,
            after,
            unknown,
            new_context: Box::new(|stub| Box::new(C::from_stub(stub)) as Box<dyn Any + Send>),
        })
    }
}

fn erase<T: Send + Sync + 'static, C: TransactionContext>(
    instance: &Arc<T>,
    call: TypedFn<T, C>,
) -> ErasedFn {
    let instance = Arc::clone(instance);
    Box::new(move |ctx, args| {
        let ctx = ctx
            .downcast_mut::<C>()
            .ok_or_else(|| InvocationError::Internal {
                reason: format!(
                    "transaction context is not a {}",
                    any::type_name::<C>()
                ),
            })?;
        call(instance.as_ref(), ctx, args)
    })
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name<T>() -> &'static str {
    let full = any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A validated, callable function.
pub struct FunctionDescriptor {
    name: String,
    signature: Signature,
    shape: CallShape,
    pub(crate) call: ErasedFn,
}

impl FunctionDescriptor {
    /// Function name as called
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full declared signature, context included
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Validated shape
    pub fn shape(&self) -> &CallShape {
        &self.shape
    }

    /// Declared parameters after the context
    pub fn parameters(&self) -> &[TypeSpec] {
        &self.shape.parameters
    }

    /// Declared non-error return, if any
    pub fn returns(&self) -> Option<&TypeSpec> {
        self.shape.value.as_ref()
    }
}

impl fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

pub(crate) struct Hook {
    pub(crate) shape: CallShape,
    pub(crate) call: ErasedFn,
}

/// A registered contract: immutable, type-erased.
pub struct Contract {
    name: String,
    explicit_name: bool,
    type_name: &'static str,
    functions: Vec<FunctionDescriptor>,
    index: BTreeMap<String, usize>,
    pub(crate) before: Option<Hook>,
    pub(crate) after: Option<Hook>,
    pub(crate) unknown: Option<Hook>,
    new_context: ContextFactory,
}

impl Contract {
    /// Namespace the contract is addressed by
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name was given explicitly rather than taken from the type
    pub fn has_explicit_name(&self) -> bool {
        self.explicit_name
    }

    /// Full Rust type name of the contract value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Callable functions in registration order
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    /// Look up a callable function by exact name
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    /// Whether an unknown-function hook is defined
    pub fn has_unknown_handler(&self) -> bool {
        self.unknown.is_some()
    }

    pub(crate) fn new_context(&self, stub: Arc<dyn ChaincodeStub>) -> Box<dyn Any + Send> {
        (self.new_context)(stub)
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("functions", &self.functions)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("unknown", &self.unknown.is_some())
            .finish()
    }
}
