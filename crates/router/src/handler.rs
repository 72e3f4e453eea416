//! Typed handler adapters
//!
//! Contract functions are ordinary Rust functions or methods. These traits
//! adapt them to the router's single erased calling convention:
//!
//! ```text
//! Fn(&T, &mut C, A1, .., An) -> R     ContextHandler   (context first)
//! Fn(&T, A1, .., An) -> R             PlainHandler     (no context)
//! Fn(&T) / Fn(&T, &mut C)             HookHandler      (before, unknown)
//! .. plus Fn(&T, [&mut C,] Option<Value>)  AfterHandler  (after)
//! ```
//!
//! `T` is the contract, `C` its transaction context, `A1..An` implement
//! [`Param`] (up to eight) and `R` implements [`IntoOutcome`]. The trait
//! impls are generated per arity, so the compiler picks the right one from
//! the function's signature.
//!
//! Each adapter also reports its [`Signature`], which goes through the same
//! validator as hand-declared raw signatures.

use std::vec;

use contractapi_core::{InvocationError, Signature, TransactionContext, TypeSpec, Value};

use crate::param::{IntoOutcome, Param};

/// Outcome of one erased call: the success value if one was returned
pub type CallResult = Result<Option<Value>, InvocationError>;

/// A contract function taking the transaction context first.
pub trait ContextHandler<T, C, Args>: Send + Sync + 'static {
    /// Declared parameters (context included) and returns
    fn signature() -> Signature;

    /// Call with converted arguments
    fn call(&self, contract: &T, ctx: &mut C, args: Vec<Value>) -> CallResult;
}

/// A contract function that does not take the transaction context.
pub trait PlainHandler<T, Args>: Send + Sync + 'static {
    /// Declared parameters and returns
    fn signature() -> Signature;

    /// Call with converted arguments
    fn call(&self, contract: &T, args: Vec<Value>) -> CallResult;
}

/// Hook forms taking no arguments besides an optional context.
///
/// Used for the before-transaction and unknown-transaction hooks. `M` is
/// [`Plain`] or [`Contextual`].
pub trait HookHandler<T, C, M>: Send + Sync + 'static {
    /// Declared parameters and returns
    fn signature() -> Signature;

    /// Run the hook
    fn call(&self, contract: &T, ctx: &mut C) -> CallResult;
}

/// After-transaction hook forms.
///
/// `M` is [`Plain`], [`Contextual`], [`WithValue`] or [`ValueOnly`]; the
/// last two receive the main function's success value (`None` if it
/// declares none).
pub trait AfterHandler<T, C, M>: Send + Sync + 'static {
    /// Declared parameters and returns
    fn signature() -> Signature;

    /// Run the hook
    fn call(&self, contract: &T, ctx: &mut C, value: Option<Value>) -> CallResult;
}

/// Marker: hook takes only the contract
pub struct Plain;

/// Marker: hook takes the contract and the context
pub struct Contextual;

/// Marker: after-hook takes the contract, the context and main's value
pub struct WithValue;

/// Marker: after-hook takes the contract and main's value
pub struct ValueOnly;

fn next_arg<A: Param>(args: &mut vec::IntoIter<Value>) -> Result<A, InvocationError> {
    let value = args.next().ok_or_else(|| InvocationError::Internal {
        reason: "converted argument list shorter than declared parameters".to_string(),
    })?;
    A::from_value(value).map_err(|e| InvocationError::Internal {
        reason: format!("converted argument has wrong type: {}", e),
    })
}

macro_rules! impl_handlers {
    ($($arg:ident),*) => {
        impl<T, C, F, R, $($arg,)*> ContextHandler<T, C, ($($arg,)*)> for F
        where
            F: Fn(&T, &mut C, $($arg),*) -> R + Send + Sync + 'static,
            C: TransactionContext,
            R: IntoOutcome,
            $($arg: Param,)*
        {
            fn signature() -> Signature {
                Signature::new(
                    vec![TypeSpec::Context, $($arg::type_spec()),*],
                    R::return_specs(),
                )
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, contract: &T, ctx: &mut C, args: Vec<Value>) -> CallResult {
                let mut args = args.into_iter();
                $(let $arg = next_arg::<$arg>(&mut args)?;)*
                Ok((self)(contract, ctx, $($arg),*).into_outcome()?)
            }
        }

        impl<T, F, R, $($arg,)*> PlainHandler<T, ($($arg,)*)> for F
        where
            F: Fn(&T, $($arg),*) -> R + Send + Sync + 'static,
            R: IntoOutcome,
            $($arg: Param,)*
        {
            fn signature() -> Signature {
                Signature::new(vec![$($arg::type_spec()),*], R::return_specs())
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, contract: &T, args: Vec<Value>) -> CallResult {
                let mut args = args.into_iter();
                $(let $arg = next_arg::<$arg>(&mut args)?;)*
                Ok((self)(contract, $($arg),*).into_outcome()?)
            }
        }
    };
}

impl_handlers!();
impl_handlers!(A1);
impl_handlers!(A1, A2);
impl_handlers!(A1, A2, A3);
impl_handlers!(A1, A2, A3, A4);
impl_handlers!(A1, A2, A3, A4, A5);
impl_handlers!(A1, A2, A3, A4, A5, A6);
impl_handlers!(A1, A2, A3, A4, A5, A6, A7);
impl_handlers!(A1, A2, A3, A4, A5, A6, A7, A8);

impl<T, C, F, R> HookHandler<T, C, Plain> for F
where
    F: Fn(&T) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(Vec::new(), R::return_specs())
    }

    fn call(&self, contract: &T, _ctx: &mut C) -> CallResult {
        Ok((self)(contract).into_outcome()?)
    }
}

impl<T, C, F, R> HookHandler<T, C, Contextual> for F
where
    F: Fn(&T, &mut C) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(vec![TypeSpec::Context], R::return_specs())
    }

    fn call(&self, contract: &T, ctx: &mut C) -> CallResult {
        Ok((self)(contract, ctx).into_outcome()?)
    }
}

impl<T, C, F, R> AfterHandler<T, C, Plain> for F
where
    F: Fn(&T) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(Vec::new(), R::return_specs())
    }

    fn call(&self, contract: &T, _ctx: &mut C, _value: Option<Value>) -> CallResult {
        Ok((self)(contract).into_outcome()?)
    }
}

impl<T, C, F, R> AfterHandler<T, C, Contextual> for F
where
    F: Fn(&T, &mut C) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(vec![TypeSpec::Context], R::return_specs())
    }

    fn call(&self, contract: &T, ctx: &mut C, _value: Option<Value>) -> CallResult {
        Ok((self)(contract, ctx).into_outcome()?)
    }
}

impl<T, C, F, R> AfterHandler<T, C, WithValue> for F
where
    F: Fn(&T, &mut C, Option<Value>) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(vec![TypeSpec::Context, TypeSpec::Any], R::return_specs())
    }

    fn call(&self, contract: &T, ctx: &mut C, value: Option<Value>) -> CallResult {
        Ok((self)(contract, ctx, value).into_outcome()?)
    }
}

impl<T, C, F, R> AfterHandler<T, C, ValueOnly> for F
where
    F: Fn(&T, Option<Value>) -> R + Send + Sync + 'static,
    C: TransactionContext,
    R: IntoOutcome,
{
    fn signature() -> Signature {
        Signature::new(vec![TypeSpec::Any], R::return_specs())
    }

    fn call(&self, contract: &T, _ctx: &mut C, value: Option<Value>) -> CallResult {
        Ok((self)(contract, value).into_outcome()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractapi_core::{BasicContext, HandlerError, ScalarType};

    struct Calc;

    impl Calc {
        fn add(&self, _ctx: &mut BasicContext, a: i32, b: i32) -> i32 {
            a + b
        }

        fn echo(&self, s: String) -> Result<String, HandlerError> {
            if s.is_empty() {
                Err(HandlerError::new("empty"))
            } else {
                Ok(s)
            }
        }

        fn nothing(&self) {}
    }

    fn signature_of<Args, H: ContextHandler<Calc, BasicContext, Args>>(_: &H) -> Signature {
        H::signature()
    }

    fn plain_signature_of<Args, H: PlainHandler<Calc, Args>>(_: &H) -> Signature {
        H::signature()
    }

    fn after_signature_of<M, H: AfterHandler<Calc, BasicContext, M>>(_: &H) -> Signature {
        H::signature()
    }

    fn plain_call<Args, H: PlainHandler<Calc, Args>>(h: &H, args: Vec<Value>) -> CallResult {
        h.call(&Calc, args)
    }

    #[test]
    fn test_context_handler_signature() {
        let sig = signature_of(&Calc::add);
        assert_eq!(
            sig.params,
            vec![
                TypeSpec::Context,
                TypeSpec::Scalar(ScalarType::Int32),
                TypeSpec::Scalar(ScalarType::Int32)
            ]
        );
        assert_eq!(sig.returns, vec![TypeSpec::Scalar(ScalarType::Int32)]);
    }

    #[test]
    fn test_plain_handler_signature() {
        assert_eq!(plain_signature_of(&Calc::echo).to_string(), "(string) (string, error)");
        assert_eq!(plain_signature_of(&Calc::nothing).to_string(), "()");
    }

    #[test]
    fn test_plain_handler_call() {
        let out = plain_call(&Calc::echo, vec![Value::from("hi")]).unwrap();
        assert_eq!(out, Some(Value::from("hi")));

        let err = plain_call(&Calc::echo, vec![Value::from("")]).unwrap_err();
        assert_eq!(err.to_string(), "empty");
    }

    #[test]
    fn test_after_handler_signatures() {
        let value_only = |_: &Calc, _value: Option<Value>| {};
        assert_eq!(after_signature_of(&value_only).params, vec![TypeSpec::Any]);

        let with_value = |_: &Calc, _ctx: &mut BasicContext, _value: Option<Value>| {};
        assert_eq!(
            after_signature_of(&with_value).params,
            vec![TypeSpec::Context, TypeSpec::Any]
        );
    }

    #[test]
    fn test_wrong_value_is_internal_error() {
        let err = plain_call(&Calc::echo, vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(err, InvocationError::Internal { .. }));
        let err = plain_call(&Calc::echo, Vec::new()).unwrap_err();
        assert!(matches!(err, InvocationError::Internal { .. }));
    }
}
