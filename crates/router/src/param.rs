//! Rust types that can cross the wire
//!
//! [`Param`] maps a Rust type to its declared [`TypeSpec`] and to and from
//! the converter's [`Value`]. It is implemented for the closed set of
//! scalar types plus `Vec<T>` (slices) and `[T; N]` (arrays), nested to any
//! depth.
//!
//! [`IntoOutcome`] maps a handler's Rust return type to its declared return
//! list and splits the returned value into the success value and the
//! handler error. It covers:
//!
//! | Rust return | Declared returns |
//! |-------------|------------------|
//! | `()` | none |
//! | `Result<(), E>` | error |
//! | `P` | value |
//! | `Result<P, E>` | value, error |
//!
//! where `P: Param` and `E: Display`.

use std::fmt;

use contractapi_core::{HandlerError, ScalarType, TypeSpec, Value, WrongType};

/// A type usable as a handler parameter or return value.
pub trait Param: Sized + Send + 'static {
    /// The declared type
    fn type_spec() -> TypeSpec;

    /// Extract from a converted value.
    ///
    /// # Errors
    ///
    /// Returns `WrongType` if the value's variant or range does not match.
    fn from_value(value: Value) -> Result<Self, WrongType>;

    /// Wrap for output conversion
    fn into_value(self) -> Value;
}

fn wrong_type<P: Param>(value: &Value) -> WrongType {
    WrongType {
        expected: P::type_spec().to_string(),
        actual: value.type_name().to_string(),
    }
}

impl Param for String {
    fn type_spec() -> TypeSpec {
        TypeSpec::STRING
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(wrong_type::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl Param for bool {
    fn type_spec() -> TypeSpec {
        TypeSpec::Scalar(ScalarType::Bool)
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(wrong_type::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! impl_integer_param {
    ($variant:ident, $wide:ty, $($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Param for $ty {
                fn type_spec() -> TypeSpec {
                    TypeSpec::Scalar(ScalarType::$scalar)
                }

                fn from_value(value: Value) -> Result<Self, WrongType> {
                    match value {
                        Value::$variant(v) => <$ty>::try_from(v).map_err(|_| WrongType {
                            expected: ScalarType::$scalar.to_string(),
                            actual: format!("out of range {}", v),
                        }),
                        other => Err(wrong_type::<Self>(&other)),
                    }
                }

                fn into_value(self) -> Value {
                    Value::$variant(<$wide>::from(self))
                }
            }
        )*
    };
}

impl_integer_param!(Int, i64, i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_integer_param!(Uint, u64, u8 => Uint8, u16 => Uint16, u32 => Uint32, u64 => Uint64);

impl Param for f32 {
    fn type_spec() -> TypeSpec {
        TypeSpec::Scalar(ScalarType::Float32)
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        match value {
            Value::Float(f) => Ok(f as f32),
            other => Err(wrong_type::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl Param for f64 {
    fn type_spec() -> TypeSpec {
        TypeSpec::Scalar(ScalarType::Float64)
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(wrong_type::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl<T: Param> Param for Vec<T> {
    fn type_spec() -> TypeSpec {
        TypeSpec::slice(T::type_spec())
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(wrong_type::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(Param::into_value).collect())
    }
}

impl<T: Param, const N: usize> Param for [T; N] {
    fn type_spec() -> TypeSpec {
        TypeSpec::array(T::type_spec(), N)
    }

    fn from_value(value: Value) -> Result<Self, WrongType> {
        let items = Vec::<T>::from_value(value)?;
        let len = items.len();
        <[T; N]>::try_from(items).map_err(|_| WrongType {
            expected: Self::type_spec().to_string(),
            actual: format!("List of {} elements", len),
        })
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(Param::into_value).collect())
    }
}

/// A handler or hook return type.
pub trait IntoOutcome {
    /// The declared return list
    fn return_specs() -> Vec<TypeSpec>;

    /// Split into the success value (if one is declared) or the handler error
    fn into_outcome(self) -> Result<Option<Value>, HandlerError>;
}

impl IntoOutcome for () {
    fn return_specs() -> Vec<TypeSpec> {
        Vec::new()
    }

    fn into_outcome(self) -> Result<Option<Value>, HandlerError> {
        Ok(None)
    }
}

impl<E: fmt::Display> IntoOutcome for Result<(), E> {
    fn return_specs() -> Vec<TypeSpec> {
        vec![TypeSpec::Error]
    }

    fn into_outcome(self) -> Result<Option<Value>, HandlerError> {
        self.map(|()| None)
            .map_err(|e| HandlerError::new(e.to_string()))
    }
}

macro_rules! impl_outcome {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> IntoOutcome for $ty {
            fn return_specs() -> Vec<TypeSpec> {
                vec![<$ty as Param>::type_spec()]
            }

            fn into_outcome(self) -> Result<Option<Value>, HandlerError> {
                Ok(Some(self.into_value()))
            }
        }

        impl<E: fmt::Display, $($generics)*> IntoOutcome for Result<$ty, E> {
            fn return_specs() -> Vec<TypeSpec> {
                vec![<$ty as Param>::type_spec(), TypeSpec::Error]
            }

            fn into_outcome(self) -> Result<Option<Value>, HandlerError> {
                self.map(|v| Some(v.into_value()))
                    .map_err(|e| HandlerError::new(e.to_string()))
            }
        }
    };
}

impl_outcome!([] String);
impl_outcome!([] bool);
impl_outcome!([] i8);
impl_outcome!([] i16);
impl_outcome!([] i32);
impl_outcome!([] i64);
impl_outcome!([] u8);
impl_outcome!([] u16);
impl_outcome!([] u32);
impl_outcome!([] u64);
impl_outcome!([] f32);
impl_outcome!([] f64);
impl_outcome!([T: Param] Vec<T>);
impl_outcome!([T: Param, const N: usize] [T; N]);
