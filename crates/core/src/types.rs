//! Declared shapes of handler parameters and return values
//!
//! This module defines:
//! - ScalarType: the closed set of primitive wire types
//! - TypeSpec: a declared parameter or return type (scalar, nested
//!   slice/array, or one of the special kinds: context, error, any)
//! - Signature: the ordered parameter and return lists of one handler
//!
//! A `Signature` is what the signature validator inspects at registration
//! time. Typed handlers derive it from their Rust types; raw handlers
//! declare it by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive types a handler parameter or return value may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
    /// Single precision float
    Float32,
    /// Double precision float
    Float64,
}

impl ScalarType {
    /// Get the type name as used in error messages and metadata formats
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint8 => "uint8",
            ScalarType::Uint16 => "uint16",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
        }
    }

    /// Check if this is a signed integer type
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            ScalarType::Int8 | ScalarType::Int16 | ScalarType::Int32 | ScalarType::Int64
        )
    }

    /// Check if this is an unsigned integer type
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            ScalarType::Uint8 | ScalarType::Uint16 | ScalarType::Uint32 | ScalarType::Uint64
        )
    }

    /// Check if this is an integer type of either signedness
    pub fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Check if this is a floating point type
    pub fn is_float(&self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared parameter or return type.
///
/// Value types are `Scalar`, `Slice` and `Array` (nested to any depth with a
/// scalar leaf). The remaining variants describe the special kinds a
/// signature may mention:
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Context` | the transaction context parameter |
/// | `Error` | the error-kind return value |
/// | `Any` | an after-hook parameter receiving the main function's result |
/// | `Unsupported` | any other type; always rejected by the validator |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSpec {
    /// A primitive value
    Scalar(ScalarType),
    /// A variable-length sequence
    Slice(Box<TypeSpec>),
    /// A fixed-length sequence
    Array(Box<TypeSpec>, usize),
    /// The transaction context
    Context,
    /// The error-kind return
    Error,
    /// Whatever the main function returned
    Any,
    /// A type outside the supported set, by name
    Unsupported(String),
}

impl TypeSpec {
    /// Shorthand for a scalar string
    pub const STRING: TypeSpec = TypeSpec::Scalar(ScalarType::String);

    /// Build a slice of the given element type
    pub fn slice(element: TypeSpec) -> Self {
        TypeSpec::Slice(Box::new(element))
    }

    /// Build a fixed-length array of the given element type
    pub fn array(element: TypeSpec, len: usize) -> Self {
        TypeSpec::Array(Box::new(element), len)
    }

    /// Check whether this type can be converted to and from the wire.
    ///
    /// True for scalars and for slices/arrays whose leaf is a scalar.
    pub fn is_value_type(&self) -> bool {
        match self {
            TypeSpec::Scalar(_) => true,
            TypeSpec::Slice(inner) | TypeSpec::Array(inner, _) => inner.is_value_type(),
            _ => false,
        }
    }

    /// Check if this is a slice or array
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeSpec::Slice(_) | TypeSpec::Array(..))
    }

    /// The scalar at the bottom of a (possibly nested) sequence
    pub fn leaf(&self) -> Option<ScalarType> {
        match self {
            TypeSpec::Scalar(s) => Some(*s),
            TypeSpec::Slice(inner) | TypeSpec::Array(inner, _) => inner.leaf(),
            _ => None,
        }
    }
}

impl From<ScalarType> for TypeSpec {
    fn from(s: ScalarType) -> Self {
        TypeSpec::Scalar(s)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Scalar(s) => write!(f, "{}", s),
            TypeSpec::Slice(inner) => write!(f, "[]{}", inner),
            TypeSpec::Array(inner, len) => write!(f, "[{}]{}", len, inner),
            TypeSpec::Context => f.write_str("context"),
            TypeSpec::Error => f.write_str("error"),
            TypeSpec::Any => f.write_str("any"),
            TypeSpec::Unsupported(name) => f.write_str(name),
        }
    }
}

/// The declared parameter and return lists of a handler or hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Parameters in declaration order, including a context parameter if any
    pub params: Vec<TypeSpec>,
    /// Return values in declaration order
    pub returns: Vec<TypeSpec>,
}

impl Signature {
    /// Create a signature from parameter and return lists
    pub fn new(params: Vec<TypeSpec>, returns: Vec<TypeSpec>) -> Self {
        Self { params, returns }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: &[TypeSpec]| {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "({})", join(&self.params))?;
        match self.returns.len() {
            0 => Ok(()),
            1 => write!(f, " {}", self.returns[0]),
            _ => write!(f, " ({})", join(&self.returns)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCALARS: [ScalarType; 12] = [
        ScalarType::String,
        ScalarType::Bool,
        ScalarType::Int8,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Uint8,
        ScalarType::Uint16,
        ScalarType::Uint32,
        ScalarType::Uint64,
        ScalarType::Float32,
        ScalarType::Float64,
    ];

    #[test]
    fn test_scalar_names() {
        assert_eq!(ScalarType::String.name(), "string");
        assert_eq!(ScalarType::Uint16.to_string(), "uint16");
        assert_eq!(ScalarType::Float64.to_string(), "float64");
    }

    #[test]
    fn test_scalar_classification() {
        for scalar in ALL_SCALARS {
            let kinds = [
                scalar == ScalarType::String,
                scalar == ScalarType::Bool,
                scalar.is_integer(),
                scalar.is_float(),
            ];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{}", scalar);
        }
        assert!(ScalarType::Int8.is_signed());
        assert!(!ScalarType::Int8.is_unsigned());
        assert!(ScalarType::Uint64.is_unsigned());
    }

    #[test]
    fn test_type_spec_display() {
        let nested = TypeSpec::slice(TypeSpec::array(ScalarType::Int32.into(), 3));
        assert_eq!(nested.to_string(), "[][3]int32");
        assert_eq!(TypeSpec::Context.to_string(), "context");
        assert_eq!(TypeSpec::Unsupported("map".into()).to_string(), "map");
    }

    #[test]
    fn test_value_type_detection() {
        assert!(TypeSpec::STRING.is_value_type());
        assert!(TypeSpec::slice(TypeSpec::slice(TypeSpec::STRING)).is_value_type());
        assert!(!TypeSpec::Context.is_value_type());
        assert!(!TypeSpec::Error.is_value_type());
        assert!(!TypeSpec::slice(TypeSpec::Any).is_value_type());
        assert!(!TypeSpec::array(TypeSpec::Unsupported("chan".into()), 2).is_value_type());
    }

    #[test]
    fn test_leaf_and_sequence() {
        let spec = TypeSpec::slice(TypeSpec::array(ScalarType::Bool.into(), 2));
        assert_eq!(spec.leaf(), Some(ScalarType::Bool));
        assert!(spec.is_sequence());
        assert!(!TypeSpec::STRING.is_sequence());
        assert_eq!(TypeSpec::Context.leaf(), None);
    }

    #[test]
    fn test_signature_display() {
        let sig = Signature::new(
            vec![TypeSpec::Context, TypeSpec::STRING],
            vec![TypeSpec::slice(TypeSpec::STRING), TypeSpec::Error],
        );
        assert_eq!(sig.to_string(), "(context, string) ([]string, error)");
        assert_eq!(Signature::default().to_string(), "()");
    }
}
