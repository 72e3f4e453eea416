//! Wire string ↔ typed value conversion.
//!
//! Input: each raw string argument is converted against its declared
//! [`TypeSpec`]. Scalars are parsed directly; slices and arrays are parsed
//! as JSON of the target shape with every leaf checked against the leaf
//! scalar.
//!
//! Output: strings pass through verbatim, other scalars use `Display`,
//! sequences are serialized as JSON. `Float32` values are rendered at
//! single precision in both forms. `Display` never switches to exponent
//! notation, so `1e21` renders as `1000000000000000000000`. JSON has no
//! encoding for NaN or infinity; a sequence holding one is rejected.
//!
//! All functions here are pure.

use serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};

use contractapi_core::{ConversionError, InvocationError, ScalarType, TypeSpec, Value};

/// Convert a full raw argument list against the declared parameter types.
///
/// # Errors
///
/// Fails with `ArgumentCount` before converting anything if the lengths
/// differ, then with the first `ConversionError` in parameter order.
pub fn parse_arguments(specs: &[TypeSpec], raw: &[String]) -> Result<Vec<Value>, InvocationError> {
    if specs.len() != raw.len() {
        return Err(InvocationError::ArgumentCount {
            expected: specs.len(),
            received: raw.len(),
        });
    }

    specs
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(index, (spec, arg))| parse_argument(spec, arg, index).map_err(Into::into))
        .collect()
}

/// Convert one raw argument.
///
/// `index` is the zero-based parameter position (context not counted) and
/// is reported in the error.
pub fn parse_argument(spec: &TypeSpec, raw: &str, index: usize) -> Result<Value, ConversionError> {
    let fail = |reason: String| ConversionError::new(index, spec.to_string(), raw, reason);

    match spec {
        TypeSpec::Scalar(scalar) => parse_scalar(*scalar, raw).map_err(fail),
        sequence if sequence.is_sequence() => {
            let json: serde_json::Value =
                serde_json::from_str(raw).map_err(|e| fail(format!("invalid JSON: {}", e)))?;
            from_json(spec, json, &mut String::new()).map_err(fail)
        }
        other => Err(fail(format!("{} is not a convertible type", other))),
    }
}

fn parse_scalar(scalar: ScalarType, raw: &str) -> Result<Value, String> {
    macro_rules! signed {
        ($ty:ty) => {
            raw.parse::<$ty>()
                .map(|v| Value::Int(i64::from(v)))
                .map_err(|e| e.to_string())
        };
    }
    macro_rules! unsigned {
        ($ty:ty) => {
            raw.parse::<$ty>()
                .map(|v| Value::Uint(u64::from(v)))
                .map_err(|e| e.to_string())
        };
    }

    match scalar {
        ScalarType::String => Ok(Value::String(raw.to_string())),
        ScalarType::Bool => parse_bool(raw).map(Value::Bool),
        ScalarType::Int8 => signed!(i8),
        ScalarType::Int16 => signed!(i16),
        ScalarType::Int32 => signed!(i32),
        ScalarType::Int64 => signed!(i64),
        ScalarType::Uint8 => unsigned!(u8),
        ScalarType::Uint16 => unsigned!(u16),
        ScalarType::Uint32 => unsigned!(u32),
        ScalarType::Uint64 => unsigned!(u64),
        ScalarType::Float32 => {
            let v = raw.parse::<f32>().map_err(|e| e.to_string())?;
            check_float_range(v.is_infinite(), raw, scalar)?;
            Ok(Value::Float(f64::from(v)))
        }
        ScalarType::Float64 => {
            let v = raw.parse::<f64>().map_err(|e| e.to_string())?;
            check_float_range(v.is_infinite(), raw, scalar)?;
            Ok(Value::Float(v))
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err("invalid boolean literal".to_string()),
    }
}

// A finite literal that rounds to infinity overflowed the target width.
fn check_float_range(infinite: bool, raw: &str, scalar: ScalarType) -> Result<(), String> {
    let literal = raw.trim_start_matches(|c| c == '+' || c == '-').to_ascii_lowercase();
    if infinite && literal != "inf" && literal != "infinity" {
        return Err(format!("value out of range for {}", scalar));
    }
    Ok(())
}

fn from_json(spec: &TypeSpec, json: serde_json::Value, path: &mut String) -> Result<Value, String> {
    let at = |path: &str| {
        if path.is_empty() {
            String::new()
        } else {
            format!(" at element {}", path)
        }
    };

    match spec {
        TypeSpec::Slice(inner) | TypeSpec::Array(inner, _) => {
            let items = match json {
                serde_json::Value::Array(items) => items,
                other => {
                    return Err(format!(
                        "expected JSON array{}, found {}",
                        at(path.as_str()),
                        json_kind(&other)
                    ))
                }
            };
            if let TypeSpec::Array(_, len) = spec {
                if items.len() != *len {
                    return Err(format!(
                        "expected {} elements{}, found {}",
                        len,
                        at(path.as_str()),
                        items.len()
                    ));
                }
            }

            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let depth = path.len();
                path.push_str(&format!("[{}]", i));
                values.push(from_json(inner, item, path)?);
                path.truncate(depth);
            }
            Ok(Value::List(values))
        }
        TypeSpec::Scalar(scalar) => {
            json_leaf(*scalar, &json).ok_or_else(|| {
                format!(
                    "expected {}{}, found {}",
                    scalar,
                    at(path.as_str()),
                    json_kind(&json)
                )
            })
        }
        other => Err(format!("{} is not a convertible type", other)),
    }
}

fn json_leaf(scalar: ScalarType, json: &serde_json::Value) -> Option<Value> {
    macro_rules! signed {
        ($ty:ty) => {
            json.as_i64()
                .and_then(|v| <$ty>::try_from(v).ok())
                .map(|v| Value::Int(i64::from(v)))
        };
    }
    macro_rules! unsigned {
        ($ty:ty) => {
            json.as_u64()
                .and_then(|v| <$ty>::try_from(v).ok())
                .map(|v| Value::Uint(u64::from(v)))
        };
    }

    match scalar {
        ScalarType::String => json.as_str().map(|s| Value::String(s.to_string())),
        ScalarType::Bool => json.as_bool().map(Value::Bool),
        ScalarType::Int8 => signed!(i8),
        ScalarType::Int16 => signed!(i16),
        ScalarType::Int32 => signed!(i32),
        ScalarType::Int64 => signed!(i64),
        ScalarType::Uint8 => unsigned!(u8),
        ScalarType::Uint16 => unsigned!(u16),
        ScalarType::Uint32 => unsigned!(u32),
        ScalarType::Uint64 => unsigned!(u64),
        ScalarType::Float32 => json
            .as_f64()
            .filter(|f| (*f as f32).is_finite())
            .map(|f| Value::Float(f64::from(f as f32))),
        ScalarType::Float64 => json.as_f64().map(Value::Float),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_f64() => "number",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert a success value to its wire payload.
///
/// # Errors
///
/// Fails with `InvocationError::Response` if JSON serialization fails,
/// including a sequence with a non-finite float leaf.
pub fn format_payload(value: &Value, spec: &TypeSpec) -> Result<String, InvocationError> {
    let single = spec.leaf() == Some(ScalarType::Float32);
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Uint(u) => Ok(u.to_string()),
        Value::Float(f) if single => Ok((*f as f32).to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::List(_) => serde_json::to_string(&TypedValue { value, spec }).map_err(|e| {
            InvocationError::Response {
                reason: e.to_string(),
            }
        }),
    }
}

/// Serializes a value with its declared type so `Float32` leaves are
/// written at single precision.
struct TypedValue<'a> {
    value: &'a Value,
    spec: &'a TypeSpec,
}

impl Serialize for TypedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let single = self.spec.leaf() == Some(ScalarType::Float32);
        match self.value {
            Value::Float(f) if !f.is_finite() || (single && !(*f as f32).is_finite()) => Err(
                S::Error::custom(format!("{} cannot be encoded as a JSON number", f)),
            ),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) if single => serializer.serialize_f32(*f as f32),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::List(items) => {
                let element = match self.spec {
                    TypeSpec::Slice(inner) | TypeSpec::Array(inner, _) => inner.as_ref(),
                    other => other,
                };
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&TypedValue {
                        value: item,
                        spec: element,
                    })?;
                }
                seq.end()
            }
        }
    }
}
