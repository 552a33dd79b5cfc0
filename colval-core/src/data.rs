// Core value types for colval

use crate::binary::Binary;
use crate::decimal::{self, MathContext};
use crate::error::Result;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar headed for a column, or the deliberate absence of one.
///
/// There is no `Default`: absence is only ever the explicit `Null` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Char(char),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Binary(Binary),
    Decimal(BigDecimal),
    Null,
}

/// Payload-free name of a value variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Char,
    Long,
    Int,
    Short,
    Byte,
    Float,
    Double,
    Boolean,
    Binary,
    Decimal,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Char => "char",
            ValueKind::Long => "long",
            ValueKind::Int => "int",
            ValueKind::Short => "short",
            ValueKind::Byte => "byte",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Boolean => "boolean",
            ValueKind::Binary => "binary",
            ValueKind::Decimal => "decimal",
            ValueKind::Null => "null",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub const NULL: Value = Value::Null;

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Char(_) => ValueKind::Char,
            Value::Long(_) => ValueKind::Long,
            Value::Int(_) => ValueKind::Int,
            Value::Short(_) => ValueKind::Short,
            Value::Byte(_) => ValueKind::Byte,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Binary(_) => ValueKind::Binary,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the payload if this value holds a `T`
    pub fn get<T: PrimitiveValue>(&self) -> Option<&T> {
        T::from_value(self)
    }

    /// Decode a UTF-8 string read from a binary column
    pub fn string_from_binary(binary: &Binary) -> Result<Value> {
        let text = binary.to_utf8()?;
        Ok(Value::String(text.to_owned()))
    }

    pub fn binary_from(binary: &Binary) -> Value {
        Value::Binary(binary.clone())
    }

    /// Narrow a value read from a 32-bit column, keeping the low 16 bits
    pub fn short_from_int(int: i32) -> Value {
        Value::Short(int as i16)
    }

    /// Narrow a value read from a 32-bit column, keeping the low 8 bits
    pub fn byte_from_int(int: i32) -> Value {
        Value::Byte(int as i8)
    }

    /// Rebuild a decimal from its stored two's complement unscaled integer
    pub fn decimal_from_binary(binary: &Binary, scale: i64, context: &MathContext) -> Value {
        Value::Decimal(decimal::decode(binary.as_bytes(), scale, context))
    }
}

/// Payload types that have a dedicated `Value` variant
pub trait PrimitiveValue: Sized {
    fn from_value(value: &Value) -> Option<&Self>;
    fn into_value(self) -> Value;
}

macro_rules! primitive_value {
    ($payload:ty, $variant:ident) => {
        impl PrimitiveValue for $payload {
            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(payload) => Some(payload),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl From<$payload> for Value {
            fn from(payload: $payload) -> Self {
                Value::$variant(payload)
            }
        }
    };
}

primitive_value!(String, String);
primitive_value!(char, Char);
primitive_value!(i64, Long);
primitive_value!(i32, Int);
primitive_value!(i16, Short);
primitive_value!(i8, Byte);
primitive_value!(f32, Float);
primitive_value!(f64, Double);
primitive_value!(bool, Boolean);
primitive_value!(Binary, Binary);
primitive_value!(BigDecimal, Decimal);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_owned())
    }
}
