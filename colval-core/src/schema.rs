// Column type descriptors handed to values on write

use crate::data::{Value, ValueKind};
use crate::decimal::{BYTE_WIDTH, PRECISION, SCALE};
use serde::{Deserialize, Serialize};

/// Physical storage type of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Float,
    Double,
    Binary,
    FixedLenByteArray { length: usize },
}

/// Logical annotation over a physical type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    String,
    Decimal { precision: u64, scale: i64 },
    Int { bit_width: u8, signed: bool },
}

/// Declared type of the column a value is written into
///
/// Values borrow this for the duration of a write and never inspect it: no
/// current variant has a wire form that depends on the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub name: String,
    pub physical: PhysicalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<LogicalType>,
}

impl ColumnType {
    pub fn new(name: impl Into<String>, physical: PhysicalType) -> Self {
        ColumnType {
            name: name.into(),
            physical,
            logical: None,
        }
    }

    pub fn with_logical(mut self, logical: LogicalType) -> Self {
        self.logical = Some(logical);
        self
    }

    pub fn string(name: impl Into<String>) -> Self {
        ColumnType::new(name, PhysicalType::Binary).with_logical(LogicalType::String)
    }

    /// Column holding decimals in the default fixed-width format
    pub fn decimal(name: impl Into<String>) -> Self {
        ColumnType::new(
            name,
            PhysicalType::FixedLenByteArray {
                length: BYTE_WIDTH,
            },
        )
        .with_logical(LogicalType::Decimal {
            precision: PRECISION,
            scale: SCALE,
        })
    }

    /// The column type a writer would declare for values of `kind`
    ///
    /// Returns `None` for null, which has no column type of its own.
    pub fn for_kind(name: impl Into<String>, kind: ValueKind) -> Option<Self> {
        let column = match kind {
            ValueKind::String => ColumnType::string(name),
            ValueKind::Char => ColumnType::new(name, PhysicalType::Int32),
            ValueKind::Long => ColumnType::new(name, PhysicalType::Int64),
            ValueKind::Int => ColumnType::new(name, PhysicalType::Int32),
            ValueKind::Short => ColumnType::new(name, PhysicalType::Int32).with_logical(
                LogicalType::Int {
                    bit_width: 16,
                    signed: true,
                },
            ),
            ValueKind::Byte => ColumnType::new(name, PhysicalType::Int32).with_logical(
                LogicalType::Int {
                    bit_width: 8,
                    signed: true,
                },
            ),
            ValueKind::Float => ColumnType::new(name, PhysicalType::Float),
            ValueKind::Double => ColumnType::new(name, PhysicalType::Double),
            ValueKind::Boolean => ColumnType::new(name, PhysicalType::Boolean),
            ValueKind::Binary => ColumnType::new(name, PhysicalType::Binary),
            ValueKind::Decimal => ColumnType::decimal(name),
            ValueKind::Null => return None,
        };
        Some(column)
    }

    pub fn for_value(name: impl Into<String>, value: &Value) -> Option<Self> {
        ColumnType::for_kind(name, value.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_column() {
        let column = ColumnType::decimal("price");
        assert_eq!(column.name, "price");
        assert_eq!(
            column.physical,
            PhysicalType::FixedLenByteArray { length: 16 }
        );
        assert_eq!(
            column.logical,
            Some(LogicalType::Decimal {
                precision: 38,
                scale: 18
            })
        );
    }

    #[test]
    fn test_column_for_value() {
        assert_eq!(
            ColumnType::for_value("n", &Value::Short(5)).map(|c| c.physical),
            Some(PhysicalType::Int32)
        );
        assert_eq!(
            ColumnType::for_value("s", &Value::from("text")),
            Some(ColumnType::string("s"))
        );
        assert_eq!(ColumnType::for_value("x", &Value::Null), None);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"name":"id","physical":"int64"}"#;
        let column: ColumnType = serde_json::from_str(json).unwrap();
        assert_eq!(column, ColumnType::new("id", PhysicalType::Int64));

        let decimal = serde_json::to_string(&ColumnType::decimal("d")).unwrap();
        assert_eq!(
            decimal,
            r#"{"name":"d","physical":{"fixed_len_byte_array":{"length":16}},"logical":{"decimal":{"precision":38,"scale":18}}}"#
        );
    }
}
