// Error handling tests for colval

use colval_core::decimal::Rounding;
use colval_core::{
    BigDecimal, Binary, ColumnType, DecimalError, DecimalFormat, PlainEncoder, RecordingSink,
    Value, ValueError, ValueKind,
};
use std::error::Error;
use std::str::FromStr;

#[test]
fn test_null_write_is_unsupported() {
    let mut sink = RecordingSink::new();
    let error = Value::Null
        .write(&ColumnType::string("s"), &mut sink)
        .unwrap_err();

    match error {
        ValueError::UnsupportedOperation { kind } => assert_eq!(kind, ValueKind::Null),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(sink.is_empty());
}

#[test]
fn test_overflow_surfaces_through_value_error() {
    let mut sink = PlainEncoder::new();
    let value = Value::Decimal(BigDecimal::from_str("-9e25").unwrap());
    let error = value
        .write(&ColumnType::decimal("d"), &mut sink)
        .unwrap_err();

    assert!(error.to_string().contains("Decimal overflow"));
    assert!(error.source().is_some());
    assert!(sink.as_bytes().is_empty());
}

#[test]
fn test_malformed_utf8_is_propagated() {
    let raw = Binary::from(vec![b'o', b'k', 0xFF]);
    let error = Value::string_from_binary(&raw).unwrap_err();

    assert!(matches!(error, ValueError::MalformedUtf8(_)));
    assert!(error.to_string().starts_with("Malformed input"));
}

#[test]
fn test_invalid_format_is_rejected_before_writing() {
    let format = DecimalFormat {
        precision: 20,
        scale: 2,
        byte_width: 8,
        rounding: Rounding::HalfEven,
    };
    let mut sink = RecordingSink::new();
    let error = Value::Decimal(BigDecimal::from(1))
        .write_with(&ColumnType::decimal("d"), &mut sink, &format)
        .unwrap_err();

    assert!(matches!(
        error,
        ValueError::Decimal(DecimalError::InvalidFormat(_))
    ));
    assert!(sink.is_empty());
}
