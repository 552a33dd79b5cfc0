// Test utilities and generators for colval property-based testing

#![allow(dead_code)]

use colval_core::{BigDecimal, Binary, Value};
use num_bigint::BigInt;
use proptest::prelude::*;

/// Largest unscaled integer that fits 38 significant digits
pub const MAX_UNSCALED: i128 = 99_999_999_999_999_999_999_999_999_999_999_999_999;

/// Generate decimals already in canonical form (scale 18, at most 38 digits)
pub fn arb_canonical_decimal() -> impl Strategy<Value = BigDecimal> {
    (-MAX_UNSCALED..=MAX_UNSCALED).prop_map(|n| BigDecimal::new(BigInt::from(n), 18))
}

/// Generate decimals that fit the default format at their own scale
pub fn arb_decimal_in_range() -> impl Strategy<Value = BigDecimal> {
    prop_oneof![
        arb_canonical_decimal(),
        (any::<i64>(), 0i64..=18).prop_map(|(n, scale)| BigDecimal::new(BigInt::from(n), scale)),
        any::<i32>().prop_map(BigDecimal::from),
    ]
}

/// Generate decimals of any magnitude and scale, in range or not
pub fn arb_decimal_any() -> impl Strategy<Value = BigDecimal> {
    (any::<i128>(), -30i64..=40).prop_map(|(n, scale)| BigDecimal::new(BigInt::from(n), scale))
}

/// Generate reasonable-sized binary data
pub fn arb_binary_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..100)
}

/// Generate every non-null value kind
///
/// Floats are kept finite so emissions compare equal to themselves.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let integers = prop_oneof![
        any::<char>().prop_map(Value::Char),
        any::<i64>().prop_map(Value::Long),
        any::<i32>().prop_map(Value::Int),
        any::<i16>().prop_map(Value::Short),
        any::<i8>().prop_map(Value::Byte),
    ];
    let others = prop_oneof![
        "[a-zA-Z0-9 éü€]*".prop_map(Value::String),
        prop::num::f32::NORMAL.prop_map(Value::Float),
        prop::num::f64::NORMAL.prop_map(Value::Double),
        any::<bool>().prop_map(Value::Boolean),
        arb_binary_data().prop_map(|bytes| Value::Binary(Binary::from(bytes))),
        arb_decimal_in_range().prop_map(Value::Decimal),
    ];
    prop_oneof![integers, others]
}
