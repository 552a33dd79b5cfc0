//! Value layer of a columnar serialization library.
//!
//! A [`Value`] is a single scalar (or the explicit absence of one) that writes
//! itself into a [`RecordConsumer`] as exactly one primitive emission. Decimals
//! go through the fixed-width codec in [`decimal`] first.

pub mod binary;
pub mod data;
pub mod decimal;
pub mod error;
pub mod schema;
pub mod sink;
pub mod write;

pub use binary::Binary;
pub use data::{PrimitiveValue, Value, ValueKind};
pub use decimal::{DecimalFormat, MathContext, Rounding};
pub use error::{DecimalError, Result, ValueError};
pub use schema::{ColumnType, LogicalType, PhysicalType};
pub use sink::{Emission, PlainEncoder, RecordConsumer, RecordingSink};

pub use bigdecimal::BigDecimal;
