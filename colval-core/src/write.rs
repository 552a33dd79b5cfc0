// Value dispatch - every value writes itself as one primitive emission

use crate::binary::Binary;
use crate::data::Value;
use crate::decimal::{DecimalFormat, DEFAULT_FORMAT};
use crate::error::{Result, ValueError};
use crate::schema::ColumnType;
use crate::sink::RecordConsumer;

impl Value {
    /// Write this value into `sink` using the default decimal format.
    ///
    /// Exactly one append is issued for every non-null value. `Null` fails with
    /// [`ValueError::UnsupportedOperation`] and leaves the sink untouched.
    pub fn write<C>(&self, schema: &ColumnType, sink: &mut C) -> Result<()>
    where
        C: RecordConsumer + ?Sized,
    {
        self.write_with(schema, sink, &DEFAULT_FORMAT)
    }

    /// Write this value, encoding decimals with `format`
    pub fn write_with<C>(
        &self,
        schema: &ColumnType,
        sink: &mut C,
        format: &DecimalFormat,
    ) -> Result<()>
    where
        C: RecordConsumer + ?Sized,
    {
        tracing::trace!(kind = %self.kind(), column = %schema.name, "writing value");

        match self {
            Value::String(text) => sink.add_binary(&Binary::from(text.as_str())),
            Value::Char(c) => sink.add_integer(*c as u32 as i32),
            Value::Long(n) => sink.add_long(*n),
            Value::Int(n) => sink.add_integer(*n),
            Value::Short(n) => sink.add_integer(i32::from(*n)),
            Value::Byte(n) => sink.add_integer(i32::from(*n)),
            Value::Float(x) => sink.add_float(*x),
            Value::Double(x) => sink.add_double(*x),
            Value::Boolean(b) => sink.add_boolean(*b),
            Value::Binary(bytes) => sink.add_binary(bytes),
            Value::Decimal(decimal) => {
                // Encode first so an overflow emits nothing
                let bytes = format.encode(decimal)?;
                sink.add_binary(&Binary::from(bytes));
            }
            Value::Null => {
                tracing::debug!(column = %schema.name, "rejected write of null value");
                return Err(ValueError::UnsupportedOperation {
                    kind: self.kind(),
                });
            }
        }
        Ok(())
    }
}
