// Fixed-width decimal codec
//
// Decimals are stored as the unscaled integer of a canonical (precision, scale)
// pair, written as big-endian two's complement and sign-extended to a fixed
// byte width. Precision and scale live in file metadata, so every value of a
// column must encode to the same width whatever its magnitude.

use crate::error::DecimalError;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Significant decimal digits kept when encoding
pub const PRECISION: u64 = 38;
/// Fractional digits every encoded decimal is forced to
pub const SCALE: i64 = 18;
/// Width of an encoded decimal in bytes
pub const BYTE_WIDTH: usize = 16;
/// Widest fixed-width decimal a format may declare (256-bit)
pub const MAX_BYTE_WIDTH: usize = 32;

/// The format every decimal value is written with unless told otherwise
pub const DEFAULT_FORMAT: DecimalFormat = DecimalFormat {
    precision: PRECISION,
    scale: SCALE,
    byte_width: BYTE_WIDTH,
    rounding: Rounding::HalfEven,
};

/// Rounding applied when digits have to be dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Away from zero
    Up,
    /// Towards zero
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    /// Banker's rounding
    HalfEven,
}

impl From<Rounding> for RoundingMode {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::Up => RoundingMode::Up,
            Rounding::Down => RoundingMode::Down,
            Rounding::Ceiling => RoundingMode::Ceiling,
            Rounding::Floor => RoundingMode::Floor,
            Rounding::HalfUp => RoundingMode::HalfUp,
            Rounding::HalfDown => RoundingMode::HalfDown,
            Rounding::HalfEven => RoundingMode::HalfEven,
        }
    }
}

/// Precision limit plus rounding mode
///
/// A precision of zero means unlimited: nothing is ever rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathContext {
    pub precision: u64,
    pub rounding: Rounding,
}

impl MathContext {
    pub fn new(precision: u64, rounding: Rounding) -> Self {
        MathContext {
            precision,
            rounding,
        }
    }

    pub fn unlimited() -> Self {
        MathContext::new(0, Rounding::HalfEven)
    }

    /// Round `decimal` to the context precision, if it carries more digits
    pub fn round(&self, decimal: &BigDecimal) -> BigDecimal {
        match NonZeroU64::new(self.precision) {
            Some(precision) if decimal.digits() > self.precision => {
                decimal.with_precision_round(precision, self.rounding.into())
            }
            _ => decimal.clone(),
        }
    }
}

impl Default for MathContext {
    fn default() -> Self {
        DEFAULT_FORMAT.math_context()
    }
}

/// Canonical (precision, scale) contract for a decimal column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalFormat {
    /// Significant digits kept before the scale is forced
    pub precision: u64,
    /// Fractional digits of the stored unscaled integer
    pub scale: i64,
    /// Encoded width in bytes
    pub byte_width: usize,
    pub rounding: Rounding,
}

impl Default for DecimalFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

impl DecimalFormat {
    /// Check that the format describes a representable column
    pub fn validate(&self) -> Result<(), DecimalError> {
        if self.precision == 0 {
            return Err(DecimalError::InvalidFormat(
                "precision must be at least 1".to_string(),
            ));
        }
        if self.byte_width == 0 || self.byte_width > MAX_BYTE_WIDTH {
            return Err(DecimalError::InvalidFormat(format!(
                "byte width {} must be between 1 and {}",
                self.byte_width, MAX_BYTE_WIDTH
            )));
        }
        if self.scale < 0 || self.scale as u64 > self.precision {
            return Err(DecimalError::InvalidFormat(format!(
                "scale {} must be between 0 and precision {}",
                self.scale, self.precision
            )));
        }
        let max_precision = max_precision_for_width(self.byte_width);
        if self.precision > max_precision {
            return Err(DecimalError::InvalidFormat(format!(
                "precision {} does not fit in {} bytes (at most {} digits)",
                self.precision, self.byte_width, max_precision
            )));
        }
        Ok(())
    }

    pub fn math_context(&self) -> MathContext {
        MathContext::new(self.precision, self.rounding)
    }

    /// Reduce to the format precision, then force the format scale
    pub fn rescale(&self, decimal: &BigDecimal) -> BigDecimal {
        let rounded = self.math_context().round(decimal);
        let rescaled = rounded.with_scale_round(self.scale, self.rounding.into());
        tracing::trace!(%decimal, %rescaled, "rescaled decimal");
        rescaled
    }

    /// Encode `decimal` as `byte_width` bytes of sign-extended two's complement
    pub fn encode(&self, decimal: &BigDecimal) -> Result<Vec<u8>, DecimalError> {
        self.validate()?;
        if decimal.sign() == Sign::NoSign {
            return Ok(vec![0u8; self.byte_width]);
        }
        self.check_magnitude(decimal)?;

        let rescaled = self.rescale(decimal);
        let (unscaled, _) = rescaled.as_bigint_and_exponent();
        let minimal = unscaled.to_signed_bytes_be();

        if minimal.len() > self.byte_width {
            tracing::debug!(
                %decimal,
                required = minimal.len(),
                width = self.byte_width,
                "decimal does not fit fixed width"
            );
            return Err(DecimalError::Overflow {
                value: decimal.to_string(),
                width: self.byte_width,
                required: minimal.len(),
            });
        }

        let negative = minimal.first().map_or(false, |b| b & 0x80 != 0);
        let padding = if negative { 0xFF } else { 0x00 };

        let mut bytes = vec![padding; self.byte_width - minimal.len()];
        bytes.extend_from_slice(&minimal);
        Ok(bytes)
    }

    /// Reject decimals whose integer part alone cannot fit, before any rescaling.
    ///
    /// A value with `n` integer digits has an unscaled integer of at least
    /// `10^(n - 1 + scale)`, and rounding never lowers that bound.
    fn check_magnitude(&self, decimal: &BigDecimal) -> Result<(), DecimalError> {
        let (unscaled, exponent) = decimal.as_bigint_and_exponent();
        let integer_digits = (decimal.digits() as i64).saturating_sub(exponent);
        let unscaled_digits = integer_digits.saturating_add(self.scale);
        let max_digits = max_precision_for_width(self.byte_width) as i64 + 1;

        if unscaled_digits > max_digits {
            let bits = (unscaled_digits - 1) as f64 * std::f64::consts::LOG2_10 + 1.0;
            let required = ((bits / 8.0).ceil() as usize).max(self.byte_width + 1);
            tracing::debug!(
                integer_digits,
                required,
                width = self.byte_width,
                "decimal integer part does not fit fixed width"
            );
            return Err(DecimalError::Overflow {
                value: format!("{}e{}", unscaled, exponent.saturating_neg()),
                width: self.byte_width,
                required,
            });
        }
        Ok(())
    }

    /// Decode bytes written with this format
    pub fn decode(&self, bytes: &[u8]) -> BigDecimal {
        decode(bytes, self.scale, &self.math_context())
    }
}

/// Encode with the default 38/18/16 format
pub fn encode(decimal: &BigDecimal) -> Result<Vec<u8>, DecimalError> {
    DEFAULT_FORMAT.encode(decimal)
}

/// Interpret `bytes` as a big-endian two's complement unscaled integer at `scale`
pub fn decode(bytes: &[u8], scale: i64, context: &MathContext) -> BigDecimal {
    let unscaled = BigInt::from_signed_bytes_be(bytes);
    context.round(&BigDecimal::new(unscaled, scale))
}

/// Most decimal digits that always fit in `width` bytes of two's complement
///
/// Widths above [`MAX_BYTE_WIDTH`] are not representable and give 0.
pub fn max_precision_for_width(width: usize) -> u64 {
    if width == 0 || width > MAX_BYTE_WIDTH {
        return 0;
    }
    let largest = (BigInt::from(1u8) << (8 * width - 1)) - BigInt::from(1u8);
    largest.to_string().len() as u64 - 1
}
