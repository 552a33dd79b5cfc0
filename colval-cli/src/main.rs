use bigdecimal::BigDecimal;
use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use colval_core::decimal::{self, DecimalFormat, MathContext, Rounding};
use colval_core::{Binary, ColumnType, Emission, PlainEncoder, RecordingSink, Value};

#[derive(Parser)]
#[command(name = "colval")]
#[command(about = "Inspect how scalar values are written to columnar sinks")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a decimal into its fixed-width bytes
    EncodeDecimal {
        /// Decimal number, e.g. -12.5 or 3e4
        value: String,

        /// Decimal format file (JSON)
        #[arg(long)]
        format: Option<PathBuf>,
    },
    /// Decode fixed-width decimal bytes given as hex
    DecodeDecimal {
        /// Big-endian two's complement bytes in hex
        hex: String,

        /// Scale the bytes were written with
        #[arg(long, default_value_t = decimal::SCALE)]
        scale: i64,

        /// Significant digits to round the result to (0 for unlimited)
        #[arg(long, default_value_t = decimal::PRECISION)]
        precision: u64,
    },
    /// Write values from a JSON file through a recording sink and a PLAIN encoder
    Emit {
        /// Input file
        file: PathBuf,

        /// Decimal format file (JSON)
        #[arg(long)]
        format: Option<PathBuf>,
    },
    /// Show the default decimal format
    Info,
}

#[derive(Deserialize, Debug)]
struct EmitInput {
    column: Option<ColumnType>,
    values: Vec<JsonValue>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
enum JsonValue {
    String(String),
    Char(char),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Binary(Vec<u8>),
    Decimal(String),
    Null,
}

#[derive(Serialize, Debug)]
struct EmitOutput {
    emissions: Vec<Emission>,
    plain: String,
    errors: Vec<EmitError>,
}

#[derive(Serialize, Debug)]
struct EmitError {
    index: usize,
    error: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::EncodeDecimal { value, format } => {
            encode_decimal(value, format.as_deref())?;
        }
        Commands::DecodeDecimal {
            hex,
            scale,
            precision,
        } => {
            decode_decimal(hex, *scale, *precision)?;
        }
        Commands::Emit { file, format } => {
            emit_values(file, format.as_deref())?;
        }
        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&DecimalFormat::default())?);
        }
    }

    Ok(())
}

fn load_format(path: Option<&Path>) -> Result<DecimalFormat> {
    let format = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading decimal format {}", path.display()))?;
            serde_json::from_str(&content)
                .wrap_err_with(|| format!("parsing decimal format {}", path.display()))?
        }
        None => DecimalFormat::default(),
    };
    format.validate()?;
    tracing::debug!(?format, "using decimal format");
    Ok(format)
}

fn parse_decimal(text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text).map_err(|e| eyre!("invalid decimal {:?}: {}", text, e))
}

fn encode_decimal(value: &str, format_path: Option<&Path>) -> Result<()> {
    let format = load_format(format_path)?;
    let decimal = parse_decimal(value)?;
    let bytes = format.encode(&decimal)?;

    println!("{}", hex::encode(&bytes));
    Ok(())
}

fn decode_decimal(hex: &str, scale: i64, precision: u64) -> Result<()> {
    let bytes = from_hex(hex)?;
    let context = MathContext::new(precision, Rounding::HalfEven);
    let decimal = decimal::decode(&bytes, scale, &context);

    println!("{}", decimal);
    Ok(())
}

fn emit_values(file: &Path, format_path: Option<&Path>) -> Result<()> {
    let format = load_format(format_path)?;
    let content = fs::read_to_string(file)
        .wrap_err_with(|| format!("reading values from {}", file.display()))?;
    let input: EmitInput = serde_json::from_str(&content)
        .wrap_err_with(|| format!("parsing values from {}", file.display()))?;

    let output = emit(input, &format);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Write every input value into both sinks, collecting per-value failures
fn emit(input: EmitInput, format: &DecimalFormat) -> EmitOutput {
    let mut recording = RecordingSink::new();
    let mut plain = PlainEncoder::new();
    let mut errors = Vec::new();

    for (index, json) in input.values.into_iter().enumerate() {
        let value = match to_value(json) {
            Ok(value) => value,
            Err(e) => {
                errors.push(EmitError {
                    index,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let column = input
            .column
            .clone()
            .or_else(|| ColumnType::for_value(format!("value_{}", index), &value))
            .unwrap_or_else(|| ColumnType::new("null", colval_core::PhysicalType::Binary));

        let written = value
            .write_with(&column, &mut recording, format)
            .and_then(|()| value.write_with(&column, &mut plain, format));
        if let Err(e) = written {
            tracing::warn!(index, error = %e, "value was not written");
            errors.push(EmitError {
                index,
                error: e.to_string(),
            });
        }
    }

    EmitOutput {
        emissions: recording.into_emissions(),
        plain: hex::encode(plain.as_bytes()),
        errors,
    }
}

fn to_value(json: JsonValue) -> Result<Value> {
    let value = match json {
        JsonValue::String(s) => Value::String(s),
        JsonValue::Char(c) => Value::Char(c),
        JsonValue::Long(n) => Value::Long(n),
        JsonValue::Int(n) => Value::Int(n),
        JsonValue::Short(n) => Value::Short(n),
        JsonValue::Byte(n) => Value::Byte(n),
        JsonValue::Float(x) => Value::Float(x),
        JsonValue::Double(x) => Value::Double(x),
        JsonValue::Boolean(b) => Value::Boolean(b),
        JsonValue::Binary(bytes) => Value::Binary(Binary::from(bytes)),
        JsonValue::Decimal(text) => Value::Decimal(parse_decimal(&text)?),
        JsonValue::Null => Value::Null,
    };
    Ok(value)
}

fn from_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim().trim_start_matches("0x"))
        .wrap_err_with(|| format!("invalid hex input {:?}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_input() {
        let bytes = vec![0x00, 0x7f, 0x80, 0xff];
        assert_eq!(from_hex("007f80ff").unwrap(), bytes);
        assert_eq!(from_hex(" 007F80FF\n").unwrap(), bytes);
        assert_eq!(from_hex("0xFF").unwrap(), vec![0xff]);
        assert!(from_hex("").unwrap().is_empty());
        assert!(from_hex("abc").is_err());
        assert!(from_hex("zz").is_err());
    }

    #[test]
    fn test_json_values() {
        let input: EmitInput = serde_json::from_str(
            r#"{"values":[{"type":"short","value":5},{"type":"decimal","value":"1.5"},{"type":"null"}]}"#,
        )
        .unwrap();
        assert!(input.column.is_none());

        let values: Vec<Value> = input
            .values
            .into_iter()
            .map(|v| to_value(v).unwrap())
            .collect();
        assert_eq!(values[0], Value::Short(5));
        assert_eq!(values[1], Value::Decimal(BigDecimal::from_str("1.5").unwrap()));
        assert!(values[2].is_null());
    }

    #[test]
    fn test_emit_collects_errors_per_index() {
        let input: EmitInput = serde_json::from_str(
            r#"{"values":[
                {"type":"long","value":1},
                {"type":"null"},
                {"type":"decimal","value":"1e30"},
                {"type":"boolean","value":true},
                {"type":"decimal","value":"abc"}
            ]}"#,
        )
        .unwrap();

        let output = emit(input, &DecimalFormat::default());

        assert_eq!(
            output.emissions,
            vec![Emission::Long(1), Emission::Boolean(true)]
        );
        assert_eq!(output.plain, "010000000000000001");

        let indices: Vec<usize> = output.errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 4]);
        assert!(output.errors[0].error.contains("Unsupported operation"));
        assert!(output.errors[1].error.contains("Decimal overflow"));
        assert!(output.errors[2].error.contains("invalid decimal"));
    }

    #[test]
    fn test_emit_decimal_plain_layout() {
        let input: EmitInput = serde_json::from_str(
            r#"{"column":{"name":"price","physical":{"fixed_len_byte_array":{"length":16}}},
                "values":[{"type":"decimal","value":"-1"}]}"#,
        )
        .unwrap();

        let output = emit(input, &DecimalFormat::default());

        assert!(output.errors.is_empty());
        // u32 length prefix, then the unscaled -10^18 sign-extended to 16 bytes
        let unscaled = hex::encode((-1_000_000_000_000_000_000i64).to_be_bytes());
        assert_eq!(
            output.plain,
            format!("10000000{}{}", "ff".repeat(8), unscaled)
        );
    }
}
