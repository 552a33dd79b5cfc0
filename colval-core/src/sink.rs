// Record sinks - where values emit their primitive data

use crate::binary::Binary;
use serde::{Deserialize, Serialize};

/// Append-only consumer of primitive column data.
///
/// Every `Value::write` issues exactly one of these calls.
pub trait RecordConsumer {
    fn add_boolean(&mut self, value: bool);
    fn add_integer(&mut self, value: i32);
    fn add_long(&mut self, value: i64);
    fn add_float(&mut self, value: f32);
    fn add_double(&mut self, value: f64);
    fn add_binary(&mut self, value: &Binary);
}

/// One primitive append, as seen by a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Emission {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Binary(Vec<u8>),
}

/// Sink that keeps every emission in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    emissions: Vec<Emission>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    pub fn into_emissions(self) -> Vec<Emission> {
        self.emissions
    }

    pub fn len(&self) -> usize {
        self.emissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }
}

impl RecordConsumer for RecordingSink {
    fn add_boolean(&mut self, value: bool) {
        self.emissions.push(Emission::Boolean(value));
    }

    fn add_integer(&mut self, value: i32) {
        self.emissions.push(Emission::Integer(value));
    }

    fn add_long(&mut self, value: i64) {
        self.emissions.push(Emission::Long(value));
    }

    fn add_float(&mut self, value: f32) {
        self.emissions.push(Emission::Float(value));
    }

    fn add_double(&mut self, value: f64) {
        self.emissions.push(Emission::Double(value));
    }

    fn add_binary(&mut self, value: &Binary) {
        self.emissions.push(Emission::Binary(value.as_bytes().to_vec()));
    }
}

/// Sink that lays emissions out in the PLAIN column layout
///
/// Layout:
/// ```text
/// boolean  1 byte (0 or 1)
/// int32    4 bytes little-endian
/// int64    8 bytes little-endian
/// float    4 bytes little-endian IEEE 754
/// double   8 bytes little-endian IEEE 754
/// binary   [length: 4 bytes little-endian u32] [bytes]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainEncoder {
    buffer: Vec<u8>,
    count: usize,
}

impl PlainEncoder {
    pub fn new() -> Self {
        PlainEncoder::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of values appended so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl RecordConsumer for PlainEncoder {
    fn add_boolean(&mut self, value: bool) {
        self.buffer.push(value as u8);
        self.count += 1;
    }

    fn add_integer(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self.count += 1;
    }

    fn add_long(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self.count += 1;
    }

    fn add_float(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self.count += 1;
    }

    fn add_double(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self.count += 1;
    }

    fn add_binary(&mut self, value: &Binary) {
        // Sized byte array; values never approach 4 GiB
        self.buffer
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.buffer.extend_from_slice(value.as_bytes());
        self.count += 1;
    }
}
