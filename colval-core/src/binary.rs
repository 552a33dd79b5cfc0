// Raw binary handle shared by readers, values and sinks

use bstr::{BStr, BString, ByteSlice};
use std::fmt;

/// Immutable byte sequence as handed out by a columnar reader.
///
/// Equality, ordering and hashing compare the bytes, never the allocation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Binary(BString);

impl Binary {
    pub fn new(bytes: Vec<u8>) -> Self {
        Binary(BString::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn as_bstr(&self) -> &BStr {
        self.0.as_bstr()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret the bytes as UTF-8 text
    pub fn to_utf8(&self) -> Result<&str, bstr::Utf8Error> {
        self.0.to_str()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into()
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({:?})", self.0)
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary::new(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Binary::new(bytes.to_vec())
    }
}

impl From<&str> for Binary {
    fn from(text: &str) -> Self {
        Binary::new(text.as_bytes().to_vec())
    }
}

impl From<BString> for Binary {
    fn from(bytes: BString) -> Self {
        Binary(bytes)
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
