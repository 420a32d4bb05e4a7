use crate::error::{Error, Result};
use crate::xor;

/// Owned bytes with hex and base64 conversions, for getting ciphertext in
/// and results out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteArray {
    bytes: Vec<u8>,
}

impl ByteArray {
    pub fn from_bytes(bytes: Vec<u8>) -> ByteArray {
        ByteArray { bytes }
    }

    pub fn from_hex(hex: &str) -> Option<ByteArray> {
        let hex = hex.trim();
        if hex.len() % 2 != 0 {
            return None;
        }

        let digits: Option<Vec<u8>> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect();

        let bytes = digits?
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair[1])
            .collect();

        Some(ByteArray::from_bytes(bytes))
    }

    /// Decodes base64, ignoring any whitespace such as line breaks.
    pub fn from_base64(encoded: &str) -> Result<ByteArray> {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        Ok(ByteArray::from_bytes(base64::decode(&compact)?))
    }

    pub fn from_string(s: &str) -> ByteArray {
        ByteArray::from_bytes(s.as_bytes().to_vec())
    }

    /// Like [`ByteArray::from_hex`] but with an error for callers that
    /// propagate one.
    pub fn parse_hex(hex: &str) -> Result<ByteArray> {
        ByteArray::from_hex(hex).ok_or_else(|| Error::Hex(hex.trim().to_owned()))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Bytes as text; invalid UTF-8 is replaced.
    pub fn string(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn base64(&self) -> String {
        base64::encode(&self.bytes)
    }

    pub fn xor(&self, other: &ByteArray) -> ByteArray {
        ByteArray::from_bytes(xor::xor(&self.bytes, &other.bytes))
    }
}
