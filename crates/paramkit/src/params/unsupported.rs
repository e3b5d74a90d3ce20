//! Records for wire entries whose type tag this codec does not understand

/// An entry kept verbatim so it can be forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedData {
    /// Entry key
    pub key: String,

    /// Type tag as read from the wire
    pub type_tag: i32,

    /// Raw payload bytes
    pub bytes: Vec<u8>,
}

impl UnsupportedData {
    /// Create a record.
    pub fn new(key: impl Into<String>, type_tag: i32, bytes: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            type_tag,
            bytes,
        }
    }

    /// Payload length in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
