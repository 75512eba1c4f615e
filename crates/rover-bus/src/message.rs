use serde::{Deserialize, Serialize};

/// Wire header shared by every topic: sequence number, capture timestamp,
/// and a message kind, plus optional per-kind metadata. Serialized as JSON
/// so any consumer can parse it without this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub seq: u64,
    pub ts_ns: u64,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,
}

impl Header {
    pub fn new(seq: u64, ts_ns: u64, kind: &str) -> Self {
        Self {
            seq,
            ts_ns,
            kind: kind.to_string(),
            width: None,
            height: None,
            encoding: None,
            dtype: None,
            shape: None,
        }
    }

    /// Set frame dimensions (video kinds).
    pub fn with_dims(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the payload encoding (e.g. "jpeg").
    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = Some(encoding.to_string());
        self
    }

    /// Set numeric payload metadata (tensor kinds).
    pub fn with_tensor(mut self, dtype: &str, shape: Vec<usize>) -> Self {
        self.dtype = Some(dtype.to_string());
        self.shape = Some(shape);
        self
    }
}

/// Delivery mode requested by a subscriber.
///
/// `Buffered` keeps up to `depth` pending messages and drops the oldest
/// when full; `Conflate` keeps only the most recently published message.
/// Either way there is one queue per subscriber connection, so a conflate
/// subscriber whose prefix matches several topics sees only the newest
/// message across all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Buffered { depth: usize },
    Conflate,
}

impl Mode {
    /// Queue depth implied by this mode, never zero.
    pub fn depth(&self) -> usize {
        match self {
            Mode::Buffered { depth } => (*depth).max(1),
            Mode::Conflate => 1,
        }
    }
}

/// First (and only) message a subscriber sends after connecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub prefix: String,
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_json_omits_absent_fields() {
        let header = Header::new(7, 123, "drive");
        let json = serde_json::to_string(&header).unwrap();
        assert!(!json.contains("width"));
        assert!(!json.contains("dtype"));

        let back: Header = serde_json::from_str(&json).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn test_header_roundtrip_with_metadata() {
        let header = Header::new(1, 2, "tensor").with_tensor("f32", vec![5]);
        let back: Header = serde_json::from_slice(&serde_json::to_vec(&header).unwrap()).unwrap();
        assert_eq!(back.dtype.as_deref(), Some("f32"));
        assert_eq!(back.shape, Some(vec![5]));
    }

    #[test]
    fn test_mode_depth() {
        assert_eq!(Mode::Conflate.depth(), 1);
        assert_eq!(Mode::Buffered { depth: 8 }.depth(), 8);
        assert_eq!(Mode::Buffered { depth: 0 }.depth(), 1);
    }
}
