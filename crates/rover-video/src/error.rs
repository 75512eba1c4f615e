use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    Source(String),
    Encode(String),
    Decode(String),
    Shape { expected: usize, got: usize },
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Source(msg) => write!(f, "source error: {msg}"),
            VideoError::Encode(msg) => write!(f, "encode error: {msg}"),
            VideoError::Decode(msg) => write!(f, "decode error: {msg}"),
            VideoError::Shape { expected, got } => {
                write!(f, "shape mismatch: expected {expected} bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for VideoError {}
