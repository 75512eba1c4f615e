use std::fmt;

#[derive(Debug)]
pub enum BusError {
    Io(std::io::Error),
    Json(serde_json::Error),
    ConnectionClosed,
    MessageTooLarge(u32),
    InvalidTopic,
    InvalidSubscribe(String),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Io(err) => write!(f, "io error: {err}"),
            BusError::Json(err) => write!(f, "json error: {err}"),
            BusError::ConnectionClosed => write!(f, "connection closed"),
            BusError::MessageTooLarge(len) => write!(f, "message part too large: {len} bytes"),
            BusError::InvalidTopic => write!(f, "topic is not valid UTF-8"),
            BusError::InvalidSubscribe(msg) => write!(f, "invalid subscribe request: {msg}"),
        }
    }
}

impl std::error::Error for BusError {}

impl From<std::io::Error> for BusError {
    fn from(err: std::io::Error) -> Self {
        BusError::Io(err)
    }
}

impl From<serde_json::Error> for BusError {
    fn from(err: serde_json::Error) -> Self {
        BusError::Json(err)
    }
}
