use rover_bus::BusError;
use rover_video::VideoError;
use std::fmt;

#[derive(Debug)]
pub enum ServoError {
    Bus(BusError),
    Video(VideoError),
    Config(String),
    TrackerInit,
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::Bus(err) => write!(f, "bus error: {err}"),
            ServoError::Video(err) => write!(f, "video error: {err}"),
            ServoError::Config(msg) => write!(f, "configuration error: {msg}"),
            ServoError::TrackerInit => write!(f, "tracker failed to lock the initial region"),
        }
    }
}

impl std::error::Error for ServoError {}

impl From<BusError> for ServoError {
    fn from(err: BusError) -> Self {
        ServoError::Bus(err)
    }
}

impl From<VideoError> for ServoError {
    fn from(err: VideoError) -> Self {
        ServoError::Video(err)
    }
}

impl From<serde_json::Error> for ServoError {
    fn from(err: serde_json::Error) -> Self {
        ServoError::Bus(BusError::Json(err))
    }
}
