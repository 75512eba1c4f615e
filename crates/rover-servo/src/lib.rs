//! Visual servo core: consumes raw frames from the bus, runs the tracking
//! state machine and control law, and republishes annotated video, numeric
//! state, and drive commands under one sequence number per cycle.

pub mod config;
pub mod control;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod publisher;
pub mod state;
pub mod tracker;

pub use config::ServoConfig;
pub use control::DriveCommand;
pub use error::ServoError;
pub use pipeline::Pipeline;
pub use publisher::{DrivePayload, ResultPublisher};
pub use state::{TrackMode, TrackState};
pub use tracker::{HoldTracker, Tracker, TrackerKind};
