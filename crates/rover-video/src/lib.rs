//! Frame source for the rover pipeline.
//!
//! Produces timestamped, sequence-numbered JPEG frames at a target cadence
//! and publishes them on the bus under `video.raw`. Real capture backends
//! (V4L2, libcamera) plug in behind the `FrameSource` trait; the in-tree
//! `TestPattern` source keeps the pipeline runnable without hardware.

pub mod config;
pub mod error;
pub mod frame;
pub mod jpeg;
pub mod source;

pub use config::SourceConfig;
pub use error::VideoError;
pub use frame::{Encoding, Frame, Raster};
pub use jpeg::{decode_jpeg, encode_jpeg};
pub use source::{FrameSource, Paced, TestPattern};
