use crate::{DriveCommand, ServoError};
use rover_bus::{Header, Hub};
use rover_video::{Frame, Raster, encode_jpeg};
use serde::{Deserialize, Serialize};

pub const TOPIC_VIDEO_ANNOTATED: &str = "video.annotated";
pub const TOPIC_STATE_TENSOR: &str = "state.tensor";
pub const TOPIC_DRIVE_CMD: &str = "drive.cmd";

/// JSON payload on `drive.cmd`, for consumers that only need actuation
/// and should not parse video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivePayload {
    pub left: f32,
    pub right: f32,
    pub ts_ns: u64,
}

/// Publishes the three result streams for each processed frame.
///
/// All three messages of a cycle share one sequence number and the input
/// frame's capture timestamp, so consumers can correlate them. Isolation
/// between slow consumers and topics is the hub's job.
pub struct ResultPublisher {
    hub: Hub,
    jpeg_quality: u8,
    seq: u64,
}

impl ResultPublisher {
    pub fn new(hub: Hub, jpeg_quality: u8) -> Self {
        Self {
            hub,
            jpeg_quality,
            seq: 0,
        }
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Publish one cycle's results: annotated video, state vector, drive
    /// command. An encode failure skips only the video topic; the state
    /// and command topics still publish that cycle.
    pub fn publish_cycle(
        &mut self,
        annotated: &Raster,
        cmd: &DriveCommand,
        capture_ts_ns: u64,
    ) -> Result<(), ServoError> {
        let seq = self.seq;

        match encode_jpeg(annotated, self.jpeg_quality) {
            Ok(jpeg) => {
                let frame = Frame::new(seq, capture_ts_ns, annotated.width, annotated.height, jpeg);
                self.hub
                    .publish(TOPIC_VIDEO_ANNOTATED, &frame.header(), frame.data)?;
            }
            Err(e) => {
                log::warn!("Annotated frame {} encode failed, skipping video topic: {}", seq, e);
            }
        }

        let vector = cmd.as_vector();
        let mut payload = Vec::with_capacity(vector.len() * 4);
        for value in vector {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        let header = Header::new(seq, capture_ts_ns, "tensor").with_tensor("f32", vec![vector.len()]);
        self.hub.publish(TOPIC_STATE_TENSOR, &header, payload)?;

        let payload = serde_json::to_vec(&DrivePayload {
            left: cmd.left,
            right: cmd.right,
            ts_ns: cmd.ts_ns,
        })?;
        let header = Header::new(seq, capture_ts_ns, "drive");
        self.hub.publish(TOPIC_DRIVE_CMD, &header, payload)?;

        self.seq += 1;
        Ok(())
    }
}
