use crate::control::{self, DriveCommand, MIN_AREA};
use crate::state::{TrackMode, TrackState};
use crate::tracker::Tracker;
use crate::{ResultPublisher, ServoError, overlay};
use rover_base::{Rect, now_ns};
use rover_bus::{BusError, Subscriber};
use rover_video::{Raster, decode_jpeg};

/// The per-frame processing cycle: state machine, control law, overlay.
///
/// Owns the tracker and the session's `TrackState`; driven synchronously
/// by the session loop, one `step` per incoming frame.
pub struct Pipeline<T> {
    tracker: T,
    state: TrackState,
    roi_override: Option<Rect<f32>>,
}

impl<T: Tracker> Pipeline<T> {
    /// `roi` pins the initial region; None uses the centered default box.
    pub fn new(tracker: T, roi: Option<Rect<f32>>) -> Self {
        Self {
            tracker,
            state: TrackState::new(),
            roi_override: roi,
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    fn initial_roi(&self, raster: &Raster) -> Rect<f32> {
        self.roi_override
            .unwrap_or_else(|| TrackState::default_roi(raster.width, raster.height))
    }

    /// Run one cycle on a decoded frame: advance the state machine,
    /// compute the drive command, and annotate the raster in place.
    ///
    /// A failed initial lock is fatal to the session; every later tracker
    /// failure recovers through Lost.
    pub fn step(&mut self, raster: &mut Raster, now_ns: u64) -> Result<DriveCommand, ServoError> {
        match self.state.mode() {
            TrackMode::Uninitialized => {
                let roi = self.initial_roi(raster);
                if !self.tracker.init(raster, roi) {
                    return Err(ServoError::TrackerInit);
                }
                self.state.lock(roi, now_ns);
            }
            TrackMode::Lost => {
                // Reacquire with the same default-box heuristic. A failed
                // re-init stays Lost and retries on the next frame.
                let roi = self.initial_roi(raster);
                if self.tracker.init(raster, roi) {
                    self.state.reacquire(roi);
                }
            }
            TrackMode::Tracking => {}
        }

        if self.state.mode() != TrackMode::Tracking {
            let cmd = DriveCommand::search(self.state.since_seen(now_ns), now_ns);
            overlay::draw_status(raster, false);
            return Ok(cmd);
        }

        match self.tracker.update(raster) {
            Some(roi) if roi.area() >= MIN_AREA => {
                let (centroid_x, area) = self.state.observe(roi, now_ns);
                let cmd = control::steer(centroid_x, area, raster.width as f32 / 2.0, now_ns);

                overlay::draw_box(raster, roi, overlay::TRACK_COLOR);
                overlay::draw_centroid(raster, centroid_x, roi.center_y(), overlay::TRACK_COLOR);
                overlay::draw_status(raster, true);

                Ok(cmd)
            }
            // A box below the noise floor is treated exactly like failure:
            // a tracker locked onto visual noise must not steer the robot.
            _ => {
                self.state.mark_lost();
                let cmd = DriveCommand::search(self.state.since_seen(now_ns), now_ns);
                overlay::draw_status(raster, false);
                Ok(cmd)
            }
        }
    }
}

/// The session loop: raw frames in, three result streams out.
///
/// Runs until the frame source closes or a fatal error occurs. Per-cycle
/// failures (undecodable frame, tracker loss, slow consumers) never
/// propagate out of a cycle.
pub async fn run<T: Tracker>(
    mut pipeline: Pipeline<T>,
    mut frames: Subscriber,
    mut publisher: ResultPublisher,
) -> Result<(), ServoError> {
    loop {
        let (_topic, header, payload) = match frames.recv().await {
            Ok(message) => message,
            Err(BusError::ConnectionClosed) => {
                log::info!("Frame source closed, ending session");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let mut raster = match decode_jpeg(&payload) {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("Frame {} undecodable, skipping cycle: {}", header.seq, e);
                continue;
            }
        };

        let cmd = pipeline.step(&mut raster, now_ns())?;
        publisher.publish_cycle(&raster, &cmd, header.ts_ns)?;

        log::debug!(
            "seq={} mode={:?} L={:+.2} R={:+.2} errX={:+.2}",
            header.seq,
            pipeline.state().mode(),
            cmd.left,
            cmd.right,
            cmd.error_x
        );
    }
}
