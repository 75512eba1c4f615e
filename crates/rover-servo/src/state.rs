use crate::control;
use rover_base::Rect;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Uninitialized,
    Tracking,
    Lost,
}

/// Tracking state for one session, owned exclusively by the processing
/// loop and threaded explicitly through each cycle.
///
/// Invariant: `roi` is Some iff `mode == Tracking`. The smoothed centroid
/// and area are only updated through `observe`, which the pipeline calls
/// only for boxes at or above the noise floor.
#[derive(Debug, Clone)]
pub struct TrackState {
    mode: TrackMode,
    roi: Option<Rect<f32>>,
    centroid_x: Option<f32>,
    area: Option<f32>,
    last_seen_ns: u64,
}

impl TrackState {
    pub fn new() -> Self {
        Self {
            mode: TrackMode::Uninitialized,
            roi: None,
            centroid_x: None,
            area: None,
            last_seen_ns: 0,
        }
    }

    pub fn mode(&self) -> TrackMode {
        self.mode
    }

    pub fn roi(&self) -> Option<Rect<f32>> {
        self.roi
    }

    pub fn centroid_x(&self) -> Option<f32> {
        self.centroid_x
    }

    pub fn area(&self) -> Option<f32> {
        self.area
    }

    /// The default initial region when none is supplied: a centered box
    /// sized to a third of the frame, capped at 80px a side.
    pub fn default_roi(width: u32, height: u32) -> Rect<f32> {
        let w = 80.0f32.min(width as f32 / 3.0);
        let h = 80.0f32.min(height as f32 / 3.0);
        Rect::new(
            width as f32 / 2.0 - w / 2.0,
            height as f32 / 2.0 - h / 2.0,
            w,
            h,
        )
    }

    /// Initial session lock. The target counts as seen now.
    pub fn lock(&mut self, roi: Rect<f32>, now_ns: u64) {
        self.mode = TrackMode::Tracking;
        self.roi = Some(roi);
        self.centroid_x = None;
        self.area = None;
        self.last_seen_ns = now_ns;
    }

    /// A fresh lock after loss. Statistics restart (EMA reseeds on the
    /// next observation) but `last_seen_ns` keeps running until the target
    /// is actually observed, so the lost-stop timeout still fires even if
    /// re-initialization keeps nominally succeeding.
    pub fn reacquire(&mut self, roi: Rect<f32>) {
        self.mode = TrackMode::Tracking;
        self.roi = Some(roi);
        self.centroid_x = None;
        self.area = None;
    }

    /// Record a valid observation and return the smoothed (centroid_x, area).
    pub fn observe(&mut self, roi: Rect<f32>, now_ns: u64) -> (f32, f32) {
        let centroid_x = control::ema(self.centroid_x, roi.center_x());
        let area = control::ema(self.area, roi.area());

        self.mode = TrackMode::Tracking;
        self.roi = Some(roi);
        self.centroid_x = Some(centroid_x);
        self.area = Some(area);
        self.last_seen_ns = now_ns;

        (centroid_x, area)
    }

    /// Tracker failure (or a box below the noise floor): drop the lock.
    pub fn mark_lost(&mut self) {
        self.mode = TrackMode::Lost;
        self.roi = None;
    }

    /// Elapsed time since the target was last observed.
    pub fn since_seen(&self, now_ns: u64) -> Duration {
        Duration::from_nanos(now_ns.saturating_sub(self.last_seen_ns))
    }
}

impl Default for TrackState {
    fn default() -> Self {
        Self::new()
    }
}
