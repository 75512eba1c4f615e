use std::time::Duration;

/// Smoothing factor for the centroid/area exponential moving averages.
pub const EMA_ALPHA: f32 = 0.3;
/// Proportional gain on the horizontal image-space error.
pub const KP_TURN: f32 = 0.7;
/// Box area (px^2) at which the robot stops approaching.
pub const TARGET_AREA: f32 = 12000.0;
/// Boxes below this area are treated as tracker failure (noise floor).
pub const MIN_AREA: f32 = 60.0;
/// Lower bound of the approach speed band.
pub const FWD_MIN: f32 = 0.15;
/// Upper bound of the approach speed band.
pub const FWD_MAX: f32 = 0.7;
/// Symmetric spin used to sweep the camera while the target is lost.
pub const SEARCH_SPIN: f32 = 0.25;
/// Give up spinning this long after the target was last seen.
pub const LOST_STOP_TIMEOUT: Duration = Duration::from_secs(3);

/// Differential drive command plus the control terms it was derived from.
///
/// `left`/`right` are wheel efforts in [-1, 1]. Recomputed every cycle,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand {
    pub left: f32,
    pub right: f32,
    pub error_x: f32,
    pub forward: f32,
    pub turn: f32,
    pub ts_ns: u64,
}

impl DriveCommand {
    pub fn stop(ts_ns: u64) -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            error_x: 0.0,
            forward: 0.0,
            turn: 0.0,
            ts_ns,
        }
    }

    /// Command emitted while the target is lost: a fixed spin toward the
    /// target, zeroed once the loss has lasted past `LOST_STOP_TIMEOUT`
    /// so the robot does not spin indefinitely on total loss.
    pub fn search(since_seen: Duration, ts_ns: u64) -> Self {
        if since_seen > LOST_STOP_TIMEOUT {
            return Self::stop(ts_ns);
        }
        Self {
            left: SEARCH_SPIN,
            right: -SEARCH_SPIN,
            error_x: 0.0,
            forward: 0.0,
            turn: 0.0,
            ts_ns,
        }
    }

    /// Fixed-order numeric view published on `state.tensor`.
    pub fn as_vector(&self) -> [f32; 5] {
        [self.left, self.right, self.error_x, self.forward, self.turn]
    }
}

/// The visual-servoing control law.
///
/// Pure function of the smoothed centroid, smoothed area, and the frame
/// half-width: identical inputs always produce identical outputs.
pub fn steer(centroid_x: f32, area: f32, half_width: f32, ts_ns: u64) -> DriveCommand {
    let error_x = (centroid_x - half_width) / half_width;
    let turn = (-KP_TURN * error_x).clamp(-1.0, 1.0);

    // Forward speed proportional to how far the target still is (smaller
    // area = farther away), saturated to [FWD_MIN, FWD_MAX].
    let forward = if area >= TARGET_AREA {
        0.0
    } else {
        ((TARGET_AREA - area) / TARGET_AREA).clamp(FWD_MIN, FWD_MAX)
    };

    DriveCommand {
        left: (forward + turn).clamp(-1.0, 1.0),
        right: (forward - turn).clamp(-1.0, 1.0),
        error_x,
        forward,
        turn,
        ts_ns,
    }
}

/// One EMA step. The first observation seeds the average directly, so the
/// smoothed value is never NaN or undefined.
pub fn ema(previous: Option<f32>, observed: f32) -> f32 {
    match previous {
        None => observed,
        Some(prev) => EMA_ALPHA * observed + (1.0 - EMA_ALPHA) * prev,
    }
}
