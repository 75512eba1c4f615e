use crate::ServoError;
use rover_base::Rect;
use rover_video::Raster;
use std::fmt;
use std::str::FromStr;

/// The pluggable image-tracking capability.
///
/// Invoked as a black box: given a frame and a box, `update` returns the
/// target's new box or None on failure. Implementations must tolerate
/// being re-initialized after a failed lock.
pub trait Tracker {
    /// Lock onto the given region. Returns false if the lock failed.
    fn init(&mut self, frame: &Raster, roi: Rect<f32>) -> bool;

    /// Advance the track by one frame. None means the target was lost.
    fn update(&mut self, frame: &Raster) -> Option<Rect<f32>>;
}

/// Which tracking backend to run, selected by configuration at session
/// start. An unknown kind is a fatal startup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    Csrt,
    Kcf,
}

impl FromStr for TrackerKind {
    type Err = ServoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CSRT" => Ok(TrackerKind::Csrt),
            "KCF" => Ok(TrackerKind::Kcf),
            other => Err(ServoError::Config(format!(
                "unknown tracker kind {other:?} (expected CSRT or KCF)"
            ))),
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerKind::Csrt => write!(f, "CSRT"),
            TrackerKind::Kcf => write!(f, "KCF"),
        }
    }
}

impl TrackerKind {
    /// Construct the backend for this kind.
    ///
    /// Both kinds currently bind to the stand-in backend; a real
    /// correlation-filter implementation slots in here.
    pub fn create(&self) -> Box<dyn Tracker + Send> {
        Box::new(HoldTracker::new())
    }
}

/// Stand-in backend that reports the locked box unchanged on every update.
///
/// Keeps the pipeline runnable without an external tracking library;
/// rejects degenerate (empty) boxes at init like a real backend would.
pub struct HoldTracker {
    roi: Option<Rect<f32>>,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self { roi: None }
    }
}

impl Default for HoldTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker for HoldTracker {
    fn init(&mut self, _frame: &Raster, roi: Rect<f32>) -> bool {
        if roi.w <= 0.0 || roi.h <= 0.0 {
            return false;
        }
        self.roi = Some(roi);
        true
    }

    fn update(&mut self, _frame: &Raster) -> Option<Rect<f32>> {
        self.roi
    }
}

// Box<dyn Tracker> is handed around by the pipeline; forward the calls.
impl Tracker for Box<dyn Tracker + Send> {
    fn init(&mut self, frame: &Raster, roi: Rect<f32>) -> bool {
        (**self).init(frame, roi)
    }

    fn update(&mut self, frame: &Raster) -> Option<Rect<f32>> {
        (**self).update(frame)
    }
}
