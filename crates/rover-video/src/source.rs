use crate::{Raster, VideoError};
use std::time::Duration;
use tokio::time::Instant;

/// Async frame acquisition trait.
///
/// Implementations hand back decoded RGB rasters; encoding, sequencing and
/// timestamping happen at the publishing boundary. Capture backends (V4L2,
/// libcamera) implement this; `TestPattern` is the hardware-free stand-in.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next frame.
    async fn recv(&mut self) -> Result<Raster, VideoError>;
}

/// Deterministic synthetic source: a bright square sweeping horizontally
/// across a dark background. Two instances with the same dimensions produce
/// identical frame sequences.
pub struct TestPattern {
    width: u32,
    height: u32,
    tick: u64,
}

const SQUARE_SIZE: u32 = 40;
const SQUARE_STEP: u32 = 4;

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl FrameSource for TestPattern {
    async fn recv(&mut self) -> Result<Raster, VideoError> {
        let mut raster = Raster::filled(self.width, self.height, [16, 16, 24]);

        let size = SQUARE_SIZE.min(self.width / 3).min(self.height / 3).max(1);
        let span = self.width.saturating_sub(size).max(1);
        let x0 = (self.tick * SQUARE_STEP as u64 % span as u64) as u32;
        let y0 = (self.height - size) / 2;

        for y in y0..y0 + size {
            for x in x0..x0 + size {
                raster.set_pixel(x, y, [220, 200, 60]);
            }
        }

        self.tick += 1;
        Ok(raster)
    }
}

/// Frame-rate pacing wrapper.
///
/// Computes a deadline per cycle (`next += interval`) and suspends only the
/// acquisition step, never downstream processing. If acquisition falls
/// behind, the deadline is already past and the source free-runs.
pub struct Paced<S> {
    source: S,
    interval: Duration,
    next: Option<Instant>,
}

impl<S: FrameSource> Paced<S> {
    pub fn new(source: S, fps: u32) -> Self {
        Self {
            source,
            interval: Duration::from_secs(1) / fps.max(1),
            next: None,
        }
    }
}

impl<S: FrameSource> FrameSource for Paced<S> {
    async fn recv(&mut self) -> Result<Raster, VideoError> {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now);
        if deadline > now {
            tokio::time::sleep_until(deadline).await;
        }
        self.next = Some(deadline + self.interval);
        self.source.recv().await
    }
}
