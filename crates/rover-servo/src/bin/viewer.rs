use rover_base::now_ns;
use rover_bus::{BusError, Mode, Subscriber};
use rover_servo::publisher::TOPIC_VIDEO_ANNOTATED;
use rover_video::decode_jpeg;
use std::time::{Duration, Instant};

const DEFAULT_ADDR: &str = "127.0.0.1:5556";
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Headless monitor for the annotated stream: decodes each frame and
/// reports FPS and capture-to-display latency about once a second.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rover_base::init_stdout_logger();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    // Conflate: a viewer only ever wants the latest frame.
    let mut sub = Subscriber::connect(&addr, TOPIC_VIDEO_ANNOTATED, Mode::Conflate).await?;
    log::info!("Viewing {} from {}", TOPIC_VIDEO_ANNOTATED, addr);

    let mut frames = 0u32;
    let mut last_report = Instant::now();

    loop {
        let (_topic, header, payload) = match sub.recv().await {
            Ok(message) => message,
            Err(BusError::ConnectionClosed) => {
                log::info!("Hub closed, exiting");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let raster = match decode_jpeg(&payload) {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("Frame {} undecodable: {}", header.seq, e);
                continue;
            }
        };

        frames += 1;
        let elapsed = last_report.elapsed();
        if elapsed >= REPORT_INTERVAL {
            let latency_ms = now_ns().saturating_sub(header.ts_ns) as f64 / 1e6;
            log::info!(
                "seq={} {}x{} {:.1} fps, latency {:.1} ms",
                header.seq,
                raster.width,
                raster.height,
                frames as f64 / elapsed.as_secs_f64(),
                latency_ms
            );
            frames = 0;
            last_report = Instant::now();
        }
    }
}
