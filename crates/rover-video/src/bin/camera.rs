use rover_base::now_ns;
use rover_bus::Hub;
use rover_video::{Frame, FrameSource, Paced, SourceConfig, TestPattern, encode_jpeg};
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:5555";
const ACQUIRE_BACKOFF: Duration = Duration::from_millis(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rover_base::init_stdout_logger();

    // Parse bind address from args or use default
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let config = SourceConfig::default();

    log::info!(
        "Frame source {}x{} @{}fps (JPEG q={})",
        config.width(),
        config.height(),
        config.fps(),
        config.jpeg_quality()
    );

    let hub = Hub::bind(&addr).await?;
    log::info!("Publishing video.raw on {}", hub.local_addr());

    let mut source = Paced::new(
        TestPattern::new(config.width(), config.height()),
        config.fps(),
    );

    let mut seq = 0u64;
    let mut prev_count = 0;

    loop {
        // Acquisition failures are transient: back off and retry.
        let raster = match source.recv().await {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("Frame acquisition failed: {}", e);
                tokio::time::sleep(ACQUIRE_BACKOFF).await;
                continue;
            }
        };

        let ts_ns = now_ns();
        let payload = match encode_jpeg(&raster, config.jpeg_quality()) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("JPEG encode failed, dropping frame: {}", e);
                continue;
            }
        };

        let frame = Frame::new(seq, ts_ns, raster.width, raster.height, payload);
        hub.publish("video.raw", &frame.header(), frame.data)?;
        seq += 1;

        let count = hub.subscriber_count();
        if count != prev_count {
            log::info!("Connected subscribers: {}", count);
            prev_count = count;
        }
    }
}
