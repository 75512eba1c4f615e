use rover_bus::{Mode, Subscriber};
use rover_servo::config::parse_roi;
use rover_servo::{Pipeline, ResultPublisher, ServoConfig, TrackerKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rover_base::init_stdout_logger();

    // servo [FRAMES_ADDR] [PUBLISH_ADDR] [TRACKER] [ROI x,y,w,h]
    let mut args = std::env::args().skip(1);
    let mut config = ServoConfig::default();

    if let Some(addr) = args.next() {
        config = config.with_frames_addr(addr);
    }
    if let Some(addr) = args.next() {
        config = config.with_publish_addr(addr);
    }
    if let Some(kind) = args.next() {
        match kind.parse::<TrackerKind>() {
            Ok(kind) => config = config.with_tracker_kind(kind),
            Err(e) => rover_base::log_fatal!("{}", e),
        }
    }
    if let Some(roi) = args.next() {
        match parse_roi(&roi) {
            Ok(roi) => config = config.with_roi(roi),
            Err(e) => rover_base::log_fatal!("{}", e),
        }
    }

    log::info!(
        "Servo: frames from {}, tracker {}, ROI {:?}",
        config.frames_addr(),
        config.tracker_kind(),
        config.roi()
    );

    // Conflate on the input: only the freshest frame matters for control.
    let frames = Subscriber::connect(config.frames_addr(), "video.raw", Mode::Conflate).await?;
    log::info!("Subscribed to video.raw on {}", config.frames_addr());

    let hub = rover_bus::Hub::bind(config.publish_addr()).await?;
    log::info!("Publishing results on {}", hub.local_addr());

    let publisher = ResultPublisher::new(hub, config.jpeg_quality());
    let pipeline = Pipeline::new(config.tracker_kind().create(), config.roi());

    if let Err(e) = rover_servo::pipeline::run(pipeline, frames, publisher).await {
        rover_base::log_fatal!("Servo session failed: {}", e);
    }
    Ok(())
}
