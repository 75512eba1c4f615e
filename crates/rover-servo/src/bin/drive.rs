use rover_bus::{BusError, Mode, Subscriber};
use rover_servo::DrivePayload;
use rover_servo::publisher::TOPIC_DRIVE_CMD;

const DEFAULT_ADDR: &str = "127.0.0.1:5556";
const QUEUE_DEPTH: usize = 8;

/// Stand-in motor consumer: subscribes to drive commands with a short
/// buffered queue and logs the wheel efforts it would apply.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rover_base::init_stdout_logger();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let mut sub = Subscriber::connect(
        &addr,
        TOPIC_DRIVE_CMD,
        Mode::Buffered { depth: QUEUE_DEPTH },
    )
    .await?;
    log::info!("Listening for {} on {}", TOPIC_DRIVE_CMD, addr);

    loop {
        let (_topic, header, payload) = match sub.recv().await {
            Ok(message) => message,
            Err(BusError::ConnectionClosed) => {
                log::info!("Hub closed, stopping motors");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let cmd: DrivePayload = match serde_json::from_slice(&payload) {
            Ok(cmd) => cmd,
            Err(e) => {
                log::warn!("Command {} unparseable, ignoring: {}", header.seq, e);
                continue;
            }
        };

        log::info!("seq={} L={:+.2} R={:+.2}", header.seq, cmd.left, cmd.right);
    }
}
