use rover_video::{FrameSource, Paced, TestPattern};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test]
async fn test_pattern_is_deterministic() {
    let mut a = TestPattern::new(160, 120);
    let mut b = TestPattern::new(160, 120);

    for _ in 0..4 {
        let frame_a = a.recv().await.unwrap();
        let frame_b = b.recv().await.unwrap();
        assert_eq!(frame_a, frame_b);
    }
}

#[tokio::test]
async fn test_pattern_moves_between_frames() {
    let mut source = TestPattern::new(320, 240);
    let first = source.recv().await.unwrap();
    let second = source.recv().await.unwrap();

    assert_eq!(first.width, 320);
    assert_eq!(first.height, 240);
    assert_ne!(first.data, second.data, "square should move each tick");
}

#[tokio::test(start_paused = true)]
async fn test_pacing_spaces_out_frames() {
    let mut source = Paced::new(TestPattern::new(64, 64), 10);

    let start = Instant::now();
    // First frame is immediate; the next three wait for their deadlines.
    for _ in 0..4 {
        source.recv().await.unwrap();
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(300),
        "4 frames at 10 fps should span >= 300ms, got {:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_zero_fps_clamps() {
    // fps 0 must not divide by zero; it behaves as 1 fps.
    let mut source = Paced::new(TestPattern::new(32, 32), 0);
    source.recv().await.unwrap();
    source.recv().await.unwrap();
}
