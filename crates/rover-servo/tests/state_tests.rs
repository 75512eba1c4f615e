use rover_base::Rect;
use rover_servo::{TrackMode, TrackState};
use std::time::Duration;

const SEC: u64 = 1_000_000_000;

#[test]
fn test_default_roi_is_centered_and_capped() {
    // Large frame: the 80px cap applies.
    assert_eq!(
        TrackState::default_roi(320, 240),
        Rect::new(120.0, 80.0, 80.0, 80.0)
    );

    // Small frame: a third of each dimension, still centered.
    assert_eq!(
        TrackState::default_roi(90, 60),
        Rect::new(30.0, 20.0, 30.0, 20.0)
    );
}

#[test]
fn test_roi_present_only_while_tracking() {
    let mut state = TrackState::new();
    assert_eq!(state.mode(), TrackMode::Uninitialized);
    assert!(state.roi().is_none());

    state.lock(Rect::new(10.0, 10.0, 20.0, 20.0), 0);
    assert_eq!(state.mode(), TrackMode::Tracking);
    assert!(state.roi().is_some());

    state.mark_lost();
    assert_eq!(state.mode(), TrackMode::Lost);
    assert!(state.roi().is_none());

    state.reacquire(Rect::new(5.0, 5.0, 20.0, 20.0));
    assert_eq!(state.mode(), TrackMode::Tracking);
    assert!(state.roi().is_some());
}

#[test]
fn test_first_observation_seeds_averages() {
    let mut state = TrackState::new();
    state.lock(Rect::new(100.0, 100.0, 40.0, 40.0), 0);

    let (cx, area) = state.observe(Rect::new(100.0, 100.0, 40.0, 40.0), SEC);
    assert_eq!(cx, 120.0);
    assert_eq!(area, 1600.0);
}

#[test]
fn test_observations_smooth_toward_new_position() {
    let mut state = TrackState::new();
    state.lock(Rect::new(100.0, 100.0, 40.0, 40.0), 0);
    state.observe(Rect::new(100.0, 100.0, 40.0, 40.0), SEC);

    // The box jumps 100px right; the smoothed centroid moves only part way.
    let (cx, _) = state.observe(Rect::new(200.0, 100.0, 40.0, 40.0), 2 * SEC);
    assert!(cx > 120.0 && cx < 220.0);
    assert_eq!(state.mode(), TrackMode::Tracking);
}

#[test]
fn test_reacquire_reseeds_averages_but_not_last_seen() {
    let mut state = TrackState::new();
    state.lock(Rect::new(100.0, 100.0, 40.0, 40.0), 0);
    state.observe(Rect::new(100.0, 100.0, 40.0, 40.0), SEC);

    state.mark_lost();
    state.reacquire(Rect::new(50.0, 50.0, 40.0, 40.0));

    // Statistics restart, but the target has still not been seen since 1s.
    assert!(state.centroid_x().is_none());
    assert!(state.area().is_none());
    assert_eq!(state.since_seen(5 * SEC), Duration::from_secs(4));

    // The next observation reseeds directly at the new position.
    let (cx, _) = state.observe(Rect::new(50.0, 50.0, 40.0, 40.0), 5 * SEC);
    assert_eq!(cx, 70.0);
    assert_eq!(state.since_seen(5 * SEC), Duration::ZERO);
}

#[test]
fn test_since_seen_saturates() {
    let mut state = TrackState::new();
    state.lock(Rect::new(0.0, 0.0, 10.0, 10.0), 10 * SEC);
    assert_eq!(state.since_seen(9 * SEC), Duration::ZERO);
}
