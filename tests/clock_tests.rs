#![allow(missing_docs)]

use flappy_evo::simulation::clock::FrameClock;

#[test]
fn test_one_tick_per_tick_length() {
    let mut clock = FrameClock::new(30, 4);
    let tick = clock.tick_seconds();

    for _ in 0..10 {
        assert_eq!(clock.advance(tick), 1);
    }
    assert_eq!(clock.advance(0.0), 0);
}

#[test]
fn test_short_frames_accumulate() {
    let mut clock = FrameClock::new(30, 4);
    let tick = clock.tick_seconds();

    assert_eq!(clock.advance(tick * 0.6), 0);
    assert_eq!(clock.advance(tick * 0.6), 1);
    assert_eq!(clock.advance(0.11), 3);
}

#[test]
fn test_stall_is_capped() {
    let mut clock = FrameClock::new(30, 4);

    assert_eq!(clock.advance(1.0), 4);
    // at most one tick of backlog survives the cap
    assert_eq!(clock.advance(0.0), 1);
    assert_eq!(clock.advance(0.0), 0);
}

#[test]
fn test_reset_and_negative_frames() {
    let mut clock = FrameClock::new(30, 4);
    let tick = clock.tick_seconds();

    assert_eq!(clock.advance(tick * 0.9), 0);
    clock.reset();
    assert_eq!(clock.advance(tick * 0.9), 0);
    assert_eq!(clock.advance(-1.0), 0);
    assert_eq!(clock.advance(tick * 0.2), 1);
}
