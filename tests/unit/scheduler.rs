use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

#[test]
fn first_tick_fires_immediately() {
    let ticks = Arc::new(AtomicU32::new(0));
    let t = ticks.clone();
    let mut sched = AnimationScheduler::spawn(Duration::from_secs(60), move || {
        t.fetch_add(1, Ordering::SeqCst);
        true
    });
    // With a one-minute interval, any observed tick is the immediate one.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while ticks.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
        thread::yield_now();
    }
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
    sched.cancel();
}

#[test]
fn ticks_repeat_until_cancelled_and_stop_after() {
    let ticks = Arc::new(AtomicU32::new(0));
    let t = ticks.clone();
    let mut sched = AnimationScheduler::spawn(Duration::from_millis(1), move || {
        t.fetch_add(1, Ordering::SeqCst);
        true
    });
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while ticks.load(Ordering::SeqCst) < 3 && std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    assert!(ticks.load(Ordering::SeqCst) >= 3);

    sched.cancel();
    let after = ticks.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(ticks.load(Ordering::SeqCst), after);
}

#[test]
fn tick_returning_false_stops_the_loop() {
    let ticks = Arc::new(AtomicU32::new(0));
    let t = ticks.clone();
    let mut sched = AnimationScheduler::spawn(Duration::from_millis(1), move || {
        t.fetch_add(1, Ordering::SeqCst) < 2
    });
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while ticks.load(Ordering::SeqCst) < 3 && std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    thread::sleep(Duration::from_millis(20));
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    sched.cancel();
}

#[test]
fn drop_cancels_synchronously() {
    let ticks = Arc::new(AtomicU32::new(0));
    let t = ticks.clone();
    let sched = AnimationScheduler::spawn(Duration::from_millis(1), move || {
        t.fetch_add(1, Ordering::SeqCst);
        true
    });
    drop(sched);
    let after = ticks.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(ticks.load(Ordering::SeqCst), after);
}

#[test]
fn cancel_is_idempotent() {
    let mut sched = AnimationScheduler::spawn(Duration::from_millis(1), || true);
    sched.cancel();
    sched.cancel();
}
