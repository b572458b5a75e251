use std::time::{Duration, Instant};

use chart_kit::interaction::Debouncer;

#[test]
fn fires_once_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::from_millis(50);
    debouncer.call(start, "first");

    assert_eq!(debouncer.poll(start + Duration::from_millis(49)), None);
    assert_eq!(debouncer.poll(start + Duration::from_millis(50)), Some("first"));
    assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
    assert!(!debouncer.is_pending());
}

#[test]
fn each_call_restarts_the_timer_and_last_write_wins() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    debouncer.call(start, 1);
    debouncer.call(start + Duration::from_millis(40), 2);

    assert_eq!(debouncer.poll(start + Duration::from_millis(60)), None);
    assert_eq!(
        debouncer.deadline(),
        Some(start + Duration::from_millis(90))
    );
    assert_eq!(debouncer.poll(start + Duration::from_millis(90)), Some(2));
}

#[test]
fn cancel_drops_the_pending_payload() {
    let start = Instant::now();
    let mut debouncer = Debouncer::from_millis(10);
    debouncer.call(start, ());
    debouncer.cancel();
    assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    assert_eq!(debouncer.delay(), Duration::from_millis(10));
}
