use std::time::{Duration, Instant};

use chart_kit::layout::{
    BoundingRect, ContainerSizer, HitRegion, Length, Padding, ResolvedSize, inside_content_box,
};

fn size() -> ResolvedSize {
    ContainerSizer::new(Length::Pixels(200.0), Length::Pixels(100.0), Padding::uniform(10.0))
        .expect("valid sizer")
        .current()
        .ready()
        .expect("fixed size resolves")
}

fn rect() -> BoundingRect {
    BoundingRect::new(50.0, 300.0, 150.0, 100.0)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn content_box_excludes_padding_and_edges() {
    let size = size();
    let rect = rect();
    assert!(inside_content_box(&rect, &size, 150.0, 100.0));
    // on the padding edge
    assert!(!inside_content_box(&rect, &size, 110.0, 100.0));
    assert!(!inside_content_box(&rect, &size, 290.0, 100.0));
    assert!(!inside_content_box(&rect, &size, 150.0, 140.0));
    assert!(inside_content_box(&rect, &size, 289.0, 139.0));
}

#[test]
fn first_hover_schedules_a_deferred_measurement() {
    let start = Instant::now();
    let mut region = HitRegion::default();
    region.mount();
    region.pointer_over(start);
    assert_eq!(region.next_deadline(), Some(start + ms(500)));

    let mut measured = 0;
    let left = region.poll(start + ms(100), &size(), || {
        measured += 1;
        Some(rect())
    });
    assert!(!left);
    assert_eq!(measured, 0);

    region.pointer_move(start + ms(200), 150.0, 100.0);
    let left = region.poll(start + ms(500), &size(), || {
        measured += 1;
        Some(rect())
    });
    assert!(!left);
    assert_eq!(measured, 1);
    assert_eq!(region.cached_rect(), Some(rect()));
}

#[test]
fn leaving_is_reported_once_and_clears_the_cache() {
    let start = Instant::now();
    let mut region = HitRegion::new(ms(100));
    region.mount();
    region.pointer_over(start);
    region.pointer_move(start, 150.0, 100.0);
    assert!(!region.poll(start + ms(100), &size(), || Some(rect())));

    region.pointer_move(start + ms(150), 20.0, 20.0);
    assert!(!region.poll(start + ms(200), &size(), || None));
    assert!(region.poll(start + ms(250), &size(), || None));
    assert!(region.cached_rect().is_none());
    assert!(!region.poll(start + ms(1000), &size(), || None));

    // the next hover measures again
    region.pointer_over(start + ms(1100));
    assert_eq!(region.next_deadline(), Some(start + ms(1200)));
}

#[test]
fn moves_inside_keep_the_cached_rect() {
    let start = Instant::now();
    let mut region = HitRegion::new(ms(100));
    region.mount();
    region.pointer_over(start);
    region.pointer_move(start, 150.0, 100.0);
    assert!(!region.poll(start + ms(100), &size(), || Some(rect())));

    region.pointer_move(start + ms(120), 200.0, 120.0);
    assert!(!region.poll(start + ms(220), &size(), || None));
    assert_eq!(region.cached_rect(), Some(rect()));

    // repeated hovers do not re-measure while cached
    region.pointer_over(start + ms(300));
    assert_eq!(region.next_deadline(), None);
}

#[test]
fn pointer_moves_are_ignored_while_unmounted() {
    let start = Instant::now();
    let mut region = HitRegion::new(ms(100));
    region.pointer_move(start, 1.0, 1.0);
    assert!(region.pointer().is_none());

    region.mount();
    region.pointer_over(start);
    region.unmount();
    assert!(!region.is_listening());
    assert_eq!(region.next_deadline(), None);
}

#[test]
fn missing_pointer_counts_as_outside() {
    let start = Instant::now();
    let mut region = HitRegion::new(ms(100));
    region.mount();
    region.pointer_over(start);
    assert!(region.poll(start + ms(100), &size(), || Some(rect())));
}
