//! Pointer-leave detection for the padded chart box.
//!
//! The host reports pointer positions from a window-level listener and
//! measures the chart element on request. The region caches that measurement
//! and only re-measures after the pointer has been seen outside.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::interaction::debounce::Debouncer;
use crate::layout::container::ResolvedSize;

/// Default delay before measuring and before checking a pointer position.
pub const DEFAULT_LEAVE_CHECK_DELAY_MS: u64 = 500;

/// Client-space bounding rectangle of the chart element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl BoundingRect {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Whether `(x, y)` lies strictly inside the padded content box anchored at
/// `rect`'s top-left corner.
#[must_use]
pub fn inside_content_box(rect: &BoundingRect, size: &ResolvedSize, x: f64, y: f64) -> bool {
    let padding = size.padding;
    x - rect.left - padding.left() > 0.0
        && y - rect.top - padding.top() > 0.0
        && x < rect.left + size.width - padding.right()
        && y < rect.top + size.height - padding.bottom()
}

#[derive(Debug, Clone)]
pub struct HitRegion {
    delay: Duration,
    listening: bool,
    rect: Option<BoundingRect>,
    pointer: Option<(f64, f64)>,
    measure_due: Option<Instant>,
    leave_check: Debouncer<()>,
}

impl Default for HitRegion {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LEAVE_CHECK_DELAY_MS))
    }
}

impl HitRegion {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            listening: false,
            rect: None,
            pointer: None,
            measure_due: None,
            leave_check: Debouncer::new(delay),
        }
    }

    /// Starts accepting pointer moves.
    pub fn mount(&mut self) {
        self.listening = true;
    }

    /// Stops accepting pointer moves and drops every pending timer.
    pub fn unmount(&mut self) {
        self.listening = false;
        self.measure_due = None;
        self.leave_check.cancel();
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    #[must_use]
    pub fn cached_rect(&self) -> Option<BoundingRect> {
        self.rect
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Pointer entered the chart element. Schedules a deferred measurement
    /// unless a rect is already cached or a measurement is already pending.
    pub fn pointer_over(&mut self, now: Instant) {
        if self.rect.is_some() || self.measure_due.is_some() {
            return;
        }
        self.measure_due = Some(now + self.delay);
        trace!("bounding rect measurement scheduled");
    }

    /// Records a window-level pointer position and, while a rect is cached,
    /// restarts the leave check.
    pub fn pointer_move(&mut self, now: Instant, x: f64, y: f64) {
        if !self.listening {
            trace!(x, y, "pointer move ignored while unmounted");
            return;
        }
        self.pointer = Some((x, y));
        if self.rect.is_some() {
            self.leave_check.call(now, ());
        }
    }

    /// Runs due timers. `measure` is asked for the element rect when the
    /// deferred measurement fires.
    ///
    /// Returns `true` exactly when the pointer was found outside the padded
    /// box; the cached rect is then cleared so the next hover re-measures.
    pub fn poll<F>(&mut self, now: Instant, size: &ResolvedSize, measure: F) -> bool
    where
        F: FnOnce() -> Option<BoundingRect>,
    {
        let mut check = false;
        if self.measure_due.is_some_and(|due| due <= now) {
            self.measure_due = None;
            if self.rect.is_none() {
                self.rect = measure();
                check = self.rect.is_some();
                debug!(rect = ?self.rect, "bounding rect measured");
            }
        }
        if self.leave_check.poll(now).is_some() {
            check = true;
        }
        check && self.check_left(size)
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.measure_due, self.leave_check.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn check_left(&mut self, size: &ResolvedSize) -> bool {
        let Some(rect) = self.rect else {
            return false;
        };
        let inside = self
            .pointer
            .is_some_and(|(x, y)| inside_content_box(&rect, size, x, y));
        if inside {
            return false;
        }
        debug!(pointer = ?self.pointer, "pointer left chart area");
        self.rect = None;
        self.leave_check.cancel();
        true
    }
}
