//! Tick generation for continuous scales and tick-label thinning.

use tracing::trace;

/// Default number of ticks requested from a continuous scale.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Maximum number of labels kept visible by [`TickThinner`].
pub const MAX_VISIBLE_TICK_LABELS: usize = 10;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Returns human-friendly ticks inside `[start, stop]`.
///
/// Steps are 1, 2 or 5 times a power of ten, chosen so that roughly `count`
/// ticks cover the interval. Reversed intervals produce reversed ticks.
/// Non-finite bounds or a zero count produce no ticks.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_increment(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let step = i1 + i as f64;
            if inc < 0.0 { step / -inc } else { step * inc }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn tick_increment(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10_f64.powf(-power) / factor;
        i1 = (start * scaled).round();
        i2 = (stop * scaled).round();
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10_f64.powf(power) * factor;
        i1 = (start / scaled).round();
        i2 = (stop / scaled).round();
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_increment(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Keeps at most [`MAX_VISIBLE_TICK_LABELS`] labels visible while a sliding
/// window over the data grows and shrinks.
///
/// A label at absolute index `i` is shown when `i % divisor == 0`. The
/// divisor history is a stack: shrinking the window only adopts a smaller
/// divisor when it divides the current one (so visible labels stay visible),
/// and growing it falls back to the previous, coarser divisor. The state is
/// owned by the caller; there is no shared accumulator between instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickThinner {
    divisors: Vec<usize>,
}

impl TickThinner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest divisor that keeps `visible_len` labels at or below the cap.
    #[must_use]
    pub fn required_divisor(visible_len: usize) -> usize {
        visible_len.div_ceil(MAX_VISIBLE_TICK_LABELS).max(1)
    }

    /// Updates the divisor stack for a window of `visible_len` items and
    /// returns the divisor to use.
    pub fn divisor(&mut self, visible_len: usize) -> usize {
        let required = Self::required_divisor(visible_len);
        match self.divisors.last().copied() {
            None => self.divisors.push(required),
            Some(last) if required < last && last % required == 0 => {
                self.divisors.push(required);
            }
            Some(last) if required > last => {
                while self.divisors.last().is_some_and(|top| *top < required) {
                    self.divisors.pop();
                }
                if self.divisors.is_empty() {
                    self.divisors.push(required);
                }
            }
            Some(_) => {}
        }

        let divisor = self.divisors.last().copied().unwrap_or(required);
        trace!(visible_len, required, divisor, "tick thinning divisor");
        divisor
    }

    /// Returns `label` when the tick at `offset + index` should stay visible.
    pub fn label<'a>(
        &mut self,
        label: &'a str,
        index: usize,
        offset: usize,
        visible_len: usize,
    ) -> &'a str {
        let divisor = self.divisor(visible_len);
        if (index + offset) % divisor == 0 {
            label
        } else {
            ""
        }
    }

    pub fn reset(&mut self) {
        self.divisors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{TickThinner, linear_ticks};

    #[test]
    fn ticks_follow_two_step_for_zero_to_twenty_four() {
        let ticks = linear_ticks(0.0, 24.0, 10);
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(24.0));
    }

    #[test]
    fn ticks_use_fractional_steps_for_small_spans() {
        let ticks = linear_ticks(0.0, 1.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }

    #[test]
    fn reversed_interval_yields_reversed_ticks() {
        let ticks = linear_ticks(10.0, 0.0, 5);
        assert_eq!(ticks, vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn degenerate_interval_yields_single_tick() {
        assert_eq!(linear_ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(linear_ticks(0.0, f64::NAN, 10).is_empty());
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn thinner_keeps_coarse_divisor_until_it_divides() {
        let mut thinner = TickThinner::new();
        assert_eq!(thinner.divisor(40), 4);
        // 25 items need 3, which does not divide 4: keep 4.
        assert_eq!(thinner.divisor(25), 4);
        // 20 items need 2, which divides 4: adopt it.
        assert_eq!(thinner.divisor(20), 2);
        // growing again falls back to the coarser divisor.
        assert_eq!(thinner.divisor(40), 4);
    }

    #[test]
    fn thinner_blanks_labels_between_divisor_multiples() {
        let mut thinner = TickThinner::new();
        assert_eq!(thinner.label("a", 0, 0, 30), "a");
        assert_eq!(thinner.label("b", 1, 0, 30), "");
        assert_eq!(thinner.label("c", 1, 2, 30), "c");
    }
}
