//! Digit-wise numeric indicator
//!
//! Represents an integer value as a fixed row of decimal digit cells, most
//! significant first. Each cell can add or subtract its place value; the
//! indicator keeps the value inside `[value_min, value_max]` by *rejecting*
//! any request that would leave the range (no saturation).
//!
//! # Architecture
//!
//! ```text
//! host setters ──▶ DigitIndicator ──▶ [DigitCell; size] ──▶ renderer
//!                        ▲                   │
//!                        │ apply_delta       │ place_value / active
//!                   InputMapper ◀────────────┘
//!                        ▲
//!                 press / hover / scroll
//! ```
//!
//! Observers are held weakly and notified synchronously, once per accepted
//! value change.

pub mod input;

use std::rc::{Rc, Weak};

pub use input::{CellInput, InputMapper, PendingDirection, PointerHalf};

/// Largest number of decimal places an `i64` can hold (place value 10^18)
pub const MAX_DIGITS: usize = 19;

/// Receiver of value-changed notifications
///
/// Implementors are registered with [`DigitIndicator::subscribe`] and held as
/// weak references: dropping the observer unsubscribes it.
pub trait ValueObserver {
    fn value_changed(&self, value: i64);
}

/// Presentation state of one decimal place
///
/// Derived from the indicator's value and threshold; never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCell {
    /// Weight of this place, and the delta one click/notch applies
    pub place_value: i64,
    /// Digit shown at this place (always `0..=9`, `0` when inactive)
    pub displayed_digit: u8,
    /// Suppressed leading zero: the value does not reach this place
    pub dimmed: bool,
    /// Whether the cell accepts input (`place_value >= delta_min`)
    pub active: bool,
}

impl DigitCell {
    fn new(place_value: i64) -> Self {
        Self {
            place_value,
            displayed_digit: 0,
            dimmed: true,
            active: true,
        }
    }

    fn derive(&mut self, value: i64, delta_min: i64) {
        let quotient = value / self.place_value;
        self.active = self.place_value >= delta_min;
        self.dimmed = quotient == 0;
        self.displayed_digit = if self.active {
            // Digit of the magnitude, so negative values still show 0..=9
            (quotient % 10).unsigned_abs() as u8
        } else {
            0
        };
    }
}

/// Clamped integer value decomposed into decimal digit cells
pub struct DigitIndicator {
    value: i64,
    value_min: i64,
    value_max: i64,
    delta_min: i64,
    cells: Vec<DigitCell>,
    observers: Vec<Weak<dyn ValueObserver>>,
}

impl DigitIndicator {
    /// Create an empty indicator: value and both bounds at 0, no cells
    pub fn new() -> Self {
        Self {
            value: 0,
            value_min: 0,
            value_max: 0,
            delta_min: 0,
            cells: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for value changes
    ///
    /// Only a weak reference is kept; the caller owns the observer.
    pub fn subscribe<O: ValueObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak = Rc::downgrade(observer);
        self.observers.push(weak);
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Number of digit cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Digit cells, most significant first
    pub fn cells(&self) -> &[DigitCell] {
        &self.cells
    }

    /// Whether a sign should be drawn in front of the digits
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    // ─────────────────────────────────────────────────────────────
    // Host entry points
    // ─────────────────────────────────────────────────────────────

    /// Rebuild the cell sequence with `size` places
    ///
    /// Place values run from `10^(size-1)` down to `1`. The value is left
    /// untouched and no notification fires.
    pub fn set_size(&mut self, size: usize) {
        let size = if size > MAX_DIGITS {
            tracing::warn!(requested = size, max = MAX_DIGITS, "digit count clamped");
            MAX_DIGITS
        } else {
            size
        };

        self.cells = (0..size as u32)
            .rev()
            .map(|exp| DigitCell::new(10_i64.pow(exp)))
            .collect();
        self.derive_cells();
    }

    /// Lower bound; rejected if it would exceed the upper bound
    pub fn set_value_min(&mut self, value_min: i64) {
        if value_min > self.value_max {
            tracing::debug!(value_min, value_max = self.value_max, "value_min rejected");
            return;
        }
        self.value_min = value_min;
        if self.value < value_min {
            self.set_value(value_min);
        }
    }

    /// Upper bound; rejected if it would fall below the lower bound
    pub fn set_value_max(&mut self, value_max: i64) {
        if value_max < self.value_min {
            tracing::debug!(value_max, value_min = self.value_min, "value_max rejected");
            return;
        }
        self.value_max = value_max;
        if self.value > value_max {
            self.set_value(value_max);
        }
    }

    /// Assign the value
    ///
    /// Out-of-range requests are dropped entirely, never clamped. Observers
    /// are notified only when the stored value actually changes.
    pub fn set_value(&mut self, value: i64) {
        if value < self.value_min || value > self.value_max {
            tracing::debug!(
                value,
                value_min = self.value_min,
                value_max = self.value_max,
                "set_value rejected: out of range"
            );
            return;
        }

        let changed = value != self.value;
        self.value = value;
        self.derive_cells();
        if changed {
            self.notify();
        }
    }

    /// Minimum editable place value
    ///
    /// Cells below the threshold display `0` and ignore input.
    pub fn set_delta_min(&mut self, delta_min: i64) {
        self.delta_min = delta_min;
        self.derive_cells();
    }

    /// Add a signed delta to the value
    ///
    /// A delta that would carry the value past a bound is rejected as a
    /// whole, as is one that overflows `i64`.
    pub fn apply_delta(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }

        let Some(candidate) = self.value.checked_add(delta) else {
            tracing::debug!(value = self.value, delta, "apply_delta rejected: overflow");
            return;
        };

        if delta < 0 && candidate < self.value_min {
            tracing::debug!(candidate, value_min = self.value_min, "apply_delta rejected");
            return;
        }
        if delta > 0 && candidate > self.value_max {
            tracing::debug!(candidate, value_max = self.value_max, "apply_delta rejected");
            return;
        }

        self.set_value(candidate);
    }

    // ─────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────

    fn derive_cells(&mut self) {
        let (value, delta_min) = (self.value, self.delta_min);
        for cell in &mut self.cells {
            cell.derive(value, delta_min);
        }
    }

    fn notify(&mut self) {
        let value = self.value;
        // Dropped observers are pruned as we go
        self.observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                observer.value_changed(value);
                true
            }
            None => false,
        });
    }
}

impl Default for DigitIndicator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Observer that records every notification
    #[derive(Default)]
    pub(crate) struct Recorder(pub RefCell<Vec<i64>>);

    impl ValueObserver for Recorder {
        fn value_changed(&self, value: i64) {
            self.0.borrow_mut().push(value);
        }
    }

    impl Recorder {
        pub(crate) fn take(&self) -> Vec<i64> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    fn indicator(size: usize, min: i64, max: i64) -> (DigitIndicator, Rc<Recorder>) {
        let mut ind = DigitIndicator::new();
        ind.set_value_max(max);
        ind.set_value_min(min);
        ind.set_size(size);
        let recorder = Rc::new(Recorder::default());
        ind.subscribe(&recorder);
        (ind, recorder)
    }

    fn digits(ind: &DigitIndicator) -> Vec<u8> {
        ind.cells().iter().map(|c| c.displayed_digit).collect()
    }

    #[test]
    fn test_new_indicator_is_empty() {
        let ind = DigitIndicator::new();
        assert_eq!(ind.value(), 0);
        assert_eq!(ind.value_min, 0);
        assert_eq!(ind.value_max, 0);
        assert_eq!(ind.delta_min, 0);
        assert_eq!(ind.size(), 0);
    }

    #[test]
    fn test_set_value_in_range_notifies_once() {
        let (mut ind, rec) = indicator(4, -500, 500);
        for v in [-500, -1, 0, 1, 42, 499, 500] {
            ind.set_value(v);
            assert_eq!(ind.value(), v);
            assert_eq!(rec.take(), vec![v]);
        }
    }

    #[test]
    fn test_set_value_out_of_range_is_dropped() {
        let (mut ind, rec) = indicator(3, 10, 20);
        assert_eq!(ind.value(), 10);
        rec.take();

        ind.set_value(9);
        ind.set_value(21);
        ind.set_value(i64::MIN);
        ind.set_value(i64::MAX);

        assert_eq!(ind.value(), 10);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_set_value_same_value_is_silent() {
        let (mut ind, rec) = indicator(3, 0, 999);
        ind.set_value(7);
        rec.take();

        ind.set_value(ind.value());
        assert_eq!(ind.value(), 7);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_digit_decomposition_with_leading_zeros() {
        let (mut ind, _rec) = indicator(5, 0, 99_999);
        ind.set_value(123);

        let places: Vec<i64> = ind.cells().iter().map(|c| c.place_value).collect();
        assert_eq!(places, vec![10_000, 1_000, 100, 10, 1]);
        assert_eq!(digits(&ind), vec![0, 0, 1, 2, 3]);

        let dimmed: Vec<bool> = ind.cells().iter().map(|c| c.dimmed).collect();
        assert_eq!(dimmed, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_zero_value_dims_every_cell() {
        let (ind, _rec) = indicator(3, 0, 999);
        assert!(ind.cells().iter().all(|c| c.dimmed));
        assert_eq!(digits(&ind), vec![0, 0, 0]);
    }

    #[test]
    fn test_negative_value_shows_magnitude_digits() {
        let (mut ind, _rec) = indicator(4, -9_999, 9_999);
        ind.set_value(-305);
        assert!(ind.is_negative());
        assert_eq!(digits(&ind), vec![0, 3, 0, 5]);
        let dimmed: Vec<bool> = ind.cells().iter().map(|c| c.dimmed).collect();
        assert_eq!(dimmed, vec![true, false, false, false]);
    }

    #[test]
    fn test_delta_min_deactivates_low_places() {
        let (mut ind, rec) = indicator(5, 0, 99_999);
        ind.set_value(12_345);
        rec.take();

        ind.set_delta_min(100);

        let active: Vec<bool> = ind.cells().iter().map(|c| c.active).collect();
        assert_eq!(active, vec![true, true, true, false, false]);
        assert_eq!(digits(&ind), vec![1, 2, 3, 0, 0]);
        assert_eq!(ind.value(), 12_345);
        assert!(rec.take().is_empty());

        // Still blanked after the value moves
        ind.set_value(67_891);
        assert_eq!(digits(&ind), vec![6, 7, 8, 0, 0]);

        // Lowering the threshold brings the digits back
        ind.set_delta_min(1);
        assert_eq!(digits(&ind), vec![6, 7, 8, 9, 1]);
    }

    #[test]
    fn test_set_value_max_reclamps_value() {
        let (mut ind, rec) = indicator(3, 0, 100);
        ind.set_value(50);
        rec.take();

        ind.set_value_max(30);
        assert_eq!(ind.value_max, 30);
        assert_eq!(ind.value(), 30);
        assert_eq!(rec.take(), vec![30]);
    }

    #[test]
    fn test_set_value_min_reclamps_value() {
        let (mut ind, rec) = indicator(3, 0, 100);
        ind.set_value(5);
        rec.take();

        ind.set_value_min(40);
        assert_eq!(ind.value_min, 40);
        assert_eq!(ind.value(), 40);
        assert_eq!(rec.take(), vec![40]);
    }

    #[test]
    fn test_inverting_bound_is_rejected() {
        let (mut ind, rec) = indicator(2, 0, 10);
        ind.set_value(5);
        rec.take();

        ind.set_value_min(20);
        assert_eq!((ind.value_min, ind.value_max), (0, 10));

        ind.set_value_max(-1);
        assert_eq!((ind.value_min, ind.value_max), (0, 10));

        assert_eq!(ind.value(), 5);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_bound_change_without_reclamp_is_silent() {
        let (mut ind, rec) = indicator(2, 0, 10);
        ind.set_value(5);
        rec.take();

        ind.set_value_max(50);
        ind.set_value_min(-50);
        assert_eq!(ind.value(), 5);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_apply_delta_rejects_overshoot() {
        let (mut ind, rec) = indicator(3, 0, 999);
        ind.set_value(950);
        rec.take();

        // Would land on 1050: rejected, not saturated to 999
        ind.apply_delta(100);
        assert_eq!(ind.value(), 950);

        ind.apply_delta(49);
        assert_eq!(ind.value(), 999);

        ind.apply_delta(-1_000);
        assert_eq!(ind.value(), 999);

        ind.apply_delta(-999);
        assert_eq!(ind.value(), 0);

        assert_eq!(rec.take(), vec![999, 0]);
    }

    #[test]
    fn test_apply_delta_zero_is_noop() {
        let (mut ind, rec) = indicator(3, 0, 999);
        ind.set_value(10);
        rec.take();
        ind.apply_delta(0);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_apply_delta_overflow_is_rejected() {
        let (mut ind, rec) = indicator(19, i64::MIN, i64::MAX);
        ind.set_value(i64::MAX - 1);
        rec.take();

        ind.apply_delta(i64::MAX);
        assert_eq!(ind.value(), i64::MAX - 1);

        ind.set_value(i64::MIN + 1);
        rec.take();
        ind.apply_delta(i64::MIN);
        assert_eq!(ind.value(), i64::MIN + 1);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_apply_delta_never_leaves_range() {
        let (mut ind, _rec) = indicator(6, -2_500, 7_300);

        // Deterministic LCG walk over mixed-magnitude deltas
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..5_000 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let magnitude = 10_i64.pow(((seed >> 33) % 6) as u32);
            let notches = ((seed >> 40) % 21) as i64 - 10;
            ind.apply_delta(notches * magnitude);

            assert!(ind.value() >= ind.value_min);
            assert!(ind.value() <= ind.value_max);
        }
    }

    #[test]
    fn test_set_size_rebuilds_cells_without_notifying() {
        let (mut ind, rec) = indicator(2, 0, 9_999);
        ind.set_value(4_321);
        rec.take();

        ind.set_size(6);
        assert_eq!(ind.size(), 6);
        assert_eq!(digits(&ind), vec![0, 0, 4, 3, 2, 1]);

        ind.set_size(0);
        assert!(ind.cells().is_empty());
        assert_eq!(ind.value(), 4_321);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_set_size_keeps_threshold() {
        let (mut ind, _rec) = indicator(3, 0, 999);
        ind.set_delta_min(10);
        ind.set_size(4);
        let active: Vec<bool> = ind.cells().iter().map(|c| c.active).collect();
        assert_eq!(active, vec![true, true, true, false]);
    }

    #[test]
    fn test_set_size_is_capped() {
        let (mut ind, _rec) = indicator(0, 0, 0);
        ind.set_size(40);
        assert_eq!(ind.size(), MAX_DIGITS);
        assert_eq!(ind.cells()[0].place_value, 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let (mut ind, rec) = indicator(2, 0, 99);
        let transient = Rc::new(Recorder::default());
        ind.subscribe(&transient);

        ind.set_value(1);
        assert_eq!(transient.take(), vec![1]);
        drop(transient);

        ind.set_value(2);
        assert_eq!(rec.take(), vec![1, 2]);
        assert_eq!(ind.observers.len(), 1);
    }
}
