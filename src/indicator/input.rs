//! Pointer and wheel input for digit cells
//!
//! Translates an interaction with one cell into a signed delta and forwards
//! it to [`DigitIndicator::apply_delta`]. Range protection is left entirely
//! to the indicator, so programmatic and pointer-driven deltas get the same
//! guarantees.

use super::DigitIndicator;

/// Which half of a cell the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHalf {
    Upper,
    Lower,
}

impl PointerHalf {
    /// Classify a row offset inside a cell of `height` rows
    ///
    /// Rows above `height / 2` are upper, rows below are lower. The midpoint
    /// row itself belongs to neither half.
    pub fn from_position(y: u16, height: u16) -> Option<Self> {
        let mid = height / 2;
        if y < mid {
            Some(Self::Upper)
        } else if y > mid {
            Some(Self::Lower)
        } else {
            None
        }
    }

    fn sign(self) -> i64 {
        match self {
            Self::Upper => 1,
            Self::Lower => -1,
        }
    }
}

/// Highlight shown while hovering, before any click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingDirection {
    #[default]
    Neutral,
    Up,
    Down,
}

impl From<PointerHalf> for PendingDirection {
    fn from(half: PointerHalf) -> Self {
        match half {
            PointerHalf::Upper => Self::Up,
            PointerHalf::Lower => Self::Down,
        }
    }
}

/// One raw interaction with a digit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellInput {
    /// Click on a half: +place (upper) or -place (lower)
    Press(PointerHalf),
    /// Pointer moved over a half
    Hover(PointerHalf),
    /// Pointer left the cell
    Leave,
    /// Signed count of wheel notches (positive = away from the user)
    Scroll(i64),
}

/// Maps cell interactions to indicator deltas
///
/// Holds the hover highlight, which is purely presentational.
#[derive(Debug, Default)]
pub struct InputMapper {
    hovered: Option<(usize, PendingDirection)>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one interaction with cell `index` (0 = most significant)
    ///
    /// Returns the delta forwarded to the indicator, if any. Interactions
    /// with inactive or nonexistent cells are ignored entirely.
    pub fn handle(
        &mut self,
        indicator: &mut DigitIndicator,
        index: usize,
        input: CellInput,
    ) -> Option<i64> {
        let place_value = match indicator.cells().get(index) {
            Some(cell) if cell.active => cell.place_value,
            _ => return None,
        };

        match input {
            CellInput::Press(half) => Self::forward(indicator, half.sign() * place_value),
            CellInput::Hover(half) => {
                self.hovered = Some((index, half.into()));
                None
            }
            CellInput::Leave => {
                if self.hovered_cell() == Some(index) {
                    self.hovered = None;
                }
                None
            }
            // A delta that overflows i64 can never land in range
            CellInput::Scroll(notches) => match notches.checked_mul(place_value) {
                Some(delta) => Self::forward(indicator, delta),
                None => {
                    tracing::debug!(notches, place_value, "scroll delta overflows, ignored");
                    None
                }
            },
        }
    }

    /// Hover highlight for cell `index`
    pub fn pending(&self, index: usize) -> PendingDirection {
        match self.hovered {
            Some((cell, direction)) if cell == index => direction,
            _ => PendingDirection::Neutral,
        }
    }

    /// Cell currently under the pointer, if any
    pub fn hovered_cell(&self) -> Option<usize> {
        self.hovered.map(|(cell, _)| cell)
    }

    /// Drop any hover highlight (cells were rebuilt or re-gated)
    pub fn reset(&mut self) {
        self.hovered = None;
    }

    fn forward(indicator: &mut DigitIndicator, delta: i64) -> Option<i64> {
        if delta == 0 {
            return None;
        }
        indicator.apply_delta(delta);
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::tests::Recorder;
    use std::rc::Rc;

    fn setup(size: usize, max: i64) -> (DigitIndicator, InputMapper, Rc<Recorder>) {
        let mut ind = DigitIndicator::new();
        ind.set_value_max(max);
        ind.set_size(size);
        let rec = Rc::new(Recorder::default());
        ind.subscribe(&rec);
        (ind, InputMapper::new(), rec)
    }

    #[test]
    fn test_pointer_half_midpoint_is_neutral() {
        assert_eq!(PointerHalf::from_position(0, 3), Some(PointerHalf::Upper));
        assert_eq!(PointerHalf::from_position(1, 3), None);
        assert_eq!(PointerHalf::from_position(2, 3), Some(PointerHalf::Lower));

        assert_eq!(PointerHalf::from_position(0, 4), Some(PointerHalf::Upper));
        assert_eq!(PointerHalf::from_position(2, 4), None);
        assert_eq!(PointerHalf::from_position(3, 4), Some(PointerHalf::Lower));
    }

    #[test]
    fn test_press_maps_to_place_value() {
        let (mut ind, mut mapper, _rec) = setup(3, 999);
        ind.set_value(500);

        let up = mapper.handle(&mut ind, 1, CellInput::Press(PointerHalf::Upper));
        assert_eq!(up, Some(10));
        assert_eq!(ind.value(), 510);

        let down = mapper.handle(&mut ind, 0, CellInput::Press(PointerHalf::Lower));
        assert_eq!(down, Some(-100));
        assert_eq!(ind.value(), 410);
    }

    #[test]
    fn test_hover_and_leave_only_touch_highlight() {
        let (mut ind, mut mapper, rec) = setup(3, 999);

        assert_eq!(mapper.handle(&mut ind, 2, CellInput::Hover(PointerHalf::Upper)), None);
        assert_eq!(mapper.pending(2), PendingDirection::Up);
        assert_eq!(mapper.pending(1), PendingDirection::Neutral);

        mapper.handle(&mut ind, 2, CellInput::Hover(PointerHalf::Lower));
        assert_eq!(mapper.pending(2), PendingDirection::Down);

        // Leaving a different cell leaves the highlight alone
        mapper.handle(&mut ind, 1, CellInput::Leave);
        assert_eq!(mapper.pending(2), PendingDirection::Down);

        mapper.handle(&mut ind, 2, CellInput::Leave);
        assert_eq!(mapper.pending(2), PendingDirection::Neutral);

        assert_eq!(ind.value(), 0);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_scroll_multiplies_notches() {
        let (mut ind, mut mapper, _rec) = setup(4, 9_999);
        ind.set_value(5_000);

        assert_eq!(mapper.handle(&mut ind, 1, CellInput::Scroll(3)), Some(300));
        assert_eq!(ind.value(), 5_300);

        assert_eq!(mapper.handle(&mut ind, 3, CellInput::Scroll(-7)), Some(-7));
        assert_eq!(ind.value(), 5_293);

        assert_eq!(mapper.handle(&mut ind, 0, CellInput::Scroll(0)), None);
    }

    #[test]
    fn test_scroll_overflow_is_ignored() {
        let mut ind = DigitIndicator::new();
        ind.set_value_min(i64::MIN);
        ind.set_value_max(i64::MAX);
        ind.set_size(19);
        let rec = Rc::new(Recorder::default());
        ind.subscribe(&rec);
        let mut mapper = InputMapper::new();

        // 10 notches on the 10^18 cell overflow either way
        assert_eq!(mapper.handle(&mut ind, 0, CellInput::Scroll(10)), None);
        assert_eq!(ind.value(), 0);
        assert_eq!(mapper.handle(&mut ind, 0, CellInput::Scroll(-10)), None);
        assert_eq!(ind.value(), 0);
        assert!(rec.take().is_empty());

        // Within range the same cell still scrolls normally
        assert_eq!(
            mapper.handle(&mut ind, 0, CellInput::Scroll(9)),
            Some(9_000_000_000_000_000_000)
        );
        assert_eq!(ind.value(), 9_000_000_000_000_000_000);
    }

    #[test]
    fn test_inactive_cells_ignore_everything() {
        let (mut ind, mut mapper, rec) = setup(4, 9_999);
        ind.set_value(1_234);
        ind.set_delta_min(100);
        rec.take();

        for index in [2, 3] {
            for input in [
                CellInput::Press(PointerHalf::Upper),
                CellInput::Press(PointerHalf::Lower),
                CellInput::Hover(PointerHalf::Upper),
                CellInput::Scroll(4),
            ] {
                assert_eq!(mapper.handle(&mut ind, index, input), None);
            }
            assert_eq!(mapper.pending(index), PendingDirection::Neutral);
        }

        assert_eq!(ind.value(), 1_234);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_out_of_bounds_cell_is_ignored() {
        let (mut ind, mut mapper, _rec) = setup(2, 99);
        assert_eq!(mapper.handle(&mut ind, 5, CellInput::Press(PointerHalf::Upper)), None);
        assert_eq!(ind.value(), 0);
    }

    #[test]
    fn test_clicks_then_scroll_end_to_end() {
        let (mut ind, mut mapper, rec) = setup(3, 999);

        for _ in 0..3 {
            mapper.handle(&mut ind, 0, CellInput::Press(PointerHalf::Upper));
        }
        assert_eq!(ind.value(), 300);
        assert_eq!(rec.take(), vec![100, 200, 300]);

        mapper.handle(&mut ind, 2, CellInput::Scroll(-5));
        assert_eq!(ind.value(), 295);
        assert_eq!(rec.take(), vec![295]);
    }
}
