//! Horizontal auto-repeat (DAS/ARR).
//!
//! Counters advance only by the deltas handed to [`AutoShift::update`], so the
//! repeat schedule is as deterministic as the rest of the simulation.

use crate::types::BOARD_WIDTH;

/// More repeats than columns cannot move a piece any further.
const MAX_REPEATS: u32 = BOARD_WIDTH as u32;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    /// Column delta for one step
    pub fn dx(self) -> i8 {
        match self {
            HorizontalDirection::Left => -1,
            HorizontalDirection::Right => 1,
            HorizontalDirection::None => 0,
        }
    }
}

/// Held-direction state and its DAS/ARR counters.
#[derive(Debug, Clone)]
pub struct AutoShift {
    direction: HorizontalDirection,
    das_timer: f64,
    arr_accumulator: f64,
    das_delay: f64,
    arr_rate: f64,
}

impl AutoShift {
    /// An `arr_rate` of zero is treated as 1 ms.
    pub fn new(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            direction: HorizontalDirection::None,
            das_timer: 0.0,
            arr_accumulator: 0.0,
            das_delay: f64::from(das_delay),
            arr_rate: f64::from(arr_rate.max(1)),
        }
    }

    pub fn direction(&self) -> HorizontalDirection {
        self.direction
    }

    /// Start holding `direction`, restarting the DAS delay.
    pub fn press(&mut self, direction: HorizontalDirection) {
        self.direction = direction;
        self.das_timer = 0.0;
        self.arr_accumulator = 0.0;
    }

    /// Stop holding `direction`. A release for the other side is ignored.
    pub fn release(&mut self, direction: HorizontalDirection) {
        if self.direction == direction {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.direction = HorizontalDirection::None;
        self.das_timer = 0.0;
        self.arr_accumulator = 0.0;
    }

    /// Advance by `elapsed_ms` and return how many repeat moves are due.
    ///
    /// Nothing repeats until the DAS delay has passed; after that, time beyond
    /// the delay accrues into ARR intervals. The count is capped at the board
    /// width.
    pub fn update(&mut self, elapsed_ms: f64) -> u32 {
        if self.direction == HorizontalDirection::None {
            return 0;
        }

        let prev_das = self.das_timer;
        self.das_timer += elapsed_ms;
        if self.das_timer < self.das_delay {
            return 0;
        }

        let excess = if prev_das < self.das_delay {
            self.das_timer - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;

        let due = (self.arr_accumulator / self.arr_rate).floor();
        self.arr_accumulator %= self.arr_rate;
        due.min(f64::from(MAX_REPEATS)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_after_delay() {
        let mut shift = AutoShift::new(100, 25);
        shift.press(HorizontalDirection::Left);

        // Before DAS expires: no repeats.
        assert_eq!(shift.update(99.0), 0);
        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert_eq!(shift.update(1.0), 0);
        // First ARR interval after DAS: one repeat.
        assert_eq!(shift.update(25.0), 1);
        assert_eq!(shift.update(25.0), 1);
        // Two intervals at once.
        assert_eq!(shift.update(50.0), 2);
    }

    #[test]
    fn test_single_large_step_covers_das_and_arr() {
        let mut shift = AutoShift::new(150, 50);
        shift.press(HorizontalDirection::Right);
        assert_eq!(shift.update(260.0), 2);
    }

    #[test]
    fn test_release_other_side_keeps_hold() {
        let mut shift = AutoShift::new(100, 25);
        shift.press(HorizontalDirection::Right);
        shift.release(HorizontalDirection::Left);
        assert_eq!(shift.direction(), HorizontalDirection::Right);

        shift.release(HorizontalDirection::Right);
        assert_eq!(shift.direction(), HorizontalDirection::None);
        assert_eq!(shift.update(1000.0), 0);
    }

    #[test]
    fn test_huge_step_is_capped_at_board_width() {
        let mut shift = AutoShift::new(150, 50);
        shift.press(HorizontalDirection::Left);
        assert_eq!(shift.update(1e19), u32::from(BOARD_WIDTH));
        assert!(shift.arr_accumulator < 50.0);
        assert_eq!(shift.update(f64::MAX / 4.0), u32::from(BOARD_WIDTH));
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let mut shift = AutoShift::new(0, 0);
        shift.press(HorizontalDirection::Right);
        assert_eq!(shift.update(3.0), 3);
        assert_eq!(shift.update(1_000.0), u32::from(BOARD_WIDTH));
    }

    #[test]
    fn test_press_restarts_delay() {
        let mut shift = AutoShift::new(100, 25);
        shift.press(HorizontalDirection::Left);
        assert_eq!(shift.update(90.0), 0);
        shift.press(HorizontalDirection::Right);
        assert_eq!(shift.update(90.0), 0);
        assert_eq!(shift.update(35.0), 1);
    }
}
