//! Scoring module - line clear points, drop points, levels, gravity speed

use crate::types::{
    DROP_INTERVALS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS_PER_ROW,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Counts outside 1..=4 cannot happen with tetrominoes and score nothing.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS_PER_ROW
    } else {
        SOFT_DROP_POINTS_PER_ROW
    };
    rows.saturating_mul(per_row)
}

/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, clamped to the last table entry
pub fn drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVALS[DROP_INTERVALS.len() - 1])
}
