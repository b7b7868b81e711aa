//! Scoring module - line score, level and gravity laws
//!
//! - Line clears score `LINE_SCORES[n] * level` (1 line = 100 ... 4 lines = 800).
//! - Level is `lines / 10 + 1` and never goes down.
//! - Gravity starts at 2000ms per row and speeds up by 120ms per level, floored at 800ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    START_LEVEL,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// More than four rows in one lock cannot happen with the stock pieces; if it ever
/// does, it scores like four.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached after clearing `total_lines`
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Gravity period in milliseconds for `level`
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_FLOOR_MS)
}
