//! Scoring module - line clear points, leveling, gravity and boss damage
//!
//! - Line clears award `LINE_SCORES[n] * level`, using the level before the clear.
//! - Level is `lines / 10 + 1`.
//! - Gravity interval is `max(50, 500 - (level - 1) * 25)`.
//! - Each cleared row deals 5 boss damage, except a four-row clear which deals 25.

use crate::types::{
    BASE_FALL_MS, DAMAGE_PER_LINE, FALL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, MIN_FALL_MS, TETRIS_DAMAGE,
};

/// Calculate line clear score
/// lines: number of rows cleared (1-4, anything else scores 0)
/// level: current level (1-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Level reached after clearing `total_lines` rows.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, before boss effects.
pub fn fall_base_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(step).max(MIN_FALL_MS)
}

/// Gravity interval with boss effects applied.
///
/// Speed boost halves the interval, time pressure quarters it; both compose
/// with integer division in that order.
pub fn effective_fall_interval_ms(base: u32, speed_boost: bool, time_pressure: bool) -> u32 {
    let mut interval = base;
    if speed_boost {
        interval /= 2;
    }
    if time_pressure {
        interval /= 4;
    }
    interval
}

/// Boss damage for a clear of `lines` rows.
pub fn boss_damage(lines: usize) -> u32 {
    match lines {
        0 => 0,
        4 => TETRIS_DAMAGE,
        n => (n as u32).saturating_mul(DAMAGE_PER_LINE),
    }
}

/// Points for descending `rows` with a hard drop.
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}
