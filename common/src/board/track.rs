//! Linear race track folded into rows that alternate direction, starting bottom-left.

use super::GridCoord;

pub const DEFAULT_TRACK_LENGTH: u32 = 100;
pub const TRACK_COLUMNS: u32 = 10;
/// Longest track whose rows still fit a `GridCoord`.
pub const MAX_TRACK_LENGTH: u32 = u8::MAX as u32 * TRACK_COLUMNS;

pub fn track_rows(length: u32) -> u32 {
    length.clamp(1, MAX_TRACK_LENGTH).div_ceil(TRACK_COLUMNS)
}

/// Squares are numbered from 1; position 0 (not started) shares the first square and
/// anything past the end is drawn on the last square.
pub fn track_to_grid(position: u32, length: u32) -> GridCoord {
    let length = length.clamp(1, MAX_TRACK_LENGTH);
    let index = position.clamp(1, length) - 1;
    let rows = track_rows(length);
    let band = index / TRACK_COLUMNS;
    let offset = index % TRACK_COLUMNS;
    let col = if band % 2 == 0 { offset } else { TRACK_COLUMNS - 1 - offset };
    let row = rows - 1 - band;
    GridCoord::new(row as u8, col as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_snakes_upward() {
        assert_eq!(track_to_grid(1, 100), GridCoord::new(9, 0));
        assert_eq!(track_to_grid(10, 100), GridCoord::new(9, 9));
        assert_eq!(track_to_grid(11, 100), GridCoord::new(8, 9));
        assert_eq!(track_to_grid(20, 100), GridCoord::new(8, 0));
        assert_eq!(track_to_grid(100, 100), GridCoord::new(0, 0));
    }

    #[test]
    fn test_track_clamps_out_of_range_positions() {
        assert_eq!(track_to_grid(0, 100), track_to_grid(1, 100));
        assert_eq!(track_to_grid(250, 100), track_to_grid(100, 100));
        assert_eq!(track_rows(35), 4);
    }

    #[test]
    fn test_oversized_track_is_capped_instead_of_wrapping() {
        assert_eq!(track_rows(3000), track_rows(MAX_TRACK_LENGTH));
        assert_eq!(track_to_grid(1, 3000), GridCoord::new(254, 0));
        assert_eq!(track_to_grid(MAX_TRACK_LENGTH, MAX_TRACK_LENGTH).row, 0);
    }
}
